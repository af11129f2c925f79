//! xsops - use sops and JSON as a local secret store.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── secrets       # get, set, ensure, rm, ls
//! │   ├── vault         # init, edit, path
//! │   ├── output        # Styled terminal output
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── paths         # Per-user data/config roots
//!     ├── config        # Settings (config.toml)
//!     ├── registry      # Alias registry (registry.json)
//!     ├── resolve       # Vault identifier -> file path
//!     ├── record        # Secret record schema and merge rules
//!     ├── source        # Secret value sources
//!     ├── generate      # Random secret generation
//!     ├── engine/       # Encryption engine seam
//!     │   ├── mod       # Engine trait, probe classification
//!     │   ├── sops      # sops CLI implementation
//!     │   └── keygen    # age identity generation
//!     └── vault/        # Operations over one vault file
//! ```
//!
//! # Features
//!
//! - One identifier syntax for shorthands, aliases, URIs and paths
//! - Structured records with timestamps, tags and expiry
//! - Idempotent `ensure` backed by the OS random source
//! - All cryptography delegated to sops

pub mod cli;
pub mod core;
pub mod error;
