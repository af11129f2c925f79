//! Constants used throughout xsops.
//!
//! Centralizes magic strings and configuration values.

/// Application directory name under the per-user data and config roots.
pub const APP_DIR: &str = "xsops";

/// Vault file name used by `default`, `.` and `init`.
pub const VAULT_FILE: &str = "xsops.secrets.json";

/// Top-level document key holding the engine's own metadata.
pub const RESERVED_KEY: &str = "sops";

/// URI scheme accepted alongside `file:`.
pub const URI_SCHEME: &str = "xsops";

/// Identifier naming the per-user default vault.
pub const DEFAULT_IDENTIFIER: &str = "default";

/// Identifier naming the vault in the current directory.
pub const CWD_IDENTIFIER: &str = ".";

/// Alias registry file name under the config home.
pub const REGISTRY_FILE: &str = "registry.json";

/// Settings file name under the config home.
pub const CONFIG_FILE: &str = "config.toml";

/// Engine configuration file name (per vault directory and config home).
pub const SOPS_CONFIG_FILE: &str = ".sops.yaml";

/// Default encryption engine binary.
pub const DEFAULT_ENGINE: &str = "sops";

/// Default key-generation binary.
pub const DEFAULT_KEYGEN: &str = "age-keygen";

/// Length of generated secrets when no positive size is requested.
pub const DEFAULT_SECRET_SIZE: usize = 32;

/// Largest secret `ensure` will generate.
pub const MAX_SECRET_SIZE: i64 = i16::MAX as i64;

/// Symbol set used by `ensure` unless symbols are disabled or replaced.
pub const DEFAULT_SYMBOLS: &str = "_-@#^~`|=+{}[]";

/// Line prefix carrying the public key in an age key file.
pub const AGE_PUBLIC_KEY_PREFIX: &str = "# public key: ";

/// Environment variables read by xsops.
pub mod env {
    /// Default vault identifier for the global `--vault` flag.
    pub const VAULT: &str = "XSOPS_VAULT";
    /// Log filter directive, e.g. `xsops=trace`.
    pub const LOG: &str = "XSOPS_LOG";
    /// Override for the per-user data root (used verbatim).
    pub const DATA_HOME: &str = "XSOPS_DATA_HOME";
    /// Override for the per-user config root (used verbatim).
    pub const CONFIG_HOME: &str = "XSOPS_CONFIG_HOME";
    pub const XDG_DATA_HOME: &str = "XDG_DATA_HOME";
    pub const XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";
    pub const APPDATA: &str = "APPDATA";
    pub const USERPROFILE: &str = "USERPROFILE";
    pub const HOME: &str = "HOME";
    /// Editor command honored by the engine's interactive edit.
    pub const SOPS_EDITOR: &str = "SOPS_EDITOR";
}

/// Editor command used by `edit --use-code`.
pub const VSCODE_EDITOR: &str =
    "code --wait --new-window --disable-workspace-trust --disable-extensions --disable-telemetry";
