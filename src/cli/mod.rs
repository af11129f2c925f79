//! Command-line interface.

pub mod completions;
pub mod output;
pub mod secrets;
pub mod vault;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::config::Settings;
use crate::core::constants;
use crate::core::engine::Sops;
use crate::core::paths::HostEnv;
use crate::core::registry::AliasRegistry;
use crate::core::resolve::Resolver;
use crate::core::vault::Vault;
use crate::error::Result;

/// xsops - use sops and JSON as a local secret store.
#[derive(Parser)]
#[command(
    name = "xsops",
    about = "Use sops and JSON as a local secret store",
    version,
    after_help = "Vault identifiers: default, . (current directory), an alias from registry.json,\n\
                  a file: or xsops: URI, or a path."
)]
pub struct Cli {
    /// Vault to operate on
    #[arg(
        short = 'v',
        long,
        global = true,
        env = constants::env::VAULT,
        default_value = constants::CWD_IDENTIFIER
    )]
    pub vault: String,

    /// Show debug logs and full error details
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print a secret value
    Get {
        /// Secret key
        key: String,
        /// Trim surrounding whitespace and omit the trailing newline
        #[arg(long)]
        trim: bool,
    },

    /// Create or update a secret
    Set {
        /// Secret key (e.g., db-password)
        key: String,
        /// Secret value
        #[arg(long)]
        value: Option<String>,
        /// Read the value from standard input
        #[arg(short = 'S', long)]
        stdin: bool,
        /// Read the value from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Read the value from an environment variable
        #[arg(short, long)]
        env: Option<String>,
        /// Expiry time (RFC 3339, e.g. 2030-01-01T00:00:00Z)
        #[arg(short = 'E', long, value_parser = parse_timestamp)]
        expires_at: Option<DateTime<Utc>>,
        /// Tags as key=value pairs, comma separated
        #[arg(short, long, value_parser = parse_tag, value_delimiter = ',')]
        tags: Option<Vec<(String, String)>>,
    },

    /// Print a secret, generating and storing one if it does not exist
    Ensure {
        /// Secret key
        key: String,
        /// Length of a generated secret (0 or less means 32)
        #[arg(
            short,
            long,
            default_value_t = 0,
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i16)
        )]
        size: i16,
        /// Exact characters to draw from (overrides the class flags)
        #[arg(short, long)]
        chars: Option<String>,
        /// Exclude uppercase letters
        #[arg(short = 'U', long)]
        no_upper: bool,
        /// Exclude lowercase letters
        #[arg(short = 'L', long)]
        no_lower: bool,
        /// Exclude digits
        #[arg(short = 'D', long)]
        no_digits: bool,
        /// Exclude symbols
        #[arg(long, conflicts_with = "symbols")]
        no_symbols: bool,
        /// Symbols to use instead of the default set
        #[arg(long)]
        symbols: Option<String>,
        /// Trim surrounding whitespace and omit the trailing newline
        #[arg(long)]
        trim: bool,
    },

    /// Remove a secret
    Rm {
        /// Secret key
        key: String,
    },

    /// List secret keys
    #[command(alias = "list")]
    Ls {
        /// Glob pattern keys must match (e.g. 'db-*')
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Create an age identity, sops rules and an empty vault
    Init {
        /// Directory for the vault (default: the xsops data directory)
        dir: Option<PathBuf>,
    },

    /// Open the vault in the sops editor
    Edit {
        /// Use Visual Studio Code as the editor
        #[arg(long)]
        use_code: bool,
    },

    /// Print the resolved vault path
    Path,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

fn parse_tag(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.trim().to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

/// Everything a command needs to find and drive a vault.
pub struct Context {
    pub resolver: Resolver,
    pub settings: Settings,
    /// Vault identifier from `--vault`
    pub identifier: String,
}

impl Context {
    /// Capture the process environment and load the registry and settings.
    ///
    /// If the config home cannot be determined, the registry is empty and
    /// the settings are defaults; explicit paths still resolve.
    pub fn load(identifier: String) -> Result<Self> {
        let host = HostEnv::capture();
        let (registry, settings) = match host.config_home() {
            Ok(_) => (AliasRegistry::load(&host)?, Settings::load(&host)?),
            Err(e) => {
                debug!(error = %e, "no config home, using defaults");
                (AliasRegistry::empty(), Settings::default())
            }
        };

        Ok(Self {
            resolver: Resolver::new(host, registry),
            settings,
            identifier,
        })
    }

    /// Resolve `--vault` to a file path.
    pub fn vault_path(&self) -> Result<PathBuf> {
        Ok(self.resolver.resolve(&self.identifier)?)
    }

    /// Open the selected vault with the configured engine.
    pub fn vault(&self) -> Result<Vault<Sops>> {
        let path = self.vault_path()?;
        debug!(vault = %self.identifier, path = %path.display(), "resolved vault");
        Ok(Vault::open(path, self.engine()))
    }

    pub fn engine(&self) -> Sops {
        Sops::new(self.settings.engine.program.clone())
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    if let Completions { shell } = &cli.command {
        return completions::execute(shell.clone());
    }

    let ctx = Context::load(cli.vault)?;
    match cli.command {
        Get { key, trim } => secrets::get(&ctx, &key, trim),
        Set {
            key,
            value,
            stdin,
            file,
            env,
            expires_at,
            tags,
        } => secrets::set(
            &ctx,
            &key,
            secrets::SetArgs {
                value,
                stdin,
                file,
                env,
                expires_at,
                tags,
            },
        ),
        Ensure {
            key,
            size,
            chars,
            no_upper,
            no_lower,
            no_digits,
            no_symbols,
            symbols,
            trim,
        } => {
            let charset = secrets::charset(chars, no_upper, no_lower, no_digits, no_symbols, symbols);
            secrets::ensure(&ctx, &key, size.into(), &charset, trim)
        }
        Rm { key } => secrets::rm(&ctx, &key),
        Ls { filter } => secrets::list(&ctx, filter.as_deref()),
        Init { dir } => vault::init(&ctx, dir.as_deref()),
        Edit { use_code } => vault::edit(&ctx, use_code),
        Path => vault::path(&ctx),
        Completions { .. } => Ok(()),
    }
}
