//! Secret commands (get, set, ensure, rm, ls).

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::cli::{output, Context};
use crate::core::generate::{Charset, Symbols};
use crate::core::record::RecordUpdate;
use crate::core::source::ValueSources;
use crate::core::vault::Change;
use crate::error::Result;

/// Flags accepted by `set`.
#[derive(Debug, Default)]
pub struct SetArgs {
    pub value: Option<String>,
    pub stdin: bool,
    pub file: Option<PathBuf>,
    pub env: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub tags: Option<Vec<(String, String)>>,
}

/// Print a secret value.
pub fn get(ctx: &Context, key: &str, trim: bool) -> Result<()> {
    let secret = ctx.vault()?.get(key)?;
    print_secret(&secret, trim)
}

/// Create or update a secret.
pub fn set(ctx: &Context, key: &str, args: SetArgs) -> Result<()> {
    let sources = ValueSources {
        value: args.value,
        stdin: args.stdin,
        file: args.file,
        env: args.env,
    };
    let update = RecordUpdate {
        secret: sources.resolve_from_process(key)?,
        expires_at: args.expires_at,
        tags: args.tags.map(|tags| tags.into_iter().collect()),
    };

    let vault = ctx.vault()?;
    match vault.set(key, update)? {
        Change::Created => output::success(&format!("created: {}", output::key(key))),
        Change::Updated => output::success(&format!("updated: {}", output::key(key))),
    }
    Ok(())
}

/// Build the generator alphabet from the `ensure` flags.
pub fn charset(
    chars: Option<String>,
    no_upper: bool,
    no_lower: bool,
    no_digits: bool,
    no_symbols: bool,
    symbols: Option<String>,
) -> Charset {
    if let Some(chars) = chars.filter(|c| !c.is_empty()) {
        return Charset::Custom(chars);
    }

    let symbols = match symbols {
        _ if no_symbols => Symbols::Disabled,
        Some(s) if !s.is_empty() => Symbols::Custom(s),
        _ => Symbols::Default,
    };
    Charset::Classes {
        upper: !no_upper,
        lower: !no_lower,
        digits: !no_digits,
        symbols,
    }
}

/// Print a secret, generating it first if absent.
pub fn ensure(ctx: &Context, key: &str, size: i64, charset: &Charset, trim: bool) -> Result<()> {
    let ensured = ctx.vault()?.ensure(key, size, charset)?;
    if ensured.created {
        output::success(&format!("generated: {}", output::key(key)));
    }
    print_secret(&ensured.secret, trim)
}

/// Remove a secret.
pub fn rm(ctx: &Context, key: &str) -> Result<()> {
    if ctx.vault()?.remove(key)? {
        output::success(&format!("removed: {}", output::key(key)));
    } else {
        output::warn(&format!("key {} does not exist", output::key(key)));
    }
    Ok(())
}

/// List secret keys, one per line.
pub fn list(ctx: &Context, filter: Option<&str>) -> Result<()> {
    let keys = ctx.vault()?.list(filter)?;
    if keys.is_empty() {
        output::dimmed("no secrets stored");
    }
    for key in keys {
        output::list_item(&key);
    }
    Ok(())
}

fn print_secret(secret: &str, trim: bool) -> Result<()> {
    if trim {
        output::secret(secret.trim(), false)?;
    } else {
        output::secret(secret, true)?;
    }
    Ok(())
}
