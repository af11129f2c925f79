//! Vault commands (init, edit, path).

use std::path::Path;

use crate::cli::{output, Context};
use crate::core::constants;
use crate::core::engine::Engine;
use crate::core::vault::Vault;
use crate::error::Result;

/// Create the age identity, sops rules and an empty vault.
pub fn init(ctx: &Context, dir: Option<&Path>) -> Result<()> {
    let host = ctx.resolver.host();
    let (_, report) = Vault::init(ctx.engine(), host, &ctx.settings.engine.keygen, dir)?;

    if report.created_key {
        output::success(&format!(
            "generated age identity: {}",
            output::path(&report.key_file.display().to_string())
        ));
    }
    if report.created_vault {
        output::success(&format!(
            "initialized vault: {}",
            output::path(&report.vault.display().to_string())
        ));
    } else {
        output::warn(&format!(
            "vault already exists: {}",
            output::path(&report.vault.display().to_string())
        ));
    }
    if report.created_rules {
        output::kv("rules", report.vault.with_file_name(constants::SOPS_CONFIG_FILE).display());
    }
    Ok(())
}

/// Open the vault in the engine's editor, exiting with its status.
pub fn edit(ctx: &Context, use_code: bool) -> Result<()> {
    let vault = ctx.vault()?;
    let editor = use_code.then_some(constants::VSCODE_EDITOR);
    let code = vault.engine().edit(vault.path(), editor)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Print the resolved vault path.
pub fn path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.vault_path()?.display());
    Ok(())
}
