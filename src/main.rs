//! xsops - use sops and JSON as a local secret store.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use xsops::cli::output;
use xsops::cli::{execute, Cli};
use xsops::core::constants;

fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::env::LOG).unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("xsops=debug")
        } else {
            EnvFilter::new("xsops=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        if debug {
            output::error(&e.to_string());
            if let Some(hint) = e.hint() {
                output::hint(hint);
            }
        } else {
            output::error(e.summary());
            output::dimmed("re-run with --debug for details");
        }
        std::process::exit(1);
    }
}
