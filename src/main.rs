//! Kubed - cluster sign-on session helper.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kubed::cli::output;
use kubed::cli::{execute, Cli};
use kubed::error::KubedError;

fn main() {
    // Every defined failure exits 1, argument-shape errors included
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("KUBED_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("kubed=debug")
        } else {
            EnvFilter::new("kubed=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli) {
        // Format error with suggestion if available
        let suggestion = match &e {
            KubedError::StoreNotFound(_) | KubedError::TokenMissing => Some("run: kubed vault"),
            KubedError::MapNotFound { .. } | KubedError::MapParse { .. } => {
                Some("run: kubed-reduce")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
