//! Kubed-reduce - raw cluster inventory to per-cluster sign-on map.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kubed::cli::output;
use kubed::cli::{reduce, ReduceCli};

fn main() {
    let cli = match ReduceCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

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

    if let Err(e) = reduce::execute(&cli.src, &cli.dst) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
