//! Command-line interface.

pub mod launch;
pub mod output;
pub mod reduce;
pub mod vault;

use clap::Parser;
use std::path::PathBuf;

use crate::core::constants;
use crate::error::Result;

/// Kubed - cluster sign-on session helper.
#[derive(Parser)]
#[command(
    name = "kubed",
    about = "Launch cluster sign-on sessions with a cached vault token",
    version
)]
pub struct Cli {
    /// `vault` to capture a token from the clipboard, or a cluster name to
    /// launch a sign-on session for
    pub target: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Dispatch a parsed `kubed` invocation.
pub fn execute(cli: Cli) -> Result<()> {
    if cli.target == "vault" {
        vault::execute()
    } else {
        launch::execute(&cli.target)
    }
}

/// Kubed-reduce - raw inventory to cluster map.
#[derive(Parser)]
#[command(
    name = "kubed-reduce",
    about = "Reduce a raw cluster inventory into the per-cluster sign-on map",
    version
)]
pub struct ReduceCli {
    /// Source inventory YAML
    #[arg(long, env = "CLUSTERS_SRC", default_value = constants::INVENTORY_FILE)]
    pub src: PathBuf,

    /// Destination cluster map YAML
    #[arg(long, default_value = constants::MAP_FILE)]
    pub dst: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
