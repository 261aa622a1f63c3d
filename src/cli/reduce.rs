//! Inventory reduction command.

use std::path::Path;

use crate::cli::output;
use crate::core::inventory;
use crate::error::Result;

/// Reduce a raw inventory file into the cluster map file.
///
/// Skipped records are reported as warnings; they never fail the run.
pub fn execute(src: &Path, dst: &Path) -> Result<()> {
    let summary = inventory::reduce(src, dst)?;

    for skipped in &summary.skipped {
        output::warn(&format!(
            "item #{} missing name/domain; skipping",
            skipped.index
        ));
    }
    output::success(&format!(
        "{} clusters written to {}",
        summary.written,
        dst.display()
    ));
    Ok(())
}
