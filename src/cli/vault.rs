//! Vault token capture command.
//!
//! Reads the clipboard, checks for the token marker, persists the token
//! into the local `.env` store, and clears the clipboard.

use crate::cli::output;
use crate::core::clipboard::{system_clipboard, Clipboard};
use crate::core::constants;
use crate::core::platform::HostPlatform;
use crate::core::store::EnvStore;
use crate::error::{KubedError, Result};

/// Capture a vault token from the system clipboard.
pub fn execute() -> Result<()> {
    let platform = HostPlatform::detect()?;
    let clipboard = system_clipboard(platform)?;
    let store = EnvStore::at(std::env::current_dir()?.join(constants::STORE_FILE));

    capture_token(clipboard.as_ref(), &store)?;

    output::success("vault token uploaded");
    Ok(())
}

/// Validate the clipboard text and write it into the store.
///
/// Trailing line endings are trimmed; the clipboard is cleared only after
/// the store write succeeded.
pub fn capture_token(clipboard: &dyn Clipboard, store: &EnvStore) -> Result<()> {
    let text = clipboard.read_text()?;
    let token = text.trim_end_matches(['\r', '\n']);

    if !token.contains(constants::TOKEN_MARKER) {
        return Err(KubedError::TokenMarkerMissing);
    }

    store.set(constants::TOKEN_KEY, token)?;
    clipboard.clear()?;
    Ok(())
}
