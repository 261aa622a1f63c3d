//! Local credential store operations.
//!
//! The store is a plain KEY=VALUE `.env` file. The launcher discovers it
//! by walking ancestor directories from the working directory; only the
//! capture flow ever creates or writes it.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{KubedError, Result};

/// Handle to a `.env` credential store file.
#[derive(Debug, Clone)]
pub struct EnvStore {
    path: PathBuf,
}

impl EnvStore {
    /// Use the store at an explicit path (it need not exist yet).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Find an existing store by scanning `start` and its ancestors.
    ///
    /// # Errors
    ///
    /// Returns `StoreNotFound` when no ancestor holds a `.env` file.
    pub fn discover(start: &Path) -> Result<Self> {
        for dir in start.ancestors() {
            let candidate = dir.join(constants::STORE_FILE);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "credential store located");
                return Ok(Self { path: candidate });
            }
        }
        Err(KubedError::StoreNotFound(start.to_path_buf()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read one key's value, stripping surrounding quotes.
    ///
    /// Comments and malformed lines are ignored; the last occurrence of
    /// the key wins, matching dotenv load order.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let mut found = None;

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((k, v)) = line.split_once('=') {
                if k.trim() == key {
                    let v = v.trim().trim_matches('"').trim_matches('\'');
                    found = Some(v.to_string());
                }
            }
        }
        Ok(found)
    }

    /// Write one key, always quoted, preserving every other line.
    ///
    /// Creates the file when absent; replaces an existing line for the
    /// key in place, otherwise appends.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let contents = if self.path.is_file() {
            std::fs::read_to_string(&self.path)?
        } else {
            String::new()
        };

        let entry = format!("{key}=\"{value}\"");
        let mut lines: Vec<String> = contents.lines().map(str::to_string).collect();
        let mut replaced = false;

        for line in lines.iter_mut() {
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                continue;
            }
            if let Some((k, _)) = trimmed.split_once('=') {
                if k.trim() == key {
                    *line = entry.clone();
                    replaced = true;
                }
            }
        }
        if !replaced {
            lines.push(entry);
        }

        let mut output = lines.join("\n");
        output.push('\n');
        std::fs::write(&self.path, output)?;

        debug!(path = %self.path.display(), key, "store key written");
        Ok(())
    }
}

/// Resolve the vault token for a session.
///
/// A `VAULT_TOKEN` already exported in the process environment wins over
/// the store; the store is never allowed to clobber it.
///
/// # Errors
///
/// Returns `TokenMissing` when neither source has a non-empty token.
pub fn load_token(store: &EnvStore) -> Result<String> {
    if let Ok(token) = std::env::var(constants::TOKEN_KEY) {
        if !token.is_empty() {
            debug!("using VAULT_TOKEN from process environment");
            return Ok(token);
        }
    }
    match store.get(constants::TOKEN_KEY)? {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(KubedError::TokenMissing),
    }
}
