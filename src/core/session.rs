//! Session environment construction and sign-on launch.
//!
//! The environment for a session is an explicit value applied to the
//! child process only; the launcher never mutates its own environment or
//! working directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::cluster::ClusterConfig;
use crate::core::constants;
use crate::core::platform::{interpreter_for, HostPlatform};
use crate::error::{KubedError, Result};

/// Everything the child process needs beyond the inherited environment.
#[derive(Debug)]
pub struct SessionEnvironment {
    /// Cluster/token variables overlaid on the inherited environment.
    pub vars: Vec<(String, String)>,
    /// Rebuilt search path, original `PATH` kept as the final segment.
    pub path: OsString,
    /// Per-user working directory the script runs in.
    pub workdir: PathBuf,
}

impl SessionEnvironment {
    /// Build the environment for one session.
    ///
    /// # Errors
    ///
    /// Returns `WorkdirMissing` when `<home>/k8s` does not exist.
    pub fn build(
        platform: HostPlatform,
        config: &ClusterConfig,
        token: &str,
        home: &Path,
    ) -> Result<Self> {
        let workdir = home.join(constants::WORKDIR_NAME);
        if !workdir.is_dir() {
            return Err(KubedError::WorkdirMissing(workdir));
        }

        Ok(Self {
            vars: overlay_vars(config, token),
            path: join_search_path(platform.extra_path_dirs(home), std::env::var_os("PATH"))?,
            workdir,
        })
    }
}

/// The variables a session overlays on the inherited environment.
pub fn overlay_vars(config: &ClusterConfig, token: &str) -> Vec<(String, String)> {
    vec![
        ("DOMAIN".to_string(), config.domain.clone()),
        ("CNC_DOMAIN".to_string(), config.cnc_domain.clone()),
        ("CNC".to_string(), config.cnc.clone()),
        ("VAULT_ADDR".to_string(), config.vault_addr.clone()),
        ("VAULT_NAMESPACE".to_string(), config.vault_namespace.clone()),
        (constants::TOKEN_KEY.to_string(), token.to_string()),
    ]
}

/// Prepend the existing extra directories to the current search path.
fn join_search_path(extra: Vec<PathBuf>, current: Option<OsString>) -> Result<OsString> {
    let mut parts: Vec<PathBuf> = extra.into_iter().filter(|d| d.is_dir()).collect();
    if let Some(current) = current {
        parts.extend(std::env::split_paths(&current));
    }
    std::env::join_paths(parts)
        .map_err(|e| KubedError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Resolve the sign-on script and its arguments from a `SIGN_ON` command.
///
/// The first whitespace token is the script, resolved against the working
/// directory; the rest are passed through as arguments. On Windows a bare
/// name is also tried with `.ps1`/`.bat`/`.cmd` appended.
///
/// # Errors
///
/// Returns `ScriptMissing` when no candidate exists on disk.
pub fn resolve_script(
    platform: HostPlatform,
    workdir: &Path,
    sign_on: &str,
) -> Result<(PathBuf, Vec<String>)> {
    let mut tokens = sign_on.split_whitespace().map(str::to_string);
    let program = tokens
        .next()
        .ok_or_else(|| KubedError::ScriptMissing(workdir.to_path_buf()))?;
    let args: Vec<String> = tokens.collect();

    let base = workdir.join(&program);
    if base.is_file() {
        return Ok((base, args));
    }

    if platform == HostPlatform::Windows && base.extension().is_none() {
        for ext in ["ps1", "bat", "cmd"] {
            let candidate = workdir.join(format!("{program}.{ext}"));
            if candidate.is_file() {
                return Ok((candidate, args));
            }
        }
    }

    Err(KubedError::ScriptMissing(base))
}

/// Run the sign-on script synchronously with the built environment.
///
/// # Errors
///
/// A non-zero child exit becomes `SignOnFailed`; death by signal becomes
/// `SignOnKilled`.
pub fn launch(
    platform: HostPlatform,
    env: &SessionEnvironment,
    script: &Path,
    args: &[String],
) -> Result<()> {
    let interpreter = interpreter_for(platform, script)?;
    debug!(script = %script.display(), ?interpreter, "launching sign-on script");

    let mut cmd = interpreter.command(script, args);
    cmd.current_dir(&env.workdir);
    cmd.env("PATH", &env.path);
    for (key, value) in &env.vars {
        cmd.env(key, value);
    }

    let status = cmd.status()?;
    if status.success() {
        Ok(())
    } else {
        match status.code() {
            Some(code) => Err(KubedError::SignOnFailed(code)),
            None => Err(KubedError::SignOnKilled),
        }
    }
}
