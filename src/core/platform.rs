//! Host platform detection and sign-on script interpreter dispatch.
//!
//! Platform support is a closed enum; dispatch from script extension to
//! launch strategy is a fixed table so every combination is testable.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{KubedError, Result};

/// Supported host platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Linux,
    MacOs,
    Windows,
}

impl HostPlatform {
    /// Detect the platform this process is running on.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedPlatform` for any other host OS.
    pub fn detect() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::MacOs),
            "windows" => Ok(Self::Windows),
            other => Err(KubedError::UnsupportedPlatform(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
        }
    }

    /// Directories prepended to the session search path.
    ///
    /// Callers filter these to the ones that exist on disk.
    pub fn extra_path_dirs(&self, home: &Path) -> Vec<PathBuf> {
        match self {
            Self::MacOs => vec![
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/opt/homebrew/bin"),
            ],
            Self::Linux => vec![PathBuf::from("/usr/local/bin"), home.join(".local/bin")],
            Self::Windows => Vec::new(),
        }
    }
}

/// How a resolved sign-on script gets executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpreter {
    /// `$SHELL` (or `/bin/sh`) running the script.
    PosixShell,
    /// `pwsh` when present, `powershell` otherwise.
    PowerShell,
    /// `cmd /C`, Windows only.
    CmdShell,
    /// The script itself is the executable.
    Direct,
}

/// Look up the launch strategy for a script on a platform.
///
/// # Errors
///
/// `.bat`/`.cmd` scripts outside Windows are `UnsupportedScript`.
pub fn interpreter_for(platform: HostPlatform, script: &Path) -> Result<Interpreter> {
    let ext = script
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("sh") => Ok(Interpreter::PosixShell),
        Some("ps1") => Ok(Interpreter::PowerShell),
        Some("bat") | Some("cmd") => match platform {
            HostPlatform::Windows => Ok(Interpreter::CmdShell),
            _ => Err(KubedError::UnsupportedScript {
                script: script.to_path_buf(),
                platform: platform.name().to_string(),
            }),
        },
        _ => Ok(Interpreter::Direct),
    }
}

impl Interpreter {
    /// Build the child command for a resolved script and its arguments.
    pub fn command(&self, script: &Path, args: &[String]) -> Command {
        match self {
            Self::PosixShell => {
                let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());
                let mut cmd = Command::new(shell);
                cmd.arg(script).args(args);
                cmd
            }
            Self::PowerShell => {
                let program = if which::which("pwsh").is_ok() {
                    "pwsh"
                } else {
                    "powershell"
                };
                let mut cmd = Command::new(program);
                cmd.args(["-NoProfile", "-File"]).arg(script).args(args);
                cmd
            }
            Self::CmdShell => {
                let mut cmd = Command::new("cmd");
                cmd.arg("/C").arg(script).args(args);
                cmd
            }
            Self::Direct => {
                let mut cmd = Command::new(script);
                cmd.args(args);
                cmd
            }
        }
    }
}
