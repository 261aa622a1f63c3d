//! Clipboard access.
//!
//! Reading the clipboard is a capability trait so the capture flow can be
//! exercised with a fake. Real implementations shell out to the platform
//! clipboard tools; on Linux several utilities are tried in a fixed
//! fallback order.

use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::core::platform::HostPlatform;
use crate::error::{KubedError, Result};

/// Capability to read and clear the system clipboard.
pub trait Clipboard {
    /// Current clipboard contents as UTF-8 text.
    fn read_text(&self) -> Result<String>;

    /// Empty the clipboard.
    fn clear(&self) -> Result<()>;
}

/// Select the clipboard implementation for the host platform.
///
/// # Errors
///
/// Returns `ClipboardUnavailable` when no clipboard tool is present.
pub fn system_clipboard(platform: HostPlatform) -> Result<Box<dyn Clipboard>> {
    match platform {
        HostPlatform::MacOs => Ok(Box::new(Pasteboard)),
        HostPlatform::Windows => Ok(Box::new(PowershellClipboard)),
        HostPlatform::Linux => {
            for tool in UnixClipboardTool::FALLBACK_ORDER {
                if which::which(tool.read_program()).is_ok() {
                    debug!(tool = tool.read_program(), "clipboard tool selected");
                    return Ok(Box::new(UnixToolClipboard { tool: *tool }));
                }
            }
            Err(KubedError::ClipboardUnavailable(
                "install wl-clipboard, xclip, or xsel".to_string(),
            ))
        }
    }
}

/// macOS pasteboard via `pbpaste`/`pbcopy`.
struct Pasteboard;

impl Clipboard for Pasteboard {
    fn read_text(&self) -> Result<String> {
        let mut cmd = Command::new("pbpaste");
        cmd.args(["-Prefer", "txt"]);
        read_stdout("pbpaste", cmd)
    }

    fn clear(&self) -> Result<()> {
        write_empty_stdin("pbcopy", Command::new("pbcopy"))
    }
}

/// Windows clipboard via PowerShell cmdlets.
struct PowershellClipboard;

impl Clipboard for PowershellClipboard {
    fn read_text(&self) -> Result<String> {
        let mut cmd = Command::new("powershell");
        cmd.args(["-NoProfile", "-Command", "Get-Clipboard -Raw"]);
        read_stdout("powershell", cmd)
    }

    fn clear(&self) -> Result<()> {
        let status = Command::new("powershell")
            .args(["-NoProfile", "-Command", "Set-Clipboard -Value ''"])
            .status()
            .map_err(|e| KubedError::ClipboardRead(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(KubedError::ClipboardRead(
                "powershell Set-Clipboard failed".to_string(),
            ))
        }
    }
}

/// Linux clipboard utilities, tried in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnixClipboardTool {
    WlClipboard,
    Xclip,
    Xsel,
}

impl UnixClipboardTool {
    const FALLBACK_ORDER: &'static [Self] = &[Self::WlClipboard, Self::Xclip, Self::Xsel];

    fn read_program(&self) -> &'static str {
        match self {
            Self::WlClipboard => "wl-paste",
            Self::Xclip => "xclip",
            Self::Xsel => "xsel",
        }
    }
}

struct UnixToolClipboard {
    tool: UnixClipboardTool,
}

impl Clipboard for UnixToolClipboard {
    fn read_text(&self) -> Result<String> {
        let (program, cmd) = match self.tool {
            UnixClipboardTool::WlClipboard => {
                let mut cmd = Command::new("wl-paste");
                cmd.arg("--no-newline");
                ("wl-paste", cmd)
            }
            UnixClipboardTool::Xclip => {
                let mut cmd = Command::new("xclip");
                cmd.args(["-selection", "clipboard", "-o"]);
                ("xclip", cmd)
            }
            UnixClipboardTool::Xsel => {
                let mut cmd = Command::new("xsel");
                cmd.args(["--clipboard", "--output"]);
                ("xsel", cmd)
            }
        };
        read_stdout(program, cmd)
    }

    fn clear(&self) -> Result<()> {
        match self.tool {
            UnixClipboardTool::WlClipboard => {
                let status = Command::new("wl-copy")
                    .arg("--clear")
                    .status()
                    .map_err(|e| KubedError::ClipboardRead(e.to_string()))?;
                if status.success() {
                    Ok(())
                } else {
                    Err(KubedError::ClipboardRead("wl-copy --clear failed".to_string()))
                }
            }
            UnixClipboardTool::Xclip => {
                let mut cmd = Command::new("xclip");
                cmd.args(["-selection", "clipboard", "-i"]);
                write_empty_stdin("xclip", cmd)
            }
            UnixClipboardTool::Xsel => {
                let status = Command::new("xsel")
                    .args(["--clipboard", "--clear"])
                    .status()
                    .map_err(|e| KubedError::ClipboardRead(e.to_string()))?;
                if status.success() {
                    Ok(())
                } else {
                    Err(KubedError::ClipboardRead("xsel --clear failed".to_string()))
                }
            }
        }
    }
}

/// Run a clipboard tool and return its stdout as UTF-8 text.
fn read_stdout(program: &str, mut cmd: Command) -> Result<String> {
    let output = cmd
        .stderr(Stdio::null())
        .output()
        .map_err(|e| KubedError::ClipboardRead(format!("{program}: {e}")))?;
    if !output.status.success() {
        return Err(KubedError::ClipboardRead(format!(
            "{program} exited with {}",
            output.status.code().unwrap_or(1)
        )));
    }
    String::from_utf8(output.stdout)
        .map_err(|_| KubedError::ClipboardRead(format!("{program}: clipboard is not UTF-8 text")))
}

/// Feed an empty stdin to a clipboard tool, emptying the selection.
fn write_empty_stdin(program: &str, mut cmd: Command) -> Result<()> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| KubedError::ClipboardRead(format!("{program}: {e}")))?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(b"")?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(KubedError::ClipboardRead(format!(
            "{program} exited with {}",
            status.code().unwrap_or(1)
        )))
    }
}
