//! Clipboard access for `--copy`.
//!
//! On X11 and Wayland the clipboard content disappears with the process that
//! owns it. On Linux, [`copy`] therefore hands the text to a detached instance
//! of this binary (started with [`SERVE_ENV`] set) which keeps serving it until
//! something else is copied.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::error::{Result, XawError};
use std::path::Path;
use std::process::{Command, Stdio};

/// Environment marker that turns the binary into a clipboard server.
pub const SERVE_ENV: &str = "__XAW_CLIPBOARD_SERVE";

/// Put `text` on the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    // Fails fast when no clipboard is reachable (e.g. no display server).
    let clipboard = arboard::Clipboard::new().map_err(clipboard_error)?;
    store(clipboard, text)
}

/// When started as a clipboard server, serve the text read from stdin and
/// return the exit status. `None` for a normal invocation.
pub fn serve_from_env() -> Option<i32> {
    std::env::var_os(SERVE_ENV)?;
    Some(match serve() {
        Ok(()) => 0,
        Err(_) => 1,
    })
}

#[cfg(target_os = "linux")]
fn store(clipboard: arboard::Clipboard, text: &str) -> Result<()> {
    use std::io::Write;

    drop(clipboard);

    let exe = std::env::current_exe()?;
    let mut child = server_command(&exe).spawn()?;
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| XawError::Clipboard("clipboard helper has no stdin".to_string()))?;
    stdin.write_all(text.as_bytes())?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn store(mut clipboard: arboard::Clipboard, text: &str) -> Result<()> {
    clipboard.set_text(text.to_string()).map_err(clipboard_error)
}

#[cfg(target_os = "linux")]
fn serve() -> Result<()> {
    use arboard::SetExtLinux;
    use std::io::Read;

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;

    // Blocks until another program takes over the clipboard.
    arboard::Clipboard::new()
        .map_err(clipboard_error)?
        .set()
        .wait()
        .text(text)
        .map_err(clipboard_error)
}

#[cfg(not(target_os = "linux"))]
fn serve() -> Result<()> {
    Ok(())
}

fn server_command(exe: &Path) -> Command {
    let mut cmd = Command::new(exe);
    cmd.env(SERVE_ENV, "1")
        .current_dir("/")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

fn clipboard_error(err: arboard::Error) -> XawError {
    XawError::Clipboard(err.to_string())
}
