//! Clipboard hand-off.
//!
//! X11 and Wayland only serve a selection while its owner is running, so on
//! Linux the text is handed to a copy of this binary started with the hidden
//! `serve-clipboard` command. It takes ownership, reports back, and keeps
//! serving until another application replaces the clipboard contents.

use anyhow::{Context, Result};
use std::io::{Read, Write};

pub const SERVE_COMMAND: &str = "serve-clipboard";

#[cfg(target_os = "linux")]
const READY: &str = "ready";

/// Spawns the clipboard helper and waits until it owns the clipboard.
#[cfg(target_os = "linux")]
pub fn copy(text: &str) -> Result<()> {
    use anyhow::bail;
    use std::io::{BufRead, BufReader};
    use std::process::{Command, Stdio};

    let exe = std::env::current_exe().context("Failed to locate lmdiff executable")?;
    let mut child = Command::new(exe)
        .arg(SERVE_COMMAND)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .context("Failed to start clipboard helper")?;

    {
        let mut stdin = child.stdin.take().context("Clipboard helper has no stdin")?;
        stdin
            .write_all(text.as_bytes())
            .context("Failed to send prompt to clipboard helper")?;
    }

    let stdout = child.stdout.take().context("Clipboard helper has no stdout")?;
    let mut line = String::new();
    BufReader::new(stdout).read_line(&mut line)?;

    if !is_ready(&line) {
        let status = child.wait()?;
        bail!("Failed to copy prompt to clipboard (helper exited with {})", status);
    }

    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn copy(text: &str) -> Result<()> {
    arboard::Clipboard::new()
        .context("Failed to open clipboard")?
        .set_text(text)
        .context("Failed to copy prompt to clipboard")?;
    Ok(())
}

/// Body of the `serve-clipboard` command: reads the text from `input`, takes
/// the clipboard, signals on `status` and blocks until the contents are
/// replaced.
#[cfg(target_os = "linux")]
pub fn serve(mut input: impl Read, mut status: impl Write) -> Result<()> {
    use arboard::SetExtLinux;

    let mut text = String::new();
    input.read_to_string(&mut text)?;

    let mut clipboard = arboard::Clipboard::new().context("Failed to open clipboard")?;
    writeln!(status, "{}", READY)?;
    status.flush()?;
    drop(status);

    clipboard
        .set()
        .wait()
        .text(text)
        .context("Failed to copy prompt to clipboard")?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn serve(mut input: impl Read, _status: impl Write) -> Result<()> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    copy(&text)
}

#[cfg(target_os = "linux")]
fn is_ready(line: &str) -> bool {
    line.trim() == READY
}
