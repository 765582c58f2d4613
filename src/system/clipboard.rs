use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use super::{command_available, Clipboard};

/// External clipboard program and the arguments that select its mode
struct Tool {
    program: &'static str,
    args: &'static [&'static str],
}

const WRITE_TOOLS: [Tool; 2] = [
    Tool {
        program: "wl-copy",
        args: &[],
    },
    Tool {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
];

const READ_TOOLS: [Tool; 2] = [
    Tool {
        program: "wl-paste",
        args: &["--no-newline"],
    },
    Tool {
        program: "xclip",
        args: &["-selection", "clipboard", "-o"],
    },
];

/// System clipboard.
///
/// Prefers `wl-copy`/`wl-paste` and `xclip` because the copied text outlives
/// this process there; `arboard` covers everything else.
#[derive(Debug, Default)]
pub struct SystemClipboard;

fn first_available(tools: &[Tool]) -> Option<&Tool> {
    tools.iter().find(|tool| command_available(tool.program))
}

impl Clipboard for SystemClipboard {
    fn read(&mut self) -> Result<String> {
        let Some(tool) = first_available(&READ_TOOLS) else {
            let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
            let text = clipboard.get_text().context("Failed to read clipboard")?;
            return Ok(text.trim().to_string());
        };

        let output = Command::new(tool.program)
            .args(tool.args)
            .output()
            .with_context(|| format!("Failed to run {}", tool.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{} failed: {}", tool.program, stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        let Some(tool) = first_available(&WRITE_TOOLS) else {
            let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
            clipboard
                .set_text(text)
                .context("Failed to copy to clipboard")?;
            return Ok(());
        };

        let mut child = Command::new(tool.program)
            .args(tool.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start {}", tool.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .with_context(|| format!("Failed to write to {}", tool.program))?;
        }

        let status = child
            .wait()
            .with_context(|| format!("Failed waiting for {}", tool.program))?;
        if !status.success() {
            anyhow::bail!("{} exited with {}", tool.program, status);
        }
        Ok(())
    }
}
