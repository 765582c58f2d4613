use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use super::UrlOpener;

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

/// Opens URLs with the platform launcher (`xdg-open`, or `open` on macOS)
#[derive(Debug, Default)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        // Spawn only; the launcher keeps running after we exit
        Command::new(OPENER)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start {OPENER}"))?;
        log::debug!("launched {OPENER} for {url}");
        Ok(())
    }
}
