//! Graphical key/link dialog through `yad --form`.

use std::process::Command;

use anyhow::{Context, Result};

use super::{Interaction, KeyLinkPrompt};

const DIALOG_TITLE: &str = "BookmarkIt";
const DIALOG_TEXT: &str = "Please enter your bookmark and a key";
/// Field separator yad places between (and after) form values
const FIELD_SEPARATOR: &str = "___";

/// yad exit codes meaning the user dismissed the dialog
const CANCEL_CODES: [i32; 2] = [
    1,   // Cancel button
    252, // Esc or window closed
];

/// Key/link prompt backed by the `yad` dialog tool
#[derive(Debug, Default)]
pub struct YadPrompt;

impl KeyLinkPrompt for YadPrompt {
    fn prompt(&mut self, seed: &str) -> Result<Interaction<(String, String)>> {
        let separator = format!("--separator={FIELD_SEPARATOR}");
        let output = Command::new("yad")
            .args([
                "--form",
                "--title",
                DIALOG_TITLE,
                "--text",
                DIALOG_TEXT,
                "--width=650",
                "--height=150",
                separator.as_str(),
                "--field=Key",
                "--field=Bookmark",
                "",
                seed,
            ])
            .output()
            .context("Failed to run yad")?;

        if !output.status.success() {
            if output
                .status
                .code()
                .is_some_and(|code| CANCEL_CODES.contains(&code))
            {
                return Ok(Interaction::Cancelled);
            }
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("yad failed ({}): {}", output.status, stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_form_output(&stdout).map(Interaction::Done)
    }
}

/// Split `key___link___` into its two values
pub fn parse_form_output(output: &str) -> Result<(String, String)> {
    let result = output.trim();
    let (key, rest) = result.split_once(FIELD_SEPARATOR).with_context(|| {
        format!("separator '{FIELD_SEPARATOR}' not found in yad result: '{result}'")
    })?;
    let link = rest.strip_suffix(FIELD_SEPARATOR).unwrap_or(rest);
    Ok((key.to_string(), link.to_string()))
}
