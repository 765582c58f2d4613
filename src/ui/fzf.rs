//! Fuzzy selection through an `fzf` subprocess.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use super::{Interaction, ListSelector, Pick};
use crate::config::FinderConfig;

/// fzf exit status when nothing matched the query
const EXIT_NO_MATCH: i32 = 1;
/// fzf exit status on Ctrl-C / Esc
const EXIT_INTERRUPTED: i32 = 130;

pub struct FzfSelector {
    config: FinderConfig,
}

impl FzfSelector {
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Command line arguments for one invocation
    pub fn args(&self, query: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "--prompt".to_string(),
            self.config.prompt.clone(),
            "--layout".to_string(),
            self.config.layout.clone(),
            format!("--height={}", self.config.height),
        ];
        if let Some(binding) = &self.config.copy_key_binding {
            // fzf prints the pressed key on its own line before the selection
            args.push(format!("--expect={binding}"));
            args.push(format!("--header={binding}: copy key"));
        }
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            args.push(format!("--query={query}"));
        }
        args.extend(self.config.extra_args.iter().cloned());
        args
    }

    /// Turn fzf's stdout into a pick, honoring the `--expect` key line
    pub fn parse_output(&self, stdout: &str) -> Pick {
        let Some(binding) = self.config.copy_key_binding.as_deref() else {
            return Pick::Line(stdout.trim().to_string());
        };

        let (pressed, line) = stdout.split_once('\n').unwrap_or((stdout, ""));
        let line = line.trim().to_string();
        if pressed.trim() == binding {
            Pick::CopyKey(line)
        } else {
            Pick::Line(line)
        }
    }
}

impl ListSelector for FzfSelector {
    fn select(&mut self, lines: &[String], query: Option<&str>) -> Result<Interaction<Pick>> {
        let mut child = Command::new("fzf")
            .args(self.args(query))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .context("Failed to start fzf")?;

        if let Some(mut stdin) = child.stdin.take() {
            let mut input = lines.join("\n");
            input.push('\n');
            // fzf may exit before reading everything (e.g. immediate abort)
            if let Err(e) = stdin.write_all(input.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e).context("Failed to write to fzf");
                }
            }
        }

        let output = child
            .wait_with_output()
            .context("Failed reading fzf output")?;

        match output.status.code() {
            Some(0) => Ok(Interaction::Done(
                self.parse_output(&String::from_utf8_lossy(&output.stdout)),
            )),
            Some(EXIT_NO_MATCH) => Ok(Interaction::Done(Pick::Line(String::new()))),
            Some(EXIT_INTERRUPTED) => Ok(Interaction::Cancelled),
            _ => anyhow::bail!("fzf command failed: {}", output.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn without_copy_key() -> FinderConfig {
        FinderConfig {
            copy_key_binding: None,
            ..Default::default()
        }
    }

    #[test]
    fn args_follow_config() {
        let selector = FzfSelector::new(FinderConfig::default());
        assert_eq!(
            selector.args(None),
            vec![
                "--prompt",
                "Search bookmark > ",
                "--layout",
                "reverse",
                "--height=70%",
                "--expect=ctrl-y",
                "--header=ctrl-y: copy key",
            ]
        );
    }

    #[test]
    fn query_and_extra_args_are_appended() {
        let selector = FzfSelector::new(FinderConfig {
            extra_args: vec!["--exact".to_string()],
            ..without_copy_key()
        });
        let args = selector.args(Some("rust docs"));
        assert_eq!(&args[5..], &["--query=rust docs", "--exact"]);
    }

    #[test]
    fn empty_query_is_omitted() {
        let selector = FzfSelector::new(without_copy_key());
        assert_eq!(selector.args(Some("")).len(), 5);
    }

    #[test]
    fn copy_key_binding_follows_config() {
        let selector = FzfSelector::new(FinderConfig {
            copy_key_binding: Some("alt-c".to_string()),
            ..Default::default()
        });
        let args = selector.args(None);
        assert!(args.contains(&"--expect=alt-c".to_string()));
        assert!(!args.iter().any(|a| a.contains("ctrl-y")));

        let disabled = FzfSelector::new(without_copy_key());
        assert!(!disabled.args(None).iter().any(|a| a.starts_with("--expect")));
    }

    #[test]
    fn output_after_enter_is_a_plain_pick() {
        let selector = FzfSelector::new(FinderConfig::default());
        assert_eq!(
            selector.parse_output("\nrust => https://doc.rust-lang.org\n"),
            Pick::Line("rust => https://doc.rust-lang.org".to_string())
        );
    }

    #[test]
    fn output_after_copy_key_asks_for_the_key() {
        let selector = FzfSelector::new(FinderConfig::default());
        assert_eq!(
            selector.parse_output("ctrl-y\nssh => ssh -J bastion host\n"),
            Pick::CopyKey("ssh => ssh -J bastion host".to_string())
        );
    }

    #[test]
    fn output_without_copy_key_is_the_whole_line() {
        let selector = FzfSelector::new(without_copy_key());
        assert_eq!(
            selector.parse_output("ctrl-y => literal text\n"),
            Pick::Line("ctrl-y => literal text".to_string())
        );
    }
}
