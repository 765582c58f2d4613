//! Configuration management for bookmarkit.
//!
//! Settings live in an optional JSON file next to the store. Every section
//! falls back to its defaults, so an absent file and `{}` behave the same.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

pub mod paths;

pub use paths::{default_store_path, resolve_store_path};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Store location used when `--file` is not given
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Colors for the terminal form and picker
    #[serde(default)]
    pub form: FormStyle,

    /// fzf invocation settings
    #[serde(default)]
    pub finder: FinderConfig,

    /// Desktop notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl Config {
    /// Load configuration from the default location, or return defaults if not found
    pub fn load() -> Result<Self> {
        let path = paths::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from `path`, or return defaults if the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Resolve the store path: explicit override, then config, then platform default
    pub fn store_path(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = cli_override.or_else(|| self.store_path.clone()) {
            return Ok(path);
        }
        Ok(default_store_path()?)
    }
}

/// Colors used by the in-terminal form and picker.
///
/// Values are ratatui color names (`"white"`, `"darkgray"`, `"#ff8800"`,
/// `"reset"`...). Unknown names render with the terminal default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormStyle {
    pub border: String,
    pub title: String,
    pub text: String,
    pub field_fg: String,
    pub field_bg: String,
    pub accent: String,
}

impl Default for FormStyle {
    fn default() -> Self {
        Self {
            border: "white".to_string(),
            title: "white".to_string(),
            text: "white".to_string(),
            field_fg: "white".to_string(),
            field_bg: "black".to_string(),
            accent: "cyan".to_string(),
        }
    }
}

impl FormStyle {
    pub fn border_color(&self) -> Color {
        parse_color(&self.border)
    }

    pub fn title_color(&self) -> Color {
        parse_color(&self.title)
    }

    pub fn text_color(&self) -> Color {
        parse_color(&self.text)
    }

    pub fn field_fg_color(&self) -> Color {
        parse_color(&self.field_fg)
    }

    pub fn field_bg_color(&self) -> Color {
        parse_color(&self.field_bg)
    }

    pub fn accent_color(&self) -> Color {
        parse_color(&self.accent)
    }
}

fn parse_color(name: &str) -> Color {
    name.parse().unwrap_or(Color::Reset)
}

/// fzf settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub prompt: String,
    pub height: String,
    pub layout: String,
    /// Key that copies the highlighted bookmark's key instead of acting on
    /// its link; `null` disables it
    pub copy_key_binding: Option<String>,
    /// Appended verbatim to the fzf command line
    pub extra_args: Vec<String>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            prompt: "Search bookmark > ".to_string(),
            height: "70%".to_string(),
            layout: "reverse".to_string(),
            copy_key_binding: Some("ctrl-y".to_string()),
            extra_args: Vec::new(),
        }
    }
}

/// Desktop notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub app_name: String,
    pub icon: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            app_name: "BookMarkIt".to_string(),
            icon: "dialog-information".to_string(),
        }
    }
}
