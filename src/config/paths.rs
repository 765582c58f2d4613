//! Default locations for the store and settings files.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Directory name under the user's configuration directory
pub const APP_DIR: &str = "bookmarkit";
/// Store file name
pub const STORE_FILE: &str = "bookmarks.yml";
/// Settings file name
pub const CONFIG_FILE: &str = "config.json";

/// Per-user configuration directory, falling back to `~/.config`
pub fn config_dir() -> Result<PathBuf> {
    resolve_config_dir(dirs::config_dir(), dirs::home_dir())
}

/// Default path of the bookmarks file: `<config-dir>/bookmarkit/bookmarks.yml`
pub fn default_store_path() -> Result<PathBuf> {
    resolve_store_path(dirs::config_dir(), dirs::home_dir())
}

/// Path of the optional settings file: `<config-dir>/bookmarkit/config.json`
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(APP_DIR).join(CONFIG_FILE))
}

/// Pick the configuration directory from the platform lookup results.
pub fn resolve_config_dir(
    config_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    config_dir
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .ok_or(Error::NoConfigDir)
}

/// Build the store path from the platform lookup results.
pub fn resolve_store_path(
    config_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    Ok(resolve_config_dir(config_dir, home_dir)?
        .join(APP_DIR)
        .join(STORE_FILE))
}
