//! Error taxonomy for the bookmark store and selection handling.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem failure while touching the store
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The store file exists but is not valid bookmark YAML
    #[error("failed to parse bookmarks from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize bookmarks: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// A selection line did not contain exactly one separator
    #[error("invalid selection format: {0}")]
    Decode(String),

    /// Empty key or link after interactive capture
    #[error("{0}")]
    Validation(&'static str),

    #[error("unsupported action \"{0}\"")]
    UnsupportedAction(String),

    #[error("could not determine a configuration directory (no config or home directory)")]
    NoConfigDir,
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
