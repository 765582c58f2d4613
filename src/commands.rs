//! The `add` and `find` workflows.
//!
//! Both run once per invocation: load the store, talk to the user through the
//! collaborators, and (for `add`) save at most once.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::action::{self, LinkAction};
use crate::bookmarks::{normalize_key, Store};
use crate::error::Error;
use crate::selection;
use crate::system::{Clipboard, Notifier, UrlOpener};
use crate::ui::{Interaction, KeyLinkPrompt, ListSelector, Pick};

/// Top-level command selected with `--action`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Find,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "add" => Ok(Command::Add),
            "find" => Ok(Command::Find),
            other => Err(Error::UnsupportedAction(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Add => write!(f, "add"),
            Command::Find => write!(f, "find"),
        }
    }
}

/// What a workflow ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new bookmark was stored under this key
    Added { key: String },
    /// The link was already in the store; nothing written
    AlreadyBookmarked,
    Opened(String),
    Copied(String),
    /// The user backed out of a prompt
    Cancelled,
    /// The selector returned no line
    NothingSelected,
}

/// Everything a workflow talks to besides the store file
pub struct Collaborators {
    pub notifier: Box<dyn Notifier>,
    pub clipboard: Box<dyn Clipboard>,
    pub opener: Box<dyn UrlOpener>,
    pub prompt: Box<dyn KeyLinkPrompt>,
    pub selector: Box<dyn ListSelector>,
}

/// One invocation against one store file
pub struct Session {
    store_path: PathBuf,
    collaborators: Collaborators,
}

impl Session {
    pub fn new(store_path: PathBuf, collaborators: Collaborators) -> Self {
        Self {
            store_path,
            collaborators,
        }
    }

    fn notifier(&self) -> &dyn Notifier {
        self.collaborators.notifier.as_ref()
    }

    /// Run `command`. `query` only applies to `find`.
    pub fn run(&mut self, command: Command, query: Option<&str>) -> Result<Outcome> {
        let query = query.filter(|q| !q.is_empty());
        match command {
            Command::Add => {
                if query.is_some() {
                    log::warn!("--query is ignored by the add command");
                    self.notifier()
                        .notify("[!] You don't need the query flag with the 'add' command");
                }
                self.add()
            }
            Command::Find => self.find(query),
        }
    }

    /// Capture a key and link from the user and append them unless the link
    /// is already stored.
    pub fn add(&mut self) -> Result<Outcome> {
        let seed = match self.collaborators.clipboard.read() {
            Ok(text) => text,
            Err(e) => {
                log::warn!("clipboard read failed: {e:#}");
                self.notifier()
                    .notify(&format!("Could not get clipboard content: {e:#}"));
                String::new()
            }
        };

        let (key, link) = match self
            .collaborators
            .prompt
            .prompt(&seed)
            .context("Failed to get bookmark input")?
        {
            Interaction::Done(values) => values,
            Interaction::Cancelled => {
                log::debug!("add cancelled by user");
                return Ok(Outcome::Cancelled);
            }
        };

        let key = key.trim();
        let link = link.trim();
        if key.is_empty() {
            return Err(Error::Validation("key is empty").into());
        }
        if link.is_empty() {
            return Err(Error::Validation("bookmark is empty").into());
        }
        if link.contains(['\n', '\r']) {
            return Err(Error::Validation("bookmark must be a single line").into());
        }
        let key = normalize_key(key);

        let mut store = Store::load(&self.store_path).context("Failed to load bookmarks")?;

        if store.has_link(link) {
            self.notifier().notify("This URL was already bookmarked");
            return Ok(Outcome::AlreadyBookmarked);
        }

        store.add(key.clone(), link);
        store.save(&self.store_path).context("Failed to save bookmarks")?;

        self.notifier().notify(&format!("'{key}' stored in Bookmark"));
        Ok(Outcome::Added { key })
    }

    /// Let the user pick a bookmark and act on it, or copy its key
    pub fn find(&mut self, query: Option<&str>) -> Result<Outcome> {
        let store = Store::load(&self.store_path).context("Failed to load bookmarks")?;
        let lines = selection::encode_all(&store);

        let pick = match self
            .collaborators
            .selector
            .select(&lines, query)
            .context("Failed to get selection")?
        {
            Interaction::Done(pick) => pick,
            Interaction::Cancelled => {
                log::debug!("find cancelled by user");
                return Ok(Outcome::Cancelled);
            }
        };

        let (chosen, copy_key) = match pick {
            Pick::Line(line) => (line, false),
            Pick::CopyKey(line) => (line, true),
        };
        if chosen.trim().is_empty() {
            return Ok(Outcome::NothingSelected);
        }

        let (key, link) = selection::decode(&chosen)?;
        if copy_key {
            return self.copy(key);
        }

        match action::resolve(link) {
            LinkAction::OpenUrl => {
                self.collaborators
                    .opener
                    .open(link)
                    .context("Failed to open URL")?;
                self.notifier().notify(&format!("Opened URL: '{link}'"));
                Ok(Outcome::Opened(link.to_string()))
            }
            LinkAction::CopyToClipboard => self.copy(link),
        }
    }

    fn copy(&mut self, text: &str) -> Result<Outcome> {
        self.collaborators
            .clipboard
            .write(text)
            .context("Failed to copy to clipboard")?;
        self.notifier().notify(&format!("Copied to clipboard: '{text}'"));
        Ok(Outcome::Copied(text.to_string()))
    }
}
