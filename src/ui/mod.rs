//! Interactive collaborators: capturing a new bookmark and picking one.
//!
//! External tools (`yad`, `fzf`) are used when installed; otherwise the
//! ratatui form and picker in this module take over in the terminal.

use anyhow::Result;

use crate::config::Config;
use crate::system::command_available;

pub mod form;
pub mod fzf;
pub mod input;
pub mod picker;
pub mod terminal;
pub mod yad;

pub use form::TerminalForm;
pub use fzf::FzfSelector;
pub use picker::TerminalPicker;
pub use yad::YadPrompt;

/// Outcome of an interactive step: a value, or the user backed out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction<T> {
    Done(T),
    Cancelled,
}

/// What the user did with a selection line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    /// Act on the line's link. Empty when nothing was picked.
    Line(String),
    /// Copy only the line's key
    CopyKey(String),
}

/// Asks the user for a key and a link, with the link prefilled from `seed`
pub trait KeyLinkPrompt {
    fn prompt(&mut self, seed: &str) -> Result<Interaction<(String, String)>>;
}

/// Lets the user pick one of `lines`
pub trait ListSelector {
    fn select(&mut self, lines: &[String], query: Option<&str>) -> Result<Interaction<Pick>>;
}

/// `yad` dialog when available, terminal form otherwise
pub fn key_link_prompt(config: &Config) -> Box<dyn KeyLinkPrompt> {
    if command_available("yad") {
        Box::new(YadPrompt)
    } else {
        log::debug!("yad not found, using terminal form");
        Box::new(TerminalForm::new(config.form.clone()))
    }
}

/// `fzf` when available, terminal picker otherwise
pub fn list_selector(config: &Config) -> Box<dyn ListSelector> {
    if command_available("fzf") {
        Box::new(FzfSelector::new(config.finder.clone()))
    } else {
        log::debug!("fzf not found, using terminal picker");
        Box::new(TerminalPicker::new(config.form.clone()))
    }
}
