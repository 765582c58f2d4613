//! Desktop integration: notifications, clipboard and URL launching.
//!
//! Each capability sits behind a small trait so the workflows in
//! [`crate::commands`] can run against fakes in tests.

use anyhow::Result;

pub mod clipboard;
pub mod notify;
pub mod open;

pub use clipboard::SystemClipboard;
pub use notify::DesktopNotifier;
pub use open::SystemOpener;

/// User-visible, best-effort message sink
pub trait Notifier {
    /// Deliver `message`. Delivery failures are logged, never returned.
    fn notify(&self, message: &str);
}

/// Text clipboard access
pub trait Clipboard {
    fn read(&mut self) -> Result<String>;
    fn write(&mut self, text: &str) -> Result<()>;
}

/// Launches a URL in the user's browser without waiting for it
pub trait UrlOpener {
    fn open(&self, url: &str) -> Result<()>;
}

/// Check if an executable is reachable through `PATH`
pub fn command_available(name: &str) -> bool {
    which::which(name).is_ok()
}
