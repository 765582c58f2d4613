use std::process::Command;

use super::{command_available, Notifier};
use crate::config::NotificationConfig;

/// Sends messages through `notify-send`, or prints them when it is missing
pub struct DesktopNotifier {
    config: NotificationConfig,
    use_notify_send: bool,
}

impl DesktopNotifier {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            use_notify_send: command_available("notify-send"),
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        if !self.use_notify_send {
            println!("{message}");
            return;
        }

        let status = Command::new("notify-send")
            .args([
                "--app-name",
                self.config.app_name.as_str(),
                "-i",
                self.config.icon.as_str(),
                message,
            ])
            .status();

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                log::warn!("notify-send exited with {status}");
                println!("{message}");
            }
            Err(e) => {
                log::warn!("failed to run notify-send: {e}");
                println!("{message}");
            }
        }
    }
}
