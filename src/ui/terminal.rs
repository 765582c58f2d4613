//! Raw-mode terminal session for the in-process form and picker.

use std::io::{self, IsTerminal, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    event::{read, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

/// Alternate-screen terminal that restores itself when dropped
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        if !io::stdin().is_terminal() {
            anyhow::bail!("bookmarkit needs an interactive terminal for this prompt");
        }

        enable_raw_mode().context("Failed to enable raw mode - are you in a terminal?")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to setup terminal");
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                Err(e).context("Failed to create terminal")
            }
        }
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render).context("Failed to draw")?;
        Ok(())
    }

    /// Block until the next key press (repeats and releases are skipped)
    pub fn next_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(key) = read().context("Failed to read terminal event")? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Always try to restore even on error
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
