//! In-terminal form for entering a new bookmark, used when `yad` is missing.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::input::TextInput;
use super::terminal::TerminalSession;
use super::{Interaction, KeyLinkPrompt};
use crate::config::FormStyle;

/// Which input has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Key,
    Link,
}

/// Result of handling a key event
#[derive(Debug, PartialEq, Eq)]
pub enum FormKeyResult {
    Continue,
    Submit { key: String, link: String },
    Cancel,
}

/// State for the add-bookmark form
pub struct FormState {
    pub key: TextInput,
    pub link: TextInput,
    pub focus: FormField,
    /// Error message to display (e.g., empty field on submit)
    pub error_message: Option<String>,
}

impl FormState {
    /// Create a form with the link prefilled from `seed`
    pub fn new(seed: &str) -> Self {
        Self {
            key: TextInput::default(),
            link: TextInput::new(seed),
            focus: FormField::Key,
            error_message: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormKeyResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => FormKeyResult::Cancel,
            KeyCode::Char('c') if ctrl => FormKeyResult::Cancel,
            KeyCode::Char('s') if ctrl => self.try_submit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    FormField::Key => FormField::Link,
                    FormField::Link => FormField::Key,
                };
                FormKeyResult::Continue
            }
            KeyCode::Enter => match self.focus {
                FormField::Key => {
                    self.focus = FormField::Link;
                    FormKeyResult::Continue
                }
                FormField::Link => self.try_submit(),
            },
            _ => {
                let input = match self.focus {
                    FormField::Key => &mut self.key,
                    FormField::Link => &mut self.link,
                };
                if input.handle_key(key) {
                    self.error_message = None;
                }
                FormKeyResult::Continue
            }
        }
    }

    fn try_submit(&mut self) -> FormKeyResult {
        let key = self.key.value().trim();
        let link = self.link.value().trim();

        if key.is_empty() {
            self.error_message = Some("Key cannot be empty".to_string());
            self.focus = FormField::Key;
            return FormKeyResult::Continue;
        }
        if link.is_empty() {
            self.error_message = Some("Bookmark cannot be empty".to_string());
            self.focus = FormField::Link;
            return FormKeyResult::Continue;
        }
        // Selection lines are one per bookmark
        if link.contains(['\n', '\r']) {
            self.error_message = Some("Bookmark must be a single line".to_string());
            self.focus = FormField::Link;
            return FormKeyResult::Continue;
        }

        FormKeyResult::Submit {
            key: key.to_string(),
            link: link.to_string(),
        }
    }
}

/// Widget for rendering the add-bookmark form
pub struct FormModal<'a> {
    state: &'a FormState,
    style: &'a FormStyle,
}

impl<'a> FormModal<'a> {
    pub fn new(state: &'a FormState, style: &'a FormStyle) -> Self {
        Self { state, style }
    }

    /// Calculate the modal area (centered, 60% width, fixed height)
    pub fn calculate_area(total: Rect) -> Rect {
        let width = ((u32::from(total.width) * 60 / 100) as u16)
            .max(40)
            .min(total.width.saturating_sub(2));
        let height = 12u16.min(total.height);

        let x = (total.width.saturating_sub(width)) / 2;
        let y = (total.height.saturating_sub(height)) / 2;

        Rect::new(x, y, width, height)
    }

    fn render_field(&self, field: FormField, area: Rect, buf: &mut Buffer) {
        let (title, input) = match field {
            FormField::Key => (" Key ", &self.state.key),
            FormField::Link => (" Bookmark ", &self.state.link),
        };
        let focused = self.state.focus == field;

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                self.style.accent_color()
            } else {
                self.style.border_color()
            }));
        let inner = block.inner(area);
        block.render(area, buf);

        let text_style = Style::default()
            .fg(self.style.field_fg_color())
            .bg(self.style.field_bg_color());
        Paragraph::new(input.line(inner.width as usize, text_style, focused))
            .style(text_style)
            .render(inner, buf);
    }
}

impl Widget for FormModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 10 {
            return;
        }

        Clear.render(area, buf);

        let block = Block::default()
            .title(Span::styled(
                " Add New Bookmark ",
                Style::default().fg(self.style.title_color()),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.style.border_color()));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Key
            Constraint::Length(3), // Bookmark
            Constraint::Length(1), // Error message
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

        self.render_field(FormField::Key, chunks[0], buf);
        self.render_field(FormField::Link, chunks[1], buf);

        if let Some(ref error) = self.state.error_message {
            Paragraph::new(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )))
            .render(chunks[2], buf);
        }

        let accent = Style::default().fg(self.style.accent_color());
        let help_text = vec![
            Span::styled(" Tab ", accent),
            Span::raw("switch "),
            Span::styled(" Enter ", accent),
            Span::raw("save "),
            Span::styled(" Esc ", accent),
            Span::raw("cancel"),
        ];
        Paragraph::new(Line::from(help_text))
            .style(Style::default().fg(self.style.text_color()))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}

/// Key/link prompt drawn in the current terminal
pub struct TerminalForm {
    style: FormStyle,
}

impl TerminalForm {
    pub fn new(style: FormStyle) -> Self {
        Self { style }
    }
}

impl KeyLinkPrompt for TerminalForm {
    fn prompt(&mut self, seed: &str) -> Result<Interaction<(String, String)>> {
        let mut state = FormState::new(seed);
        let mut session = TerminalSession::enter()?;

        loop {
            session.draw(|f| {
                let area = FormModal::calculate_area(f.area());
                f.render_widget(FormModal::new(&state, &self.style), area);
            })?;

            match state.handle_key(session.next_key()?) {
                FormKeyResult::Continue => {}
                FormKeyResult::Submit { key, link } => {
                    return Ok(Interaction::Done((key, link)));
                }
                FormKeyResult::Cancel => return Ok(Interaction::Cancelled),
            }
        }
    }
}
