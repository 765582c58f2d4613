//! Single-line text input shared by the form and the picker.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// Editable line of text with a cursor measured in characters
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Create an input holding `initial`, cursor at the end
    pub fn new(initial: &str) -> Self {
        Self {
            value: initial.to_string(),
            cursor: initial.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of the `idx`-th character
    fn byte_index(&self, idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Apply an editing key. Returns true when the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                // Kill to start of line
                let at = self.byte_index(self.cursor);
                let changed = at > 0;
                self.value.replace_range(..at, "");
                self.cursor = 0;
                changed
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.len() {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.len());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.len();
                false
            }
            _ => false,
        }
    }

    /// Render the visible window of the text with a block cursor.
    ///
    /// `show_cursor` is false for inputs that do not have focus.
    pub fn line(&self, width: usize, style: Style, show_cursor: bool) -> Line<'static> {
        let chars: Vec<char> = self.value.chars().collect();
        let width = width.max(1);

        // Scroll so the cursor cell stays visible
        let start = (self.cursor + 1).saturating_sub(width);
        let end = (start + width).min(chars.len());

        let cursor_style = style
            .patch(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD));

        let mut spans: Vec<Span<'static>> = chars[start..end]
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if show_cursor && start + i == self.cursor {
                    Span::styled(c.to_string(), cursor_style)
                } else {
                    Span::styled(c.to_string(), style)
                }
            })
            .collect();

        if show_cursor && self.cursor >= chars.len() {
            spans.push(Span::styled(" ", cursor_style));
        }

        Line::from(spans)
    }
}
