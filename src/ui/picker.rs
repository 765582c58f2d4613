//! In-terminal fuzzy picker, used when `fzf` is not installed.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::input::TextInput;
use super::terminal::TerminalSession;
use super::{Interaction, ListSelector, Pick};
use crate::config::FormStyle;

/// Result of handling a key event
#[derive(Debug, PartialEq, Eq)]
pub enum PickerKeyResult {
    Continue,
    /// Chosen line; empty when nothing matched the query
    Selected(String),
    /// Copy the key of this line
    CopyKey(String),
    Cancel,
}

/// Match `query` against `candidate` the way fzf's default mode does:
/// every whitespace-separated term must appear as an in-order subsequence,
/// ignoring case.
pub fn fuzzy_match(query: &str, candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    query.split_whitespace().all(|term| {
        let mut haystack = candidate.chars();
        term.to_lowercase()
            .chars()
            .all(|needle| haystack.any(|c| c == needle))
    })
}

pub struct PickerState {
    pub query: TextInput,
    pub lines: Vec<String>,
    pub filtered_indices: Vec<usize>,
    pub selected: usize,
    pub list_state: ListState,
}

impl PickerState {
    pub fn new(lines: Vec<String>, query: Option<&str>) -> Self {
        let mut state = Self {
            query: TextInput::new(query.unwrap_or_default()),
            lines,
            filtered_indices: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
        };
        state.refilter();
        state
    }

    /// Re-filter the list based on the current query.
    pub fn refilter(&mut self) {
        let query = self.query.value();
        self.filtered_indices = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| fuzzy_match(query, line))
            .map(|(i, _)| i)
            .collect();

        // Clamp selection
        if self.filtered_indices.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(self.filtered_indices.len() - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Line under the cursor, if any line matches
    pub fn current(&self) -> Option<&str> {
        self.filtered_indices
            .get(self.selected)
            .map(|&i| self.lines[i].as_str())
    }

    fn move_selection(&mut self, down: bool) {
        if self.filtered_indices.is_empty() {
            return;
        }
        self.selected = if down {
            (self.selected + 1).min(self.filtered_indices.len() - 1)
        } else {
            self.selected.saturating_sub(1)
        };
        self.list_state.select(Some(self.selected));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerKeyResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => PickerKeyResult::Cancel,
            KeyCode::Char('c') if ctrl => PickerKeyResult::Cancel,
            KeyCode::Down => {
                self.move_selection(true);
                PickerKeyResult::Continue
            }
            KeyCode::Char('j' | 'n') if ctrl => {
                self.move_selection(true);
                PickerKeyResult::Continue
            }
            KeyCode::Up => {
                self.move_selection(false);
                PickerKeyResult::Continue
            }
            KeyCode::Char('k' | 'p') if ctrl => {
                self.move_selection(false);
                PickerKeyResult::Continue
            }
            KeyCode::Char('y') if ctrl => match self.current() {
                Some(line) => PickerKeyResult::CopyKey(line.to_string()),
                None => PickerKeyResult::Continue,
            },
            KeyCode::Enter => {
                PickerKeyResult::Selected(self.current().unwrap_or_default().to_string())
            }
            _ => {
                if self.query.handle_key(key) {
                    self.refilter();
                }
                PickerKeyResult::Continue
            }
        }
    }
}

/// Widget for rendering the picker
pub struct PickerModal<'a> {
    state: &'a mut PickerState,
    style: &'a FormStyle,
}

impl<'a> PickerModal<'a> {
    pub fn new(state: &'a mut PickerState, style: &'a FormStyle) -> Self {
        Self { state, style }
    }

    /// Calculate the modal area (bottom 70% of the screen, full width)
    pub fn calculate_area(total: Rect) -> Rect {
        let height = ((u32::from(total.height) * 70 / 100) as u16)
            .max(8)
            .min(total.height);
        Rect::new(0, total.height - height, total.width, height)
    }
}

impl Widget for PickerModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 6 {
            return;
        }

        Clear.render(area, buf);

        let block = Block::default()
            .title(Span::styled(
                " Bookmarks ",
                Style::default().fg(self.style.title_color()),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.style.border_color()));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Query
            Constraint::Length(1), // Match count
            Constraint::Min(1),    // List
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

        let accent = Style::default().fg(self.style.accent_color());
        let text = Style::default().fg(self.style.text_color());

        // Query line: prompt plus input
        let prompt = "> ";
        let mut query_spans = vec![Span::styled(prompt, accent)];
        let input_width = (chunks[0].width as usize).saturating_sub(prompt.len());
        query_spans.extend(self.state.query.line(input_width, text, true).spans);
        Paragraph::new(Line::from(query_spans)).render(chunks[0], buf);

        let count = format!(
            "  {}/{}",
            self.state.filtered_indices.len(),
            self.state.lines.len()
        );
        Paragraph::new(Line::from(Span::styled(
            count,
            Style::default().fg(self.style.border_color()),
        )))
        .render(chunks[1], buf);

        let items: Vec<ListItem> = self
            .state
            .filtered_indices
            .iter()
            .map(|&i| ListItem::new(Line::from(Span::styled(self.state.lines[i].clone(), text))))
            .collect();
        let list = List::new(items)
            .highlight_style(accent.add_modifier(Modifier::BOLD | Modifier::REVERSED))
            .highlight_symbol("> ");
        StatefulWidget::render(list, chunks[2], buf, &mut self.state.list_state);

        let help_text = vec![
            Span::styled(" ↑/↓ ", accent),
            Span::raw("move "),
            Span::styled(" Enter ", accent),
            Span::raw("select "),
            Span::styled(" ^Y ", accent),
            Span::raw("copy key "),
            Span::styled(" Esc ", accent),
            Span::raw("cancel"),
        ];
        Paragraph::new(Line::from(help_text))
            .style(text)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}

/// List selector drawn in the current terminal
pub struct TerminalPicker {
    style: FormStyle,
}

impl TerminalPicker {
    pub fn new(style: FormStyle) -> Self {
        Self { style }
    }
}

impl ListSelector for TerminalPicker {
    fn select(&mut self, lines: &[String], query: Option<&str>) -> Result<Interaction<Pick>> {
        let mut state = PickerState::new(lines.to_vec(), query);
        let mut session = TerminalSession::enter()?;

        loop {
            session.draw(|f| {
                let area = PickerModal::calculate_area(f.area());
                f.render_widget(PickerModal::new(&mut state, &self.style), area);
            })?;

            match state.handle_key(session.next_key()?) {
                PickerKeyResult::Continue => {}
                PickerKeyResult::Selected(line) => return Ok(Interaction::Done(Pick::Line(line))),
                PickerKeyResult::CopyKey(line) => {
                    return Ok(Interaction::Done(Pick::CopyKey(line)))
                }
                PickerKeyResult::Cancel => return Ok(Interaction::Cancelled),
            }
        }
    }
}
