//! # ComposeBox Component
//!
//! Multi-line editor for the draft of a new board entry.
//!
//! ## Responsibilities
//!
//! - Capture text input (chars, paste, Ctrl+J newlines)
//! - Handle editing (backspace, delete, cursor movement across lines)
//! - Handle submission (Enter)
//! - Display the submit error inline when a post was refused
//!
//! ## State Management
//!
//! The buffer mirrors the reducer-owned draft: every edit emits
//! [`ComposeEvent::Changed`] so the parent can dispatch a draft update, and
//! the parent pushes the draft back via [`ComposeBox::set_text`] when the
//! reducer clears it after an accepted post. Submission does NOT clear the
//! buffer, so a rejected post keeps the draft intact for another try.
//! The error and posting flags are props from the application state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Tallest the editor grows before clipping.
const MAX_VISIBLE_LINES: u16 = 8;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// High-level events emitted by the ComposeBox
#[derive(Debug, Clone, PartialEq)]
pub enum ComposeEvent {
    /// User submitted the draft (Enter pressed). Carries the buffer as-is.
    Submit(String),
    /// Buffer content or cursor changed.
    Changed,
}

/// Multi-line draft editor with inline submit-error display.
///
/// # Props
///
/// - `error`: submit error from the application state, shown in the bottom border
/// - `posting`: true while a create call is in flight (dims the box)
///
/// # State
///
/// - `buffer`: current draft text
/// - `cursor`: byte offset into `buffer`
pub struct ComposeBox {
    buffer: String,
    pub error: Option<String>,
    pub posting: bool,
    cursor: usize,
}

impl Default for ComposeBox {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposeBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            error: None,
            posting: false,
            cursor: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer (reducer-owned draft changed underneath us).
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    /// Height for the current buffer, clamped to the visible-line cap.
    pub fn calculate_height(&self) -> u16 {
        let lines = self.buffer.split('\n').count() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Byte range of the line containing `pos`.
    fn line_bounds(&self, pos: usize) -> (usize, usize) {
        let start = self.buffer[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let end = self.buffer[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.buffer.len());
        (start, end)
    }

    /// Move the cursor to the adjacent line, keeping the character column.
    /// Returns false if there is no line in that direction.
    fn move_vertically(&mut self, delta: i32) -> bool {
        let (start, end) = self.line_bounds(self.cursor);
        let col = self.buffer[start..self.cursor].chars().count();

        let (target_start, target_end) = if delta < 0 {
            if start == 0 {
                return false;
            }
            self.line_bounds(start - 1)
        } else {
            if end == self.buffer.len() {
                return false;
            }
            self.line_bounds(end + 1)
        };

        let target_line = &self.buffer[target_start..target_end];
        let byte_col: usize = target_line
            .chars()
            .take(col)
            .map(|c| c.len_utf8())
            .sum();
        self.cursor = target_start + byte_col;
        true
    }

    /// Terminal cell for the cursor, relative to the rendered area.
    fn screen_cursor(&self, area: Rect) -> (u16, u16) {
        let (start, _) = self.line_bounds(self.cursor);
        let line = self.buffer[..self.cursor].matches('\n').count() as u16;
        let col = self.buffer[start..self.cursor].width() as u16;

        let x = (area.x + 1 + col).min(area.x + area.width.saturating_sub(2));
        let y = (area.y + 1 + line).min(area.y + area.height.saturating_sub(2));
        (x, y)
    }

    fn bottom_line(&self) -> Line<'_> {
        match &self.error {
            Some(error) => Line::from(Span::styled(
                format!(" {} ", error),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(Span::styled(
                " Enter: post · Ctrl+J: newline · Esc: browse ",
                Style::default().fg(Color::DarkGray),
            )),
        }
    }
}

impl Component for ComposeBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.posting {
            Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Green)
        };

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title(" New message ")
            .title_bottom(self.bottom_line());

        let input = Paragraph::new(self.buffer.as_str()).block(block).style(style);
        frame.render_widget(input, area);

        let (cursor_x, cursor_y) = self.screen_cursor(area);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(s.len())
}

impl EventHandler for ComposeBox {
    type Event = ComposeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(ComposeEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(ComposeEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(ComposeEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(ComposeEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                    Some(ComposeEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                    Some(ComposeEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => {
                let (start, _) = self.line_bounds(self.cursor);
                (self.cursor != start).then(|| {
                    self.cursor = start;
                    ComposeEvent::Changed
                })
            }
            TuiEvent::CursorEnd => {
                let (_, end) = self.line_bounds(self.cursor);
                (self.cursor != end).then(|| {
                    self.cursor = end;
                    ComposeEvent::Changed
                })
            }
            TuiEvent::CursorUp => self.move_vertically(-1).then_some(ComposeEvent::Changed),
            TuiEvent::CursorDown => self.move_vertically(1).then_some(ComposeEvent::Changed),
            TuiEvent::Submit => Some(ComposeEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
