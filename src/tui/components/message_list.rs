//! # MessageList Component
//!
//! Scrollable view of the board, newest entry first (server order).
//!
//! ## Responsibilities
//!
//! - Display the fetched entries as `MessageCard`s
//! - Manage scrolling and keyboard selection
//! - Cache per-entry heights so selection can scroll itself into view
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice
//! (props). Since `Component::render` takes `&mut self`, the layout cache and
//! scroll state can be updated during the render pass, aligning with
//! Ratatui's `StatefulWidget` pattern.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageCard;
use crate::tui::event::TuiEvent;

/// Scroll and selection state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// Currently selected entry index (keyboard navigation in Cursor mode).
    pub selected: Option<usize>,
    /// Cached card heights from the last render pass.
    heights: Vec<u16>,
    /// Last known viewport height (for paging and scroll clamping).
    viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            selected: None,
            heights: Vec::new(),
            viewport_height: 0,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Move the selection up one entry (toward the newest message).
    /// With no selection, selects the top entry.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(idx) => idx.saturating_sub(1),
            None => 0,
        });
        self.scroll_to_selected();
    }

    /// Move the selection down one entry (toward the oldest message).
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(idx) => (idx + 1).min(len - 1),
            None => 0,
        });
        self.scroll_to_selected();
    }

    /// Drop the selection if the list shrank underneath it.
    pub fn clamp_selection(&mut self, len: usize) {
        if let Some(idx) = self.selected
            && idx >= len
        {
            self.selected = if len == 0 { None } else { Some(len - 1) };
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let current = self.scroll_state.offset();
        let y = current.y as i32 + delta;
        self.scroll_state.set_offset(Position {
            x: current.x,
            y: y.clamp(0, self.max_scroll() as i32) as u16,
        });
    }

    fn max_scroll(&self) -> u16 {
        let total: u16 = self.heights.iter().sum();
        total.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    /// Prevents overscrolling past the last entry after a delete.
    fn clamp_scroll(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected entry is fully visible.
    /// If the entry is taller than the viewport, align its top edge.
    fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected else {
            return;
        };
        if idx >= self.heights.len() {
            return;
        }

        let item_top: u16 = self.heights[..idx].iter().sum();
        let item_bottom = item_top + self.heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_by(-1),
            TuiEvent::ScrollDown => self.scroll_by(1),
            TuiEvent::ScrollPageUp => self.scroll_by(-(self.viewport_height.max(1) as i32)),
            TuiEvent::ScrollPageDown => self.scroll_by(self.viewport_height.max(1) as i32),
            _ => return None,
        }
        Some(())
    }
}

/// Scrollable board view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, messages: &'a [Message]) -> Self {
        Self { state, messages }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Measure every card at the current width.
        self.state.heights = self
            .messages
            .iter()
            .map(|m| MessageCard::calculate_height(m, content_width))
            .collect();
        self.state.viewport_height = area.height;
        self.state.clamp_selection(self.messages.len());
        self.state.clamp_scroll();

        let total_height: u16 = self.state.heights.iter().sum();

        // 2. Render all cards into a ScrollView canvas.
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height.max(1)))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (i, message) in self.messages.iter().enumerate() {
            let height = self.state.heights[i];
            let card_rect = Rect::new(0, y_offset, content_width, height);
            let is_selected = self.state.selected == Some(i);
            scroll_view.render_widget(MessageCard::new(message, is_selected), card_rect);
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_message;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_list(state: &mut MessageListState, messages: &[Message]) {
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                MessageList::new(state, messages).render(f, f.area());
            })
            .unwrap();
    }

    #[test]
    fn selection_moves_within_bounds() {
        let mut state = MessageListState::new();
        state.select_next(3);
        assert_eq!(state.selected, Some(0));
        state.select_next(3);
        state.select_next(3);
        state.select_next(3); // already at the bottom
        assert_eq!(state.selected, Some(2));
        state.select_prev(3);
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn selection_on_empty_list_stays_empty() {
        let mut state = MessageListState::new();
        state.select_next(0);
        assert_eq!(state.selected, None);
        state.select_prev(0);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn selection_clamps_after_delete() {
        let mut state = MessageListState::new();
        state.selected = Some(2);
        state.clamp_selection(2);
        assert_eq!(state.selected, Some(1));
        state.clamp_selection(0);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn render_caches_heights_for_each_entry() {
        let mut state = MessageListState::new();
        let messages: Vec<_> = (1..=3).map(sample_message).collect();
        render_list(&mut state, &messages);
        assert_eq!(state.heights.len(), 3);
        assert!(state.heights.iter().all(|&h| h >= 3));
    }

    #[test]
    fn scroll_offset_clamps_to_content() {
        let mut state = MessageListState::new();
        let messages: Vec<_> = (1..=2).map(sample_message).collect();
        state
            .scroll_state
            .set_offset(Position { x: 0, y: 500 });
        render_list(&mut state, &messages);
        // Two short cards fit a 12-row viewport: no scrolling possible.
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn scroll_events_move_the_offset() {
        let mut state = MessageListState::new();
        // 20 entries on a 12-row viewport leaves room to scroll.
        let messages: Vec<_> = (1..=20).map(sample_message).collect();
        render_list(&mut state, &messages);

        assert!(state.handle_event(&TuiEvent::ScrollDown).is_some());
        assert_eq!(state.scroll_state.offset().y, 1);
        assert!(state.handle_event(&TuiEvent::ScrollUp).is_some());
        assert_eq!(state.scroll_state.offset().y, 0);
        // Non-scroll events are not consumed.
        assert!(state.handle_event(&TuiEvent::Submit).is_none());
    }
}
