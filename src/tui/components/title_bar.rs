//! # TitleBar Component
//!
//! Top status bar showing the board host and transient status text.
//!
//! TitleBar is purely presentational — it receives all data as props and has
//! no internal state. `board_host` comes from core App state (configuration),
//! `status_message` from whatever the reducer last reported ("Posting…",
//! "12 messages", ...).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

/// Top status bar component.
///
/// # Props
///
/// - `board_host`: board the client is pointed at (base URL without scheme)
/// - `status_message`: transient status from the reducer
pub struct TitleBar {
    pub board_host: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(board_host: String, status_message: String) -> Self {
        Self {
            board_host,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.status_message.is_empty() {
            format!("Corkboard ({})", self.board_host)
        } else {
            format!("Corkboard ({}) | {}", self.board_host, self.status_message)
        };
        frame.render_widget(Span::raw(title_text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn shows_host_and_status() {
        let mut bar = TitleBar::new("board.test".to_string(), "3 messages".to_string());
        let text = render_to_text(&mut bar);
        assert!(text.contains("Corkboard (board.test) | 3 messages"));
    }

    #[test]
    fn omits_separator_without_status() {
        let mut bar = TitleBar::new("board.test".to_string(), String::new());
        let text = render_to_text(&mut bar);
        assert!(text.contains("Corkboard (board.test)"));
        assert!(!text.contains('|'));
    }
}
