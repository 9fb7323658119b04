use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let compose_height = tui.compose_box.calculate_height();
    let layout = Layout::vertical([Length(1), Min(0), Length(compose_height)]);
    let [title_area, main_area, compose_area] = layout.areas(frame.area());

    TitleBar::new(app.board_host.clone(), app.status_message.clone()).render(frame, title_area);

    // A failed fetch shows a banner; an already-loaded list stays visible
    // below it.
    let list_area = if let Some(error) = &app.fetch_error {
        let [banner_area, rest] = Layout::vertical([Length(1), Min(0)]).areas(main_area);
        draw_fetch_error(frame, banner_area, error);
        rest
    } else {
        main_area
    };

    match &app.messages {
        Some(messages) if messages.is_empty() => draw_empty_board(frame, list_area),
        Some(messages) => {
            MessageList::new(&mut tui.message_list, messages).render(frame, list_area);
        }
        // Nothing fetched yet: the list area stays blank.
        None => {}
    }

    tui.compose_box.render(frame, compose_area);

    // Overlay goes last so it covers whatever is underneath.
    if app.is_posting {
        draw_posting_overlay(frame, spinner_frame);
    }
}

fn draw_fetch_error(frame: &mut Frame, area: Rect, error: &str) {
    let banner = Paragraph::new(format!("Something went wrong. {}", error))
        .style(Style::default().fg(Color::Red));
    frame.render_widget(banner, area);
}

fn draw_empty_board(frame: &mut Frame, area: Rect) {
    let empty = Paragraph::new("No messages yet.")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(empty, area);
}

fn draw_posting_overlay(frame: &mut Frame, spinner_frame: usize) {
    let area = centered_rect(frame.area(), 20, 3);
    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    let overlay = Paragraph::new(format!("{} Posting…", spinner))
        .block(Block::bordered())
        .alignment(Alignment::Center);
    frame.render_widget(Clear, area);
    frame.render_widget(overlay, area);
}

/// A `width` x `height` rect centered in `area`, clipped to it.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_message, test_app};
    use crate::tui::TuiState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, app, tui, 0);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_draw_ui_before_first_fetch() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Corkboard (board.test)"));
        // Nothing loaded yet: neither entries nor the empty indicator.
        assert!(!text.contains("No messages yet."));
    }

    #[test]
    fn test_empty_board_indicator_renders_after_load() {
        let mut app = test_app();
        app.messages = Some(vec![]);
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("No messages yet."));
    }

    #[test]
    fn test_loaded_messages_render_author_and_body() {
        let mut app = test_app();
        app.messages = Some(vec![sample_message(1), sample_message(2)]);
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("user1"));
        assert!(text.contains("message body 1"));
        assert!(text.contains("user2"));
        assert!(!text.contains("No messages yet."));
    }

    #[test]
    fn test_fetch_error_banner_renders() {
        let mut app = test_app();
        app.fetch_error = Some("network error: unreachable".to_string());
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Something went wrong. network error: unreachable"));
    }

    #[test]
    fn test_posting_overlay_renders() {
        let mut app = test_app();
        app.is_posting = true;
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("Posting"));
    }

    #[test]
    fn test_submit_error_renders_on_compose_box() {
        let mut app = test_app();
        app.post_error = Some("too short".to_string());
        let mut tui = TuiState::new();
        // The event loop syncs the prop each turn; mirror that here.
        tui.compose_box.error = app.post_error.clone();
        let text = render_to_text(&app, &mut tui);
        assert!(text.contains("too short"));
    }

    #[test]
    fn test_centered_rect_is_clipped_to_area() {
        let area = Rect::new(0, 0, 10, 2);
        let rect = centered_rect(area, 20, 3);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
