use chrono::{DateTime, Local, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::api::Message;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single board entry.
///
/// `MessageCard` is a transient component: it's created fresh each frame with
/// the data it needs to render. It holds no mutable state — the `is_selected`
/// flag is passed in from the parent `MessageList`, which tracks selection
/// persistently.
///
/// The title row carries the author and the localized creation timestamp;
/// the body is wrapped inside the bordered block. The selected card gets a
/// cyan border and a delete hint in its bottom border.
#[derive(Clone)]
pub struct MessageCard<'a> {
    pub message: &'a Message,
    pub is_selected: bool,
}

impl<'a> MessageCard<'a> {
    pub fn new(message: &'a Message, is_selected: bool) -> Self {
        Self {
            message,
            is_selected,
        }
    }

    /// Calculate the height required for this entry given a width.
    ///
    /// Uses `textwrap` to predict the wrapped height *without* rendering.
    /// This lets the parent `MessageList` size its scroll canvas up front.
    /// The wrapping options must match the Ratatui `Paragraph` default so
    /// calculated and actual height stay in 1:1 correspondence.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding. Return 1 row so the
            // entry still occupies space in the layout.
            return 1;
        }

        let content = message.body.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

/// Creation time rendered in the viewer's timezone.
pub fn local_timestamp(created_at: &DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

impl<'a> Widget for MessageCard<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };

        let title = Line::from(vec![
            Span::styled(
                self.message.nickname.clone(),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled(
                local_timestamp(&self.message.created_at),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let mut block = Block::bordered()
            .title(title)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        if self.is_selected {
            block = block.title_bottom(
                Line::from(Span::styled(
                    " Del: remove ",
                    Style::default().fg(Color::Red),
                ))
                .right_aligned(),
            );
        }

        let inner_area = block.inner(area);
        block.render(area, buf);

        let paragraph = Paragraph::new(self.message.body.trim()).wrap(Wrap { trim: true });
        paragraph.render(inner_area, buf);
    }
}

/// Component trait implementation.
///
/// `MessageCard` is stateless, so the `&mut self` required by the trait is a
/// no-op; actual rendering is delegated to the [`Widget`] implementation.
impl<'a> Component for MessageCard<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.clone(), area);
    }
}
