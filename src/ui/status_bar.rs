use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::state::Position;

pub(super) struct StatusBarWidget {
    mode_text: &'static str,
    message: String,
    cursor: Position,
}

impl StatusBarWidget {
    pub(super) fn new(mode_text: &'static str, message: &str, cursor: Position) -> Self {
        Self {
            mode_text,
            message: message.to_string(),
            cursor,
        }
    }
}

impl Widget for StatusBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", self.mode_text),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " {} | {}:{}",
                self.message,
                self.cursor.line + 1,
                self.cursor.col + 1
            )),
        ]))
        .render(area, buf);
    }
}
