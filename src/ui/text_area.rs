use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthChar;

use crate::buffer::{BufferAdapter, BufferView};
use crate::engine::Engine;
use crate::state::{Mode, Position};
use crate::text_buffer::TextBuffer;

pub(super) struct TextAreaWidget {
    lines: Vec<String>,
    // Document-order span to paint in visual mode, end exclusive.
    highlight: Option<(Position, Position)>,
}

impl TextAreaWidget {
    pub(super) fn from_engine(
        engine: &Engine<TextBuffer>,
        area: Rect,
    ) -> (Self, Option<(u16, u16)>) {
        let buffer = engine.adapter();
        let state = engine.state();

        let lines = buffer
            .lines()
            .take(area.height as usize)
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        let highlight = (state.mode == Mode::Visual).then(|| {
            let selection = buffer.selection();
            (selection.start(), selection.end())
        });

        let cursor = state.cursor;
        let cursor_position = (cursor.line < area.height as usize).then(|| {
            let line = buffer.line_text(cursor.line);
            let cursor_x = display_width_of_char_prefix(&line, cursor.col)
                .min(area.width.saturating_sub(1) as usize) as u16;
            (
                area.x.saturating_add(cursor_x),
                area.y.saturating_add(cursor.line as u16),
            )
        });

        (Self { lines, highlight }, cursor_position)
    }
}

impl Widget for TextAreaWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines.join("\n")).render(area, buf);

        let Some((start, end)) = self.highlight else {
            return;
        };
        for (line_idx, line) in self.lines.iter().enumerate() {
            if line_idx < start.line || line_idx > end.line {
                continue;
            }
            let from = if line_idx == start.line { start.col } else { 0 };
            let to = if line_idx == end.line {
                end.col
            } else {
                line.chars().count()
            };

            let mut x = 0usize;
            for (char_idx, ch) in line.chars().enumerate() {
                let width = UnicodeWidthChar::width(ch).unwrap_or(0);
                if char_idx >= from && char_idx < to {
                    for dx in 0..width {
                        let cell_x = x.saturating_add(dx);
                        if cell_x >= area.width as usize {
                            break;
                        }
                        let position = (
                            area.x.saturating_add(cell_x as u16),
                            area.y.saturating_add(line_idx as u16),
                        );
                        if let Some(cell) = buf.cell_mut(position) {
                            cell.set_bg(Color::Blue);
                            cell.set_fg(Color::White);
                        }
                    }
                }
                x += width;
            }
        }
    }
}

fn display_width_of_char_prefix(line: &str, char_count: usize) -> usize {
    line.chars()
        .take(char_count)
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::display_width_of_char_prefix;

    #[test]
    fn display_width_prefix_counts_wide_chars() {
        let line = "a中b";
        assert_eq!(display_width_of_char_prefix(line, 1), 1);
        assert_eq!(display_width_of_char_prefix(line, 2), 3);
        assert_eq!(display_width_of_char_prefix(line, 3), 4);
    }
}
