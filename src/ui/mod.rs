mod status_bar;
mod text_area;

use ratatui::layout::{Constraint, Layout};

use crate::engine::Engine;
use crate::text_buffer::TextBuffer;
use status_bar::StatusBarWidget;
use text_area::TextAreaWidget;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut ratatui::Frame<'_>,
        engine: &Engine<TextBuffer>,
        message: &str,
    ) {
        let chunks =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(frame.area());

        let (text_area, cursor_position) = TextAreaWidget::from_engine(engine, chunks[0]);
        let status_bar =
            StatusBarWidget::new(engine.status_text(), message, engine.state().cursor);

        frame.render_widget(text_area, chunks[0]);
        frame.render_widget(status_bar, chunks[1]);
        if let Some(cursor_to_draw) = cursor_position {
            frame.set_cursor_position(cursor_to_draw);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
