use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the host loop consumes: a key for the engine, a redraw hint,
/// or a host-level quit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Key(String),
    Redraw,
    Quit,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn event(&self, event: &Event) -> Option<HostEvent> {
        match event {
            Event::Resize(_, _) => Some(HostEvent::Redraw),
            Event::Key(key) => self.key_event(key),
            _ => None,
        }
    }

    /// Printable characters forward as themselves so unmapped ones can
    /// fall through to literal insertion; Esc becomes the engine's
    /// "escape" key, Enter a literal newline. Ctrl-q quits the host.
    fn key_event(&self, key: &KeyEvent) -> Option<HostEvent> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('q') => Some(HostEvent::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => Some(HostEvent::Key("escape".to_string())),
            KeyCode::Enter => Some(HostEvent::Key("\n".to_string())),
            KeyCode::Char(ch) => Some(HostEvent::Key(ch.to_string())),
            _ => None,
        }
    }
}
