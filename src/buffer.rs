use thiserror::Error;

use crate::state::Position;

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("line {line} is out of range (buffer has {line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },
}

/// A selection span as the host editor tracks it: `anchor` is the fixed
/// end, `active` the moving caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn collapsed(at: Position) -> Self {
        Self {
            anchor: at,
            active: at,
        }
    }

    /// Document-order start of the span.
    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    /// Document-order end of the span.
    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }
}

/// Read side of the host buffer. Motions see only this.
pub trait BufferView {
    fn line_text(&self, line: usize) -> String;
    fn line_count(&self) -> usize;

    fn line_len(&self, line: usize) -> usize {
        self.line_text(line).chars().count()
    }
}

/// The full host-buffer boundary: reads plus the two mutations the
/// engine may request. A mutation must be awaited before the buffer is
/// read again; `delete_range` spans are start-inclusive, end-exclusive.
#[allow(async_fn_in_trait)]
pub trait BufferAdapter: BufferView {
    async fn delete_range(&mut self, start: Position, end: Position) -> Result<(), BufferError>;
    async fn insert_text(&mut self, at: Position, text: &str) -> Result<(), BufferError>;
    fn selection(&self) -> Selection;
    fn set_selection(&mut self, anchor: Position, active: Position);
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::state::Position;

    #[test]
    fn selection_start_and_end_should_use_document_order() {
        let backwards = Selection {
            anchor: Position::new(2, 1),
            active: Position::new(0, 4),
        };
        assert_eq!(backwards.start(), Position::new(0, 4));
        assert_eq!(backwards.end(), Position::new(2, 1));
    }

    #[test]
    fn collapsed_selection_should_share_both_ends() {
        let collapsed = Selection::collapsed(Position::new(1, 3));
        assert_eq!(collapsed.start(), collapsed.end());
    }
}
