use crate::buffer::{BufferAdapter, BufferError, BufferView, Selection};
use crate::state::Position;

/// In-memory line buffer with its own selection, standing in for the
/// host editor's document. Mutations move the caret the way an editor
/// would: deletes collapse onto the start of the removed span, inserts
/// land just past the inserted text.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    selection: Selection,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            lines: split_lines_owned(text),
            selection: Selection::collapsed(Position::new(0, 0)),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Nearest valid content position; columns may sit one past the
    /// line end, like an insert point.
    fn clamp_position(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len().saturating_sub(1));
        let col = pos.col.min(self.lines[line].chars().count());
        Position::new(line, col)
    }

    fn clamp_to_content(&self, pos: Position) -> Result<Position, BufferError> {
        if pos.line >= self.lines.len() {
            return Err(BufferError::LineOutOfRange {
                line: pos.line,
                line_count: self.lines.len(),
            });
        }
        let len = self.lines[pos.line].chars().count();
        Ok(Position::new(pos.line, pos.col.min(len)))
    }
}

impl BufferView for TextBuffer {
    fn line_text(&self, line: usize) -> String {
        self.lines.get(line).cloned().unwrap_or_default()
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl BufferAdapter for TextBuffer {
    async fn delete_range(&mut self, start: Position, end: Position) -> Result<(), BufferError> {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let start = self.clamp_to_content(start)?;
        let end = self.clamp_to_content(end)?;

        if start.line == end.line {
            let line = &mut self.lines[start.line];
            let from = char_to_byte_idx(line, start.col);
            let to = char_to_byte_idx(line, end.col);
            line.drain(from..to);
        } else {
            let prefix_end = char_to_byte_idx(&self.lines[start.line], start.col);
            let suffix_start = char_to_byte_idx(&self.lines[end.line], end.col);
            let suffix = self.lines[end.line][suffix_start..].to_string();
            self.lines[start.line].truncate(prefix_end);
            self.lines[start.line].push_str(&suffix);
            self.lines.drain(start.line + 1..=end.line);
        }

        self.selection = Selection::collapsed(start);
        Ok(())
    }

    async fn insert_text(&mut self, at: Position, text: &str) -> Result<(), BufferError> {
        let at = self.clamp_to_content(at)?;
        let byte_idx = char_to_byte_idx(&self.lines[at.line], at.col);
        let tail = self.lines[at.line].split_off(byte_idx);

        let mut segments = text.split('\n');
        let first = segments.next().unwrap_or_default();
        self.lines[at.line].push_str(first);

        let mut caret = Position::new(at.line, at.col + first.chars().count());
        let mut insert_at = at.line + 1;
        for segment in segments {
            self.lines.insert(insert_at, segment.to_string());
            caret = Position::new(insert_at, segment.chars().count());
            insert_at += 1;
        }
        self.lines[caret.line].push_str(&tail);

        self.selection = Selection::collapsed(caret);
        Ok(())
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, anchor: Position, active: Position) {
        self.selection = Selection {
            anchor: self.clamp_position(anchor),
            active: self.clamp_position(active),
        };
    }
}

fn split_lines_owned(text: &str) -> Vec<String> {
    let mut lines = text
        .split('\n')
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn char_to_byte_idx(s: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    s.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::TextBuffer;
    use crate::buffer::{BufferAdapter, BufferError, BufferView};
    use crate::state::Position;

    fn block_on<T>(future: impl Future<Output = T>) -> T {
        compio::runtime::Runtime::new()
            .expect("compio runtime")
            .block_on(future)
    }

    #[test]
    fn empty_text_should_still_have_one_line() {
        let buffer = TextBuffer::new("");
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line_text(0), "");
    }

    #[test]
    fn delete_within_one_line_should_remove_the_span() {
        let mut buffer = TextBuffer::new("abcdef");
        block_on(buffer.delete_range(Position::new(0, 1), Position::new(0, 4)))
            .expect("delete applies");
        assert_eq!(buffer.text(), "aef");
        assert_eq!(buffer.selection().active, Position::new(0, 1));
    }

    #[test]
    fn delete_across_lines_should_merge_the_edges() {
        let mut buffer = TextBuffer::new("abcd\nxyz\npqrs");
        block_on(buffer.delete_range(Position::new(0, 2), Position::new(2, 1)))
            .expect("delete applies");
        assert_eq!(buffer.text(), "abqrs");
    }

    #[test]
    fn delete_should_accept_reversed_endpoints() {
        let mut buffer = TextBuffer::new("abcdef");
        block_on(buffer.delete_range(Position::new(0, 4), Position::new(0, 1)))
            .expect("delete applies");
        assert_eq!(buffer.text(), "aef");
    }

    #[test]
    fn delete_up_to_line_end_should_keep_the_newline_join() {
        let mut buffer = TextBuffer::new("abc\ndef");
        block_on(buffer.delete_range(Position::new(0, 1), Position::new(0, 3)))
            .expect("delete applies");
        assert_eq!(buffer.text(), "a\ndef");
    }

    #[test]
    fn delete_past_the_last_line_should_fail_without_changes() {
        let mut buffer = TextBuffer::new("abc");
        let result = block_on(buffer.delete_range(Position::new(0, 0), Position::new(5, 0)));
        assert!(matches!(
            result,
            Err(BufferError::LineOutOfRange { line: 5, .. })
        ));
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn insert_should_advance_the_caret_past_the_text() {
        let mut buffer = TextBuffer::new("ad");
        block_on(buffer.insert_text(Position::new(0, 1), "bc")).expect("insert applies");
        assert_eq!(buffer.text(), "abcd");
        assert_eq!(buffer.selection().active, Position::new(0, 3));
    }

    #[test]
    fn insert_with_newlines_should_split_the_line() {
        let mut buffer = TextBuffer::new("abef");
        block_on(buffer.insert_text(Position::new(0, 2), "cd\ngh")).expect("insert applies");
        assert_eq!(buffer.text(), "abcd\nghef");
        assert_eq!(buffer.selection().active, Position::new(1, 2));
    }

    #[test]
    fn insert_of_a_lone_newline_should_open_a_line() {
        let mut buffer = TextBuffer::new("abcd");
        block_on(buffer.insert_text(Position::new(0, 2), "\n")).expect("insert applies");
        assert_eq!(buffer.text(), "ab\ncd");
        assert_eq!(buffer.selection().active, Position::new(1, 0));
    }

    #[test]
    fn insert_past_line_end_should_clamp_to_the_line() {
        let mut buffer = TextBuffer::new("ab");
        block_on(buffer.insert_text(Position::new(0, 9), "c")).expect("insert applies");
        assert_eq!(buffer.text(), "abc");
    }
}
