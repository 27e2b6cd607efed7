use tracing::trace;

use crate::buffer::BufferView;
use crate::state::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A pure cursor computation over the document; never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Move { direction: Direction, amount: usize },
    Word { forward: bool },
}

pub fn run_motion(view: &impl BufferView, pos: Position, motion: Motion) -> Position {
    match motion {
        Motion::Move { direction, amount } => run_move(view, pos, direction, amount),
        Motion::Word { forward: true } => forward_word(view, pos),
        Motion::Word { forward: false } => backward_word(view, pos),
    }
}

/// Horizontal moves clamp the column to the last character of the line
/// (column 0 on an empty line); vertical moves clamp the line index and
/// leave the column alone — there is no sticky-column memory.
fn run_move(
    view: &impl BufferView,
    pos: Position,
    direction: Direction,
    amount: usize,
) -> Position {
    match direction {
        Direction::Left | Direction::Right => {
            let last_col = view.line_len(pos.line).saturating_sub(1);
            let col = match direction {
                Direction::Left => pos.col.saturating_sub(amount),
                _ => pos.col.saturating_add(amount).min(last_col),
            };
            Position::new(pos.line, col)
        }
        Direction::Up | Direction::Down => {
            let last_line = view.line_count().saturating_sub(1);
            let line = match direction {
                Direction::Up => pos.line.saturating_sub(amount),
                _ => pos.line.saturating_add(amount).min(last_line),
            };
            Position::new(line, pos.col)
        }
    }
}

fn is_delimiter(ch: char) -> bool {
    ch == ' ' || ch == '\n'
}

/// Character under `pos`, if any. Positions on an empty line, or one
/// past a line's end when walking backward, carry no character; word
/// scans treat such cells as word cells.
fn char_at(view: &impl BufferView, pos: Position) -> Option<char> {
    view.line_text(pos.line).chars().nth(pos.col)
}

/// One step forward in document order, halting on the document's last
/// cell.
fn next_position(view: &impl BufferView, pos: Position) -> Position {
    if pos.col + 1 < view.line_len(pos.line) {
        return Position::new(pos.line, pos.col + 1);
    }
    if pos.line + 1 >= view.line_count() {
        trace!("forward scan halted at end of document ({})", pos);
        return pos;
    }
    Position::new(pos.line + 1, 0)
}

/// One step backward, halting on the document's first cell. Crossing a
/// line lands one past the end of the previous line, so the newline
/// slot between lines stays visible to scans.
fn prev_position(view: &impl BufferView, pos: Position) -> Position {
    if pos.col > 0 {
        return Position::new(pos.line, pos.col - 1);
    }
    if pos.line == 0 {
        trace!("backward scan halted at start of document");
        return pos;
    }
    let line = pos.line - 1;
    Position::new(line, view.line_len(line))
}

/// Lands on the first word cell strictly after a delimiter has been
/// seen. The newline between two lines counts as a delimiter.
fn forward_word(view: &impl BufferView, start: Position) -> Position {
    let mut pos = start;
    let mut seen_delimiter = false;
    loop {
        match char_at(view, pos) {
            Some(ch) if is_delimiter(ch) => seen_delimiter = true,
            _ => {
                if seen_delimiter {
                    return pos;
                }
            }
        }
        let next = next_position(view, pos);
        if next == pos {
            return pos;
        }
        if next.line != pos.line {
            seen_delimiter = true;
        }
        pos = next;
    }
}

/// Walks back from the cell before the cursor, through any trailing
/// delimiters, then through the previous word; lands on that word's
/// earliest contiguous cell.
fn backward_word(view: &impl BufferView, cursor: Position) -> Position {
    let mut pos = prev_position(view, cursor);
    let mut word_pos = None;
    loop {
        match char_at(view, pos) {
            Some(ch) if is_delimiter(ch) => {
                if word_pos.is_some() {
                    break;
                }
            }
            _ => word_pos = Some(pos),
        }
        let prev = prev_position(view, pos);
        if prev == pos {
            break;
        }
        if prev.line != pos.line && word_pos.is_some() {
            break;
        }
        pos = prev;
    }
    word_pos.unwrap_or(pos)
}

#[cfg(test)]
mod tests {
    use super::{Direction, Motion, run_motion};
    use crate::state::Position;
    use crate::text_buffer::TextBuffer;

    const WORDS: &str = "0 23 567 9\n0 2 4 6\n\n01 3456";

    fn word_starts() -> Vec<Position> {
        [
            (0, 0),
            (0, 2),
            (0, 5),
            (0, 9),
            (1, 0),
            (1, 2),
            (1, 4),
            (1, 6),
            (2, 0),
            (3, 0),
            (3, 3),
            (3, 6),
        ]
        .into_iter()
        .map(|(line, col)| Position::new(line, col))
        .collect()
    }

    fn step(buffer: &TextBuffer, pos: Position, motion: Motion) -> Position {
        run_motion(buffer, pos, motion)
    }

    #[test]
    fn forward_word_should_visit_each_word_start_in_order() {
        let buffer = TextBuffer::new(WORDS);
        let starts = word_starts();
        let mut pos = starts[0];
        for expected in &starts[1..] {
            pos = step(&buffer, pos, Motion::Word { forward: true });
            assert_eq!(pos, *expected);
        }
    }

    #[test]
    fn backward_word_should_visit_word_starts_in_reverse() {
        let buffer = TextBuffer::new(WORDS);
        let starts = word_starts();
        let mut pos = *starts.last().expect("scan fixture has word starts");
        for expected in starts.iter().rev().skip(1) {
            pos = step(&buffer, pos, Motion::Word { forward: false });
            assert_eq!(pos, *expected);
        }
    }

    #[test]
    fn word_round_trip_should_return_to_the_same_word_start() {
        let buffer = TextBuffer::new(WORDS);
        let from = Position::new(1, 2);
        let there = step(&buffer, from, Motion::Word { forward: true });
        assert_eq!(step(&buffer, there, Motion::Word { forward: false }), from);
    }

    #[test]
    fn forward_word_on_last_word_should_halt_on_last_character() {
        let buffer = TextBuffer::new(WORDS);
        let pos = step(&buffer, Position::new(3, 3), Motion::Word { forward: true });
        assert_eq!(pos, Position::new(3, 6));
        assert_eq!(step(&buffer, pos, Motion::Word { forward: true }), pos);
    }

    #[test]
    fn backward_word_at_document_start_should_halt_on_first_character() {
        let buffer = TextBuffer::new(WORDS);
        let pos = step(&buffer, Position::new(0, 0), Motion::Word { forward: false });
        assert_eq!(pos, Position::new(0, 0));
    }

    #[test]
    fn empty_line_should_count_as_a_word() {
        let buffer = TextBuffer::new(WORDS);
        let onto = step(&buffer, Position::new(1, 6), Motion::Word { forward: true });
        assert_eq!(onto, Position::new(2, 0));
        let past = step(&buffer, onto, Motion::Word { forward: true });
        assert_eq!(past, Position::new(3, 0));
    }

    #[test]
    fn left_at_column_zero_should_stay_put() {
        let buffer = TextBuffer::new("abc");
        let motion = Motion::Move {
            direction: Direction::Left,
            amount: 1,
        };
        assert_eq!(
            step(&buffer, Position::new(0, 0), motion),
            Position::new(0, 0)
        );
    }

    #[test]
    fn right_should_stop_on_last_character() {
        let buffer = TextBuffer::new("abc");
        let motion = Motion::Move {
            direction: Direction::Right,
            amount: 1,
        };
        let mut pos = Position::new(0, 0);
        for _ in 0..10 {
            pos = step(&buffer, pos, motion);
        }
        assert_eq!(pos, Position::new(0, 2));
    }

    #[test]
    fn right_on_empty_line_should_stay_at_column_zero() {
        let buffer = TextBuffer::new("");
        let motion = Motion::Move {
            direction: Direction::Right,
            amount: 1,
        };
        assert_eq!(
            step(&buffer, Position::new(0, 0), motion),
            Position::new(0, 0)
        );
    }

    #[test]
    fn vertical_moves_should_clamp_to_document_rows() {
        let buffer = TextBuffer::new("a\nb\nc");
        let down = Motion::Move {
            direction: Direction::Down,
            amount: 1,
        };
        let up = Motion::Move {
            direction: Direction::Up,
            amount: 1,
        };
        let mut pos = Position::new(0, 0);
        for _ in 0..10 {
            pos = step(&buffer, pos, down);
        }
        assert_eq!(pos, Position::new(2, 0));
        for _ in 0..10 {
            pos = step(&buffer, pos, up);
        }
        assert_eq!(pos, Position::new(0, 0));
    }

    #[test]
    fn vertical_move_should_keep_the_column() {
        let buffer = TextBuffer::new("abcd\nefgh");
        let down = Motion::Move {
            direction: Direction::Down,
            amount: 1,
        };
        assert_eq!(
            step(&buffer, Position::new(0, 3), down),
            Position::new(1, 3)
        );
    }
}
