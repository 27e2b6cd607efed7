use crate::buffer::{BufferAdapter, BufferError};
use crate::state::{Mode, Position};

/// A buffer-mutating command applied over the span between two
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Change,
}

/// Applies `operator` over the span between `a` and `b` (in either
/// order) and reports the mode the editor should be in afterwards.
/// Exactly one buffer mutation is issued and awaited.
pub async fn run_operator<A: BufferAdapter>(
    adapter: &mut A,
    a: Position,
    b: Position,
    operator: Operator,
    mode: Mode,
) -> Result<Mode, BufferError> {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    adapter.delete_range(start, end).await?;
    Ok(match operator {
        Operator::Delete => mode,
        Operator::Change => Mode::Insert,
    })
}
