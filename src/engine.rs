use thiserror::Error;
use tracing::warn;

use crate::action;
use crate::buffer::{BufferAdapter, BufferError};
use crate::motion::run_motion;
use crate::operator::run_operator;
use crate::state::{EngineState, Mode, Position};

/// Non-fatal conditions reported while a keystroke is processed. Both
/// recover locally; neither blocks input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineFault {
    #[error("{matches} rules matched key {key:?} in {mode:?} mode; using the first")]
    AmbiguousAction {
        mode: Mode,
        key: String,
        matches: usize,
    },
    #[error("cursor desynchronized: engine believed {believed}, editor reports {observed}")]
    StateDesync {
        believed: Position,
        observed: Position,
    },
}

/// Keystroke dispatcher. Owns the buffer adapter and the engine state;
/// each `handle_key` call runs one keystroke to completion, suspending
/// only at buffer mutations, before the next may start.
pub struct Engine<A> {
    adapter: A,
    state: EngineState,
    fault_tx: flume::Sender<EngineFault>,
}

impl<A: BufferAdapter> Engine<A> {
    /// Starts in Normal mode, believing the caret is where the host's
    /// selection currently starts. Faults are pushed to `fault_tx` for
    /// whoever owns the receiving end; there is no ambient instance.
    pub fn new(adapter: A, fault_tx: flume::Sender<EngineFault>) -> Self {
        let cursor = adapter.selection().start();
        Self {
            adapter,
            state: EngineState::new(cursor),
            fault_tx,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Mode text for the host's status display.
    pub fn status_text(&self) -> &'static str {
        self.state.mode.status_text()
    }

    /// Moves the believed cursor and collapses the host selection onto
    /// it.
    pub fn set_cursor(&mut self, pos: Position) {
        self.state.cursor = pos;
        self.adapter.set_selection(pos, pos);
    }

    /// Runs one keystroke end to end: sanity check, rule lookup (or the
    /// literal-insert fallback), pending motion/operator resolution,
    /// selection sync. A failed mutation propagates as the error and
    /// leaves the persisted state exactly as it was before the key.
    pub async fn handle_key(&mut self, key: &str) -> Result<(), BufferError> {
        self.check_cursor_sync();

        let Some(applied) = self.apply_keystroke(key) else {
            if key != "escape" {
                let at = self.adapter.selection().start();
                self.adapter.insert_text(at, key).await?;
            }
            return Ok(());
        };

        let mut next = applied;
        let resolved = match next.mode {
            Mode::Normal => self.resolve_pending_in_normal(&mut next).await?,
            Mode::Visual => self.resolve_pending_in_visual(&mut next).await?,
            _ => false,
        };
        if resolved {
            next.pending_motion = None;
            next.pending_operator = None;
        }

        match next.mode {
            Mode::Normal => self.adapter.set_selection(next.cursor, next.cursor),
            Mode::Visual => {
                let anchor = next.visual_anchor.unwrap_or(next.cursor);
                self.adapter.set_selection(anchor, next.cursor);
            }
            _ => {}
        }

        self.state = next;
        Ok(())
    }

    /// Applies the first matching table rule, reporting an ambiguity
    /// fault if more than one matched. `None` means the key is
    /// unmapped.
    fn apply_keystroke(&mut self, key: &str) -> Option<EngineState> {
        let mut matched = action::matching_rules(self.state.mode, key);
        let rule = matched.next()?;
        let extra = matched.count();
        if extra > 0 {
            self.report(EngineFault::AmbiguousAction {
                mode: self.state.mode,
                key: key.to_string(),
                matches: extra + 1,
            });
        }

        let mut state = self.state.clone();
        state.last_key = Some(key.to_string());
        Some((rule.apply)(state))
    }

    async fn resolve_pending_in_normal(
        &mut self,
        state: &mut EngineState,
    ) -> Result<bool, BufferError> {
        let Some(pending) = state.pending_motion else {
            return Ok(false);
        };
        let target = run_motion(&self.adapter, state.cursor, pending);
        if let Some(op) = state.pending_operator {
            // The operator consumes the span; the caret stays at its
            // start.
            state.mode =
                run_operator(&mut self.adapter, state.cursor, target, op, state.mode).await?;
        } else {
            state.cursor = target;
        }
        Ok(true)
    }

    async fn resolve_pending_in_visual(
        &mut self,
        state: &mut EngineState,
    ) -> Result<bool, BufferError> {
        if let Some(pending) = state.pending_motion {
            state.cursor = run_motion(&self.adapter, state.cursor, pending);
        }
        if let Some(op) = state.pending_operator {
            let anchor = state.visual_anchor.unwrap_or(state.cursor);
            run_operator(&mut self.adapter, anchor, state.cursor, op, state.mode).await?;
            // Leaving visual mode; the caret returns to the anchor.
            state.mode = Mode::Normal;
            state.cursor = anchor;
            state.visual_anchor = None;
        }
        Ok(true)
    }

    /// Compares the believed cursor against the host's caret. On
    /// mismatch the fault is reported and the observed caret is
    /// adopted.
    fn check_cursor_sync(&mut self) {
        let observed = self.adapter.selection().active;
        let believed = self.truncate_to_line(self.state.cursor);
        if believed != observed {
            self.report(EngineFault::StateDesync { believed, observed });
            self.state.cursor = observed;
        }
    }

    /// Caps a position's column at the line length, the way hosts
    /// report carets that sit past the end of a line.
    fn truncate_to_line(&self, pos: Position) -> Position {
        let len = self.adapter.line_len(pos.line);
        if pos.col > len {
            Position::new(pos.line, len)
        } else {
            pos
        }
    }

    fn report(&self, fault: EngineFault) {
        warn!("{}", fault);
        let _ = self.fault_tx.send(fault);
    }
}
