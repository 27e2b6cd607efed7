use crate::motion::{Direction, Motion};
use crate::operator::Operator;
use crate::state::{EngineState, Mode};

/// One row of the key table: the key it answers to, the modes it is
/// eligible in, and a pure state transform. Transforms only touch mode,
/// pending fields and the visual anchor; buffer access stays in the
/// dispatcher.
pub struct ActionRule {
    pub key: &'static str,
    pub modes: &'static [Mode],
    pub apply: fn(EngineState) -> EngineState,
}

const NORMAL_AND_VISUAL: &[Mode] = &[Mode::Normal, Mode::Visual];
const NORMAL_ONLY: &[Mode] = &[Mode::Normal];

pub static RULES: &[ActionRule] = &[
    ActionRule {
        key: "h",
        modes: NORMAL_AND_VISUAL,
        apply: |state| {
            state.with_motion(Motion::Move {
                direction: Direction::Left,
                amount: 1,
            })
        },
    },
    ActionRule {
        key: "l",
        modes: NORMAL_AND_VISUAL,
        apply: |state| {
            state.with_motion(Motion::Move {
                direction: Direction::Right,
                amount: 1,
            })
        },
    },
    ActionRule {
        key: "j",
        modes: NORMAL_AND_VISUAL,
        apply: |state| {
            state.with_motion(Motion::Move {
                direction: Direction::Down,
                amount: 1,
            })
        },
    },
    ActionRule {
        key: "k",
        modes: NORMAL_AND_VISUAL,
        apply: |state| {
            state.with_motion(Motion::Move {
                direction: Direction::Up,
                amount: 1,
            })
        },
    },
    ActionRule {
        key: "w",
        modes: NORMAL_AND_VISUAL,
        apply: |state| state.with_motion(Motion::Word { forward: true }),
    },
    ActionRule {
        key: "b",
        modes: NORMAL_AND_VISUAL,
        apply: |state| state.with_motion(Motion::Word { forward: false }),
    },
    ActionRule {
        key: "i",
        modes: NORMAL_ONLY,
        apply: |state| state.with_mode(Mode::Insert),
    },
    ActionRule {
        key: "v",
        modes: NORMAL_ONLY,
        apply: |state| {
            let anchor = state.cursor;
            state.with_mode(Mode::Visual).with_visual_anchor(Some(anchor))
        },
    },
    ActionRule {
        key: "escape",
        modes: &[Mode::Insert, Mode::Visual],
        apply: |state| state.with_mode(Mode::Normal).with_visual_anchor(None),
    },
    ActionRule {
        key: "d",
        modes: NORMAL_AND_VISUAL,
        apply: |state| state.with_operator(Operator::Delete),
    },
    ActionRule {
        key: "c",
        modes: NORMAL_ONLY,
        apply: |state| state.with_operator(Operator::Change),
    },
];

/// All rules eligible for `key` in `mode`, in table order. The table is
/// meant to produce at most one match per pair; the dispatcher reports
/// anything more as a fault.
pub fn matching_rules(mode: Mode, key: &str) -> impl Iterator<Item = &'static ActionRule> + '_ {
    RULES
        .iter()
        .filter(move |rule| rule.modes.contains(&mode) && rule.key == key)
}
