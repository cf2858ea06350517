// engine/src/policy/history.rs
#![forbid(unsafe_code)]

use super::action::Action;

/**
 * The only state threading one decision into the next.
 *
 * Starts as (Right, 0) and is replaced exactly once per step by the decision
 * engine. Never reset mid-run.
 */
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AgentHistory {
    pub prev_action: Action,
    /// Absolute horizontal position observed on the previous step.
    pub prev_x: u32,
}

impl Default for AgentHistory {
    fn default() -> Self {
        Self {
            prev_action: Action::Right,
            prev_x: 0,
        }
    }
}

impl AgentHistory {
    pub fn new(prev_action: Action, prev_x: u32) -> Self {
        Self {
            prev_action,
            prev_x,
        }
    }
}
