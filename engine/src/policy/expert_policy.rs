// engine/src/policy/expert_policy.rs
#![forbid(unsafe_code)]

use crate::io::Snapshot;

use super::base::Policy;
use super::expert::{Decision, decide};
use super::history::AgentHistory;

/// Rule-based policy. Threads `AgentHistory` from one step to the next.
#[derive(Clone, Debug, Default)]
pub struct ExpertPolicy {
    history: AgentHistory,
}

impl ExpertPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: AgentHistory) -> Self {
        Self { history }
    }

    pub fn history(&self) -> AgentHistory {
        self.history
    }
}

impl Policy for ExpertPolicy {
    fn decide(&mut self, snapshot: &Snapshot) -> Decision {
        let d = decide(&snapshot.grid, &snapshot.facts, &self.history);
        self.history = d.history;
        d
    }
}
