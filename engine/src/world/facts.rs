// engine/src/world/facts.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Scalar facts reported alongside each grid snapshot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WorldFacts {
    /// Absolute horizontal scroll position of the agent.
    pub x_position: u32,
    pub world: u8,
    pub stage: u8,
    #[serde(default)]
    pub game_over: bool,
}

impl WorldFacts {
    pub fn is_level(&self, world: u8, stage: u8) -> bool {
        self.world == world && self.stage == stage
    }
}
