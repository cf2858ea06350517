// engine/src/perception/observe.rs
#![forbid(unsafe_code)]

use crate::world::{FAR_AWAY, TileGrid};

use super::locate::{
    GridPos, HostileSighting, any_hostile, find_agent, nearest_hostile_ahead,
};
use super::terrain::{
    ObstacleKind, collectible_above, gap_ahead, ground_stable, obstacle_ahead, platform_above,
};

/// Every spatial query answered for one grid, relative to the located agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perception {
    pub agent: GridPos,
    /// False on respawn / transition frames; `agent` is then the origin.
    pub agent_found: bool,
    pub hostile_ahead: Option<HostileSighting>,
    pub any_hostile: Option<GridPos>,
    pub obstacle: Option<ObstacleKind>,
    pub gap: bool,
    pub collectible: bool,
    pub platform: bool,
    pub ground_stable: bool,
}

impl Perception {
    pub fn observe(grid: &TileGrid) -> Self {
        let found = find_agent(grid);
        let agent = found.unwrap_or_default();
        Self {
            agent,
            agent_found: found.is_some(),
            hostile_ahead: nearest_hostile_ahead(grid, agent),
            any_hostile: any_hostile(grid),
            obstacle: obstacle_ahead(grid, agent),
            gap: gap_ahead(grid, agent),
            collectible: collectible_above(grid, agent),
            platform: platform_above(grid, agent),
            ground_stable: ground_stable(grid, agent),
        }
    }

    /// Distance to the nearest hostile ahead, `FAR_AWAY` if there is none.
    pub fn hostile_distance(&self) -> f64 {
        self.hostile_ahead.map_or(FAR_AWAY, |h| h.distance)
    }
}
