// engine/src/perception/mod.rs
#![forbid(unsafe_code)]

mod locate;
mod observe;
mod terrain;

/**
 * Spatial analyzer.
 *
 * Bounded local scans over one `TileGrid`. Every function is pure, so a
 * recorded grid always yields the same answers.
 */
pub use locate::{
    GridPos, HostileSighting, any_hostile, find_agent, grid_distance, locate_agent,
    nearest_hostile_ahead,
};
pub use observe::Perception;
pub use terrain::{
    ObstacleKind, collectible_above, gap_ahead, ground_stable, obstacle_ahead, platform_above,
};
