// engine/src/world/mod.rs
#![forbid(unsafe_code)]

mod constants;
mod facts;
mod grid;
mod tile;

pub use constants::{
    ACTIVE_ROW_LIMIT, FAR_AWAY, GRID_H, GRID_W, HOSTILE_THRESHOLD, OBSTACLE_SCAN_MAX_ROW,
};
pub use facts::WorldFacts;
pub use grid::{GridShapeError, TileGrid};
pub use tile::{HostileKind, Tile};
