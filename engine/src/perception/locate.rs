// engine/src/perception/locate.rs
#![forbid(unsafe_code)]

use crate::world::{HostileKind, Tile, TileGrid};

/// Screen-relative cell coordinate. Default is the grid origin.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub(crate) fn r(self) -> i32 {
        self.row as i32
    }

    #[inline]
    pub(crate) fn c(self) -> i32 {
        self.col as i32
    }
}

/// Euclidean distance in grid units.
#[inline]
pub fn grid_distance(a: GridPos, b: GridPos) -> f64 {
    let dr = b.row as f64 - a.row as f64;
    let dc = b.col as f64 - a.col as f64;
    (dr * dr + dc * dc).sqrt()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostileSighting {
    pub pos: GridPos,
    pub kind: HostileKind,
    pub distance: f64,
}

/// Leading edge of the agent: the cell right of the first AGENT cell, row-major.
pub fn find_agent(grid: &TileGrid) -> Option<GridPos> {
    grid.iter_row_major()
        .find(|&(_, _, t)| t == Tile::Agent)
        .map(|(r, c, _)| GridPos::new(r, c + 1))
}

/// Like `find_agent`, falling back to the origin (respawn frames have no agent).
pub fn locate_agent(grid: &TileGrid) -> GridPos {
    find_agent(grid).unwrap_or_default()
}

fn kind_of(tile: Tile) -> HostileKind {
    match tile {
        Tile::Hostile(kind) => kind,
        other => HostileKind::Other(other.code()),
    }
}

/**
 * First hostile at or right of the agent column.
 *
 * Scan order is column-major (left to right, then top to bottom), so the
 * leftmost hostile wins even if a closer one sits lower in a later column.
 */
pub fn nearest_hostile_ahead(grid: &TileGrid, agent: GridPos) -> Option<HostileSighting> {
    grid.iter_column_major()
        .filter(|&(_, c, t)| t.is_hostile() && c >= agent.col)
        .map(|(r, c, t)| {
            let pos = GridPos::new(r, c);
            HostileSighting {
                pos,
                kind: kind_of(t),
                distance: grid_distance(agent, pos),
            }
        })
        .next()
}

/// First hostile anywhere, row-major. May be behind the agent.
pub fn any_hostile(grid: &TileGrid) -> Option<GridPos> {
    grid.iter_row_major()
        .find(|&(_, _, t)| t.is_hostile())
        .map(|(r, c, _)| GridPos::new(r, c))
}
