// engine/src/perception/terrain.rs
#![forbid(unsafe_code)]

use crate::world::{GRID_H, OBSTACLE_SCAN_MAX_ROW, Tile, TileGrid};

use super::locate::{GridPos, grid_distance};

const OBSTACLE_RADIUS: f64 = 2.0;
const GAP_RADIUS: f64 = 2.9;
const COLLECTIBLE_RADIUS: f64 = 3.0;
const PLATFORM_RADIUS: f64 = 7.0;

/// Width of solid footing required left of a gap.
const GAP_LEDGE: i32 = 3;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ObstacleKind {
    Obstacle,
    Stairs,
}

/**
 * Nearest BLOCK / PIPE / raised GROUND to the right of the agent within 2.0.
 *
 * A GROUND hit is "stairs" when it sits one row below the agent row, has
 * ground beneath it and no ground directly above it. Hill faces (ground above
 * and below) stay plain obstacles.
 */
pub fn obstacle_ahead(grid: &TileGrid, agent: GridPos) -> Option<ObstacleKind> {
    if agent.row > OBSTACLE_SCAN_MAX_ROW {
        return None;
    }
    let (row, col) = (agent.r(), agent.c());

    for (r, c, t) in grid.iter_column_major() {
        let (a, b) = (r as i32, c as i32);
        if b <= col {
            continue;
        }
        let candidate = match t {
            Tile::Block | Tile::Pipe => true,
            Tile::Ground => a <= row + 1,
            _ => false,
        };
        if !candidate {
            continue;
        }

        let distance = grid_distance(agent, GridPos::new(r, c));
        if t == Tile::Ground
            && grid.is(a + 1, b, Tile::Ground)
            && !grid.is(a - 1, b, Tile::Ground)
            && a == row + 1
            && distance <= OBSTACLE_RADIUS
        {
            return Some(ObstacleKind::Stairs);
        }
        if distance <= OBSTACLE_RADIUS {
            return Some(ObstacleKind::Obstacle);
        }
    }
    None
}

/// EMPTY cell two rows below the agent, to its right, with a three-wide ledge on its left.
pub fn gap_ahead(grid: &TileGrid, agent: GridPos) -> bool {
    let (row, col) = (agent.r(), agent.c());
    let ledge = |a: i32, b: i32, tile: Tile| (1..=GAP_LEDGE).all(|k| grid.is(a, b - k, tile));

    grid.iter_column_major().any(|(r, c, t)| {
        let (a, b) = (r as i32, c as i32);
        t == Tile::Empty
            && a == row + 2
            && b > col
            && (ledge(a, b, Tile::Ground) || ledge(a, b, Tile::Block))
            && grid_distance(agent, GridPos::new(r, c)) <= GAP_RADIUS
    })
}

/// GROUND somewhere in the agent column, flanked by GROUND on both sides.
pub fn ground_stable(grid: &TileGrid, agent: GridPos) -> bool {
    let col = agent.c();
    (0..GRID_H as i32).any(|a| {
        grid.is(a, col, Tile::Ground)
            && grid.is(a, col + 1, Tile::Ground)
            && grid.is(a, col - 1, Tile::Ground)
    })
}

/**
 * Power-up box reachable with a standing jump.
 *
 * Only the first POWERUP (column-major) that is level-or-above and at-or-right
 * of the agent is considered; if it is out of reach the answer is false even
 * when a later box would qualify.
 */
pub fn collectible_above(grid: &TileGrid, agent: GridPos) -> bool {
    if !ground_stable(grid, agent) {
        return false;
    }
    let (row, col) = (agent.r(), agent.c());

    grid.iter_column_major()
        .find(|&(r, c, t)| t == Tile::Powerup && r <= agent.row && c >= agent.col)
        .is_some_and(|(r, c, _)| {
            grid_distance(agent, GridPos::new(r, c)) <= COLLECTIBLE_RADIUS
                && grid.is(row + 2, col, Tile::Ground)
        })
}

/// BLOCK strictly above and right of the agent within jumping range.
pub fn platform_above(grid: &TileGrid, agent: GridPos) -> bool {
    grid.iter_column_major().any(|(r, c, t)| {
        t == Tile::Block
            && r < agent.row
            && c > agent.col
            && grid_distance(agent, GridPos::new(r, c)) <= PLATFORM_RADIUS
    })
}
