// engine/src/world/constants.rs
#![forbid(unsafe_code)]

/// Visible game-area rows (row 0 is the top of the screen).
pub const GRID_H: usize = 16;
/// Visible game-area columns (screen-relative, not world-absolute).
pub const GRID_W: usize = 20;

/// First tile code that denotes a hostile entity.
///
/// Every hostile subtype is encoded at or above this value, so "is this a
/// hostile" is one ordinal comparison. See `Tile::is_hostile`.
pub const HOSTILE_THRESHOLD: u8 = 15;

/**
 * Rule set A (regular play) only runs while the agent row is strictly below this.
 * Rows at or past it mean the agent is dropping out of the view.
 */
pub const ACTIVE_ROW_LIMIT: usize = 14;

/// The obstacle scan is skipped once the agent row exceeds this.
pub const OBSTACLE_SCAN_MAX_ROW: usize = 14;

/// Distance reported when nothing hostile lies ahead.
pub const FAR_AWAY: f64 = 10_000.0;
