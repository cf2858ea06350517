// engine/src/policy/expert.rs
#![forbid(unsafe_code)]

/*
Expert decision engine

Priority order
--------------
The first matching rule wins. The order below is the intent priority:

  0. agent at/below ACTIVE_ROW_LIMIT  -> Up (off-screen / respawn recovery)
  1. standing on a pipe               -> climb (Up) or dismount (JumpRight)
  2. hostile above and ahead          -> Left
  3. hostile below, previous Right    -> JumpGap (evasive hop)
  4. hostile ahead within 4.5         -> per-kind reaction
  5. gap ahead                        -> gap jump family
  6. power-up box in reach            -> JumpPowerUp
  7. obstacle / stairs ahead          -> JumpObstacle / JumpStairs
  8. agent on the top row             -> Up
  9. otherwise                        -> Right

Afterwards Up following Up is rewritten to Right so the agent never idles
looking up forever.

Rules 2, 3 and the archer row check read the position of the first hostile in
row-major order, while every distance comes from the column-major "ahead"
scan. The two scans can disagree (the row-major hit may be behind the agent);
that is the tuned behavior and is kept as is.
*/

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::{debug, warn};

use crate::perception::{GridPos, HostileSighting, ObstacleKind, Perception};
use crate::world::{ACTIVE_ROW_LIMIT, HostileKind, Tile, TileGrid, WorldFacts};

use super::action::Action;
use super::history::AgentHistory;

const ENEMY_ABOVE_RADIUS: f64 = 6.0;
const ENEMY_BELOW_RADIUS: f64 = 7.0;
const ENEMY_REACT_RADIUS: f64 = 4.5;
const TOAD_RADIUS: f64 = 4.0;
const FLY_RADIUS: f64 = 3.0;
const ARCHER_RADIUS: f64 = 4.0;

/// Open window (SKIP_MIN, SKIP_MAX) where a retreat from a basic hostile becomes a running skip.
const SKIP_MIN: f64 = 1.5;
const SKIP_MAX: f64 = 2.0;
/// After a jump, a basic hostile closer than this triggers a retreat.
const RETREAT_RADIUS: f64 = 5.0;

/// Scroll band in world 1-1 where the gap check fires on a ledge that must not be jumped.
const GAP_GLITCH_X: RangeInclusive<u32> = 2282..=2286;

/// Which priority rule produced a decision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Rule {
    OffScreen,
    Pipe,
    HostileAbove,
    HostileBelow,
    HostileAhead,
    Gap,
    Collectible,
    Obstacle,
    TopRow,
    Advance,
}

impl Rule {
    pub const COUNT: usize = 10;

    pub const ALL: [Rule; Self::COUNT] = [
        Rule::OffScreen,
        Rule::Pipe,
        Rule::HostileAbove,
        Rule::HostileBelow,
        Rule::HostileAhead,
        Rule::Gap,
        Rule::Collectible,
        Rule::Obstacle,
        Rule::TopRow,
        Rule::Advance,
    ];

    /// Position in `ALL`.
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Rule::OffScreen => "off_screen",
            Rule::Pipe => "pipe",
            Rule::HostileAbove => "hostile_above",
            Rule::HostileBelow => "hostile_below",
            Rule::HostileAhead => "hostile_ahead",
            Rule::Gap => "gap",
            Rule::Collectible => "collectible",
            Rule::Obstacle => "obstacle",
            Rule::TopRow => "top_row",
            Rule::Advance => "advance",
        }
    }
}

/// Output of one decision step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub rule: Rule,
    /// True when an Up-after-Up was rewritten to Right.
    pub anti_stall: bool,
    /// Set when a hostile outside the known vocabulary forced the flee branch.
    pub unrecognized: Option<HostileKind>,
    pub perception: Perception,
    /// History to feed into the next step.
    pub history: AgentHistory,
}

/**
 * Map one (grid, facts, history) triple to an action.
 *
 * Total and deterministic: equal inputs always give equal decisions, and no
 * input makes it fail.
 */
pub fn decide(grid: &TileGrid, facts: &WorldFacts, history: &AgentHistory) -> Decision {
    let seen = Perception::observe(grid);
    if !seen.agent_found {
        debug!("agent not found, assuming grid origin");
    }

    let (rule, raw, unrecognized) = evaluate(grid, facts, history, &seen);

    let anti_stall = history.prev_action == Action::Up && raw == Action::Up;
    let action = if anti_stall { Action::Right } else { raw };

    debug!(
        rule = rule.name(),
        action = action.name(),
        prev = history.prev_action.name(),
        row = seen.agent.row,
        col = seen.agent.col,
        x = facts.x_position,
        hostile_dist = seen.hostile_distance(),
        obstacle = ?seen.obstacle,
        gap = seen.gap,
        collectible = seen.collectible,
        anti_stall,
        "decision"
    );

    Decision {
        action,
        rule,
        anti_stall,
        unrecognized,
        perception: seen,
        history: AgentHistory::new(action, facts.x_position),
    }
}

fn evaluate(
    grid: &TileGrid,
    facts: &WorldFacts,
    history: &AgentHistory,
    seen: &Perception,
) -> (Rule, Action, Option<HostileKind>) {
    let agent = seen.agent;
    if agent.row >= ACTIVE_ROW_LIMIT {
        return (Rule::OffScreen, Action::Up, None);
    }

    let prev = history.prev_action;
    let (row, col) = (agent.row as i32, agent.col as i32);
    let dist = seen.hostile_distance();

    // Feet rest two rows below the leading edge.
    if grid.is(row + 2, col, Tile::Pipe) {
        let action = if prev.mounts_pipe() {
            Action::Up
        } else {
            Action::JumpRight
        };
        return (Rule::Pipe, action, None);
    }

    if let Some(h) = seen.any_hostile {
        if h.row < agent.row && h.col > agent.col && dist < ENEMY_ABOVE_RADIUS {
            return (Rule::HostileAbove, Action::Left, None);
        }

        let footing = matches!(grid.at(row + 2, col), Some(t) if t != Tile::Empty);
        if h.row >= agent.row + 2
            && h.row != 0
            && prev == Action::Right
            && footing
            && dist < ENEMY_BELOW_RADIUS
        {
            return (Rule::HostileBelow, Action::JumpGap, None);
        }
    }

    if let Some(h) = seen.hostile_ahead.filter(|h| h.distance <= ENEMY_REACT_RADIUS) {
        let (action, unrecognized) = react_to_hostile(&h, prev, agent, seen.any_hostile);
        return (Rule::HostileAhead, action, unrecognized);
    }

    if seen.gap {
        let action = if facts.is_level(1, 1) && GAP_GLITCH_X.contains(&facts.x_position) {
            Action::Up
        } else if facts.is_level(1, 2) {
            Action::JumpGapShort
        } else if prev.is_gap_jump() {
            Action::Left
        } else if prev == Action::Up {
            Action::JumpBigGap
        } else {
            Action::JumpGap
        };
        return (Rule::Gap, action, None);
    }

    if seen.collectible {
        let action = match prev {
            Action::JumpPowerUp => Action::Right,
            // Pause a step so the box can be re-checked after landing.
            Action::Jump => Action::Up,
            _ => Action::JumpPowerUp,
        };
        return (Rule::Collectible, action, None);
    }

    if let Some(kind) = seen.obstacle {
        // Unchanged x doubles as "stuck against a step".
        let action = if history.prev_x == facts.x_position && kind == ObstacleKind::Stairs {
            Action::JumpStairs
        } else if prev == Action::JumpObstacle {
            Action::Right
        } else {
            Action::JumpObstacle
        };
        return (Rule::Obstacle, action, None);
    }

    if agent.row == 0 {
        return (Rule::TopRow, Action::Up, None);
    }

    (Rule::Advance, Action::Right, None)
}

fn react_to_hostile(
    h: &HostileSighting,
    prev: Action,
    agent: GridPos,
    first_hostile: Option<GridPos>,
) -> (Action, Option<HostileKind>) {
    let d = h.distance;
    match h.kind {
        HostileKind::Basic => (react_to_basic(prev, d), None),
        HostileKind::Toad if d <= TOAD_RADIUS => (hop_or_back_off(prev), None),
        HostileKind::Fly if d <= FLY_RADIUS => (hop_or_back_off(prev), None),
        HostileKind::Archer
            if d <= ARCHER_RADIUS && first_hostile.is_some_and(|p| p.row == agent.row) =>
        {
            (hop_or_back_off(prev), None)
        }
        kind if kind.is_known() => (Action::Right, None),
        kind => {
            warn!(code = kind.code(), distance = d, "unrecognized hostile, fleeing right");
            (Action::Right, Some(kind))
        }
    }
}

fn react_to_basic(prev: Action, d: f64) -> Action {
    match prev {
        Action::Right => Action::Jump,
        Action::EnemyLeft if d > SKIP_MIN && d < SKIP_MAX => Action::JumpSkipEnemy,
        Action::EnemyLeft if d >= SKIP_MIN => Action::Jump,
        // Cannot jump again while airborne.
        Action::Jump if d < RETREAT_RADIUS => Action::EnemyLeft,
        Action::Jump => Action::JumpRight,
        _ => Action::Jump,
    }
}

fn hop_or_back_off(prev: Action) -> Action {
    if prev == Action::Jump {
        Action::Left
    } else {
        Action::Jump
    }
}
