// engine/src/policy/action.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::io::Button;

/**
 * Closed set of intents the decision engine can emit.
 *
 * The first six map to a single button. The rest are compound: each carries a
 * fixed timing recipe (see `actuation::recipe`) and is never parameterized at
 * the call site.
 */
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    Down,
    Left,
    Right,
    Up,
    Jump,
    PressB,
    JumpObstacle,
    JumpGap,
    JumpPowerUp,
    JumpSkipEnemy,
    JumpRight,
    EnemyLeft,
    JumpStairs,
    TunnelLeft,
    JumpBigGap,
    JumpGapShort,
}

impl Action {
    pub const COUNT: usize = 16;

    pub const ALL: [Action; Self::COUNT] = [
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Jump,
        Action::PressB,
        Action::JumpObstacle,
        Action::JumpGap,
        Action::JumpPowerUp,
        Action::JumpSkipEnemy,
        Action::JumpRight,
        Action::EnemyLeft,
        Action::JumpStairs,
        Action::TunnelLeft,
        Action::JumpBigGap,
        Action::JumpGapShort,
    ];

    /// Stable 0..COUNT id, identical to the position in `ALL`.
    pub fn idx(self) -> usize {
        use Action::*;
        match self {
            Down => 0,
            Left => 1,
            Right => 2,
            Up => 3,
            Jump => 4,
            PressB => 5,
            JumpObstacle => 6,
            JumpGap => 7,
            JumpPowerUp => 8,
            JumpSkipEnemy => 9,
            JumpRight => 10,
            EnemyLeft => 11,
            JumpStairs => 12,
            TunnelLeft => 13,
            JumpBigGap => 14,
            JumpGapShort => 15,
        }
    }

    pub fn from_idx(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn name(self) -> &'static str {
        use Action::*;
        match self {
            Down => "down",
            Left => "left",
            Right => "right",
            Up => "up",
            Jump => "jump",
            PressB => "press_b",
            JumpObstacle => "jump_obstacle",
            JumpGap => "jump_gap",
            JumpPowerUp => "jump_power_up",
            JumpSkipEnemy => "jump_skip_enemy",
            JumpRight => "jump_right",
            EnemyLeft => "enemy_left",
            JumpStairs => "jump_stairs",
            TunnelLeft => "tunnel_left",
            JumpBigGap => "jump_big_gap",
            JumpGapShort => "jump_gap_short",
        }
    }

    /// Button for a single-input action. None for compound intents.
    pub fn button(self) -> Option<Button> {
        use Action::*;
        match self {
            Down => Some(Button::Down),
            Left => Some(Button::Left),
            Right => Some(Button::Right),
            Up => Some(Button::Up),
            Jump => Some(Button::A),
            PressB => Some(Button::B),
            _ => None,
        }
    }

    pub fn is_compound(self) -> bool {
        self.button().is_none()
    }

    /// Jumps after which standing on a pipe means "keep climbing".
    pub fn mounts_pipe(self) -> bool {
        matches!(
            self,
            Action::Jump | Action::JumpGap | Action::JumpObstacle | Action::JumpPowerUp
        )
    }

    pub fn is_gap_jump(self) -> bool {
        matches!(
            self,
            Action::JumpGap | Action::JumpBigGap | Action::JumpGapShort
        )
    }
}
