// engine/src/actuation/recipe.rs
#![forbid(unsafe_code)]

/*
Timing recipes

Each action maps to an ordered list of phases. A phase holds some buttons,
waits a number of ticks, then releases some (possibly none) of them. Durations
are stored in tenths of one action period P so 0.2P stays an integer:

    ticks = P * tenths / 10        (truncating, 0.2P at P=10 is 2 ticks)

After the last phase the buttons of `settle` (the remaining logical action)
are released unconditionally, so nothing stays latched between steps no matter
which recipe ran. Adding a compound action means adding a row to `RECIPES`.
*/

use crate::io::Button;
use crate::io::Button::{A, Down, Left, Right, Up};
use crate::policy::Action;

/// One action period, in tenths.
const P: u32 = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Phase {
    pub hold: &'static [Button],
    /// Duration in tenths of an action period.
    pub tenths: u32,
    pub release: &'static [Button],
}

impl Phase {
    pub const fn hold(hold: &'static [Button], tenths: u32) -> Self {
        Self {
            hold,
            tenths,
            release: &[],
        }
    }

    pub const fn hold_release(
        hold: &'static [Button],
        tenths: u32,
        release: &'static [Button],
    ) -> Self {
        Self {
            hold,
            tenths,
            release,
        }
    }

    #[inline]
    pub fn ticks(&self, period: u32) -> u32 {
        period.saturating_mul(self.tenths) / P
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Recipe {
    pub action: Action,
    pub phases: &'static [Phase],
    /// Single-button action whose input is released once all phases ran.
    pub settle: Action,
}

impl Recipe {
    pub fn total_tenths(&self) -> u32 {
        self.phases.iter().map(|p| p.tenths).sum()
    }
}

/// Indexed by `Action::idx()`.
pub static RECIPES: [Recipe; Action::COUNT] = [
    Recipe {
        action: Action::Down,
        phases: &[Phase::hold(&[Down], P)],
        settle: Action::Down,
    },
    Recipe {
        action: Action::Left,
        phases: &[Phase::hold(&[Left], P)],
        settle: Action::Left,
    },
    Recipe {
        action: Action::Right,
        phases: &[Phase::hold(&[Right], P)],
        settle: Action::Right,
    },
    Recipe {
        action: Action::Up,
        phases: &[Phase::hold(&[Up], P)],
        settle: Action::Up,
    },
    Recipe {
        action: Action::Jump,
        phases: &[Phase::hold(&[A], P)],
        settle: Action::Jump,
    },
    Recipe {
        action: Action::PressB,
        phases: &[Phase::hold(&[Button::B], P)],
        settle: Action::PressB,
    },
    Recipe {
        action: Action::JumpObstacle,
        phases: &[Phase::hold(&[A], 10 * P)],
        settle: Action::Jump,
    },
    Recipe {
        action: Action::JumpGap,
        phases: &[Phase::hold_release(&[A, Right], 5 * P, &[A])],
        settle: Action::Right,
    },
    Recipe {
        action: Action::JumpPowerUp,
        phases: &[Phase::hold(&[A], P)],
        settle: Action::Jump,
    },
    Recipe {
        action: Action::JumpSkipEnemy,
        phases: &[Phase::hold_release(&[A, Right], 2 * P, &[Right])],
        settle: Action::Jump,
    },
    Recipe {
        action: Action::JumpRight,
        phases: &[Phase::hold_release(&[A, Right], P, &[Right])],
        settle: Action::Jump,
    },
    Recipe {
        action: Action::EnemyLeft,
        phases: &[Phase::hold(&[Left], P)],
        settle: Action::Left,
    },
    Recipe {
        action: Action::JumpStairs,
        phases: &[
            Phase::hold_release(&[Left], P / 5, &[Left]),
            Phase::hold(&[Right], P),
            Phase::hold_release(&[A], P, &[A]),
        ],
        settle: Action::Right,
    },
    Recipe {
        action: Action::TunnelLeft,
        phases: &[Phase::hold(&[Left], 2 * P)],
        settle: Action::Left,
    },
    Recipe {
        action: Action::JumpBigGap,
        phases: &[Phase::hold_release(&[A], 10 * P, &[A])],
        settle: Action::Right,
    },
    Recipe {
        action: Action::JumpGapShort,
        phases: &[Phase::hold_release(&[A, Right], P, &[A])],
        settle: Action::Right,
    },
];

pub fn recipe(action: Action) -> &'static Recipe {
    &RECIPES[action.idx()]
}
