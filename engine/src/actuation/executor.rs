// engine/src/actuation/executor.rs
#![forbid(unsafe_code)]

use tracing::{trace, warn};

use crate::io::{Actuator, Button, FrameStepper, SensorError};
use crate::policy::Action;

use super::recipe::recipe;

/// Flat actuator program for one action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Instruction {
    Hold(Button),
    /// Block for this many emulator ticks.
    Wait(u32),
    Release(Button),
}

/// Expand an action's recipe for a given action period (in ticks).
///
/// Zero-length waits are dropped; the settle release is always last.
pub fn plan(action: Action, period: u32) -> Vec<Instruction> {
    let recipe = recipe(action);
    debug_assert_eq!(recipe.action, action);
    debug_assert!(!recipe.settle.is_compound());

    let mut out = Vec::with_capacity(recipe.phases.len() * 4 + 1);
    for phase in recipe.phases {
        out.extend(phase.hold.iter().map(|&b| Instruction::Hold(b)));
        let ticks = phase.ticks(period);
        if ticks > 0 {
            out.push(Instruction::Wait(ticks));
        }
        out.extend(phase.release.iter().map(|&b| Instruction::Release(b)));
    }
    if let Some(b) = recipe.settle.button() {
        out.push(Instruction::Release(b));
    }
    out
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExecutorConfig {
    /// Ticks in one action period (P).
    pub action_period: u32,
}

impl ExecutorConfig {
    pub const DEFAULT_ACTION_PERIOD: u32 = 10;
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            action_period: Self::DEFAULT_ACTION_PERIOD,
        }
    }
}

/// Runs recipes against an actuator, blocking on the frame stepper during waits.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionExecutor {
    cfg: ExecutorConfig,
}

impl ActionExecutor {
    pub fn new(cfg: ExecutorConfig) -> Self {
        Self { cfg }
    }

    pub fn action_period(&self) -> u32 {
        self.cfg.action_period
    }

    /// Run `action` to completion. Returns the number of ticks advanced.
    ///
    /// There is no mid-action cancellation; only a sensor failure stops it early,
    /// and then every button the plan held so far is released before the error
    /// is returned.
    pub fn execute<R>(&self, action: Action, rt: &mut R) -> Result<u32, SensorError>
    where
        R: Actuator + FrameStepper + ?Sized,
    {
        let mut ticks = 0u32;
        let mut touched = [false; Button::COUNT];
        for ins in plan(action, self.cfg.action_period) {
            trace!(?ins, action = action.name(), "actuate");
            match ins {
                Instruction::Hold(b) => {
                    touched[b.idx()] = true;
                    rt.hold(b);
                }
                Instruction::Release(b) => rt.release(b),
                Instruction::Wait(n) => {
                    for _ in 0..n {
                        if let Err(e) = rt.advance_frame() {
                            warn!(action = action.name(), ticks, "frame advance failed mid-action");
                            for b in Button::ALL.into_iter().filter(|b| touched[b.idx()]) {
                                rt.release(b);
                            }
                            return Err(e);
                        }
                        ticks += 1;
                    }
                }
            }
        }
        Ok(ticks)
    }
}
