// engine/src/agent.rs
#![forbid(unsafe_code)]

use tracing::{debug, info};

use crate::actuation::ActionExecutor;
use crate::io::{GameRuntime, SensorError, Snapshot, sample};
use crate::policy::{Decision, Policy};
use crate::world::WorldFacts;

#[derive(Clone, Copy, Debug)]
pub struct StepOutcome {
    pub snapshot: Snapshot,
    pub decision: Decision,
    /// Emulator ticks spent actuating the decision.
    pub ticks: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct RunEnd {
    pub steps: u64,
    pub ticks: u64,
    /// Facts sampled after the game-over report, for result sinks.
    pub final_facts: WorldFacts,
}

/**
 * Single-threaded decision loop: sample -> decide -> actuate.
 *
 * A step that has started always runs its actuation to completion before the
 * next one begins; the only suspension point is the runtime's frame advance.
 */
pub struct Agent<P: Policy> {
    policy: P,
    executor: ActionExecutor,
    steps: u64,
    ticks: u64,
}

impl<P: Policy> Agent<P> {
    pub fn new(policy: P, executor: ActionExecutor) -> Self {
        Self {
            policy,
            executor,
            steps: 0,
            ticks: 0,
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn step<R>(&mut self, rt: &mut R) -> Result<StepOutcome, SensorError>
    where
        R: GameRuntime + ?Sized,
    {
        let snapshot = sample(rt)?;
        let decision = self.policy.decide(&snapshot);
        let ticks = self.executor.execute(decision.action, rt)?;

        self.steps += 1;
        self.ticks += u64::from(ticks);

        Ok(StepOutcome {
            snapshot,
            decision,
            ticks,
        })
    }

    /// Step until the runtime reports game over. `on_step` sees every outcome.
    pub fn play<R, F>(&mut self, rt: &mut R, mut on_step: F) -> Result<RunEnd, SensorError>
    where
        R: GameRuntime + ?Sized,
        F: FnMut(&StepOutcome),
    {
        while !rt.is_game_over()? {
            let outcome = self.step(rt)?;
            on_step(&outcome);
        }
        let final_facts = self.current_facts(rt)?;
        info!(
            steps = self.steps,
            ticks = self.ticks,
            world = final_facts.world,
            stage = final_facts.stage,
            x = final_facts.x_position,
            "game over"
        );
        Ok(RunEnd {
            steps: self.steps,
            ticks: self.ticks,
            final_facts,
        })
    }

    /// Current facts on demand.
    pub fn current_facts<R>(&self, rt: &mut R) -> Result<WorldFacts, SensorError>
    where
        R: GameRuntime + ?Sized,
    {
        let facts = rt.sample_facts()?;
        debug!(?facts, "current facts");
        Ok(facts)
    }
}
