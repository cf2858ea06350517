// src/rollout/runner.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use sidescroll_engine::{Agent, Policy, SensorError, StepOutcome, WorldSensor};

use super::sinks::{ReportRow, StepSink};
use super::stats::{RunStats, RunSummary};
use super::trace::TraceRuntime;

/// Fixed internal cadence for progress-bar live message updates.
const LIVE_EVERY: u64 = 20;

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    // ---------------- core replay ----------------
    /// Stop after this many decisions even if the trace has frames left.
    pub max_steps: Option<u64>,

    /// Used only for the final report.
    pub trace_name: String,

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    /// 2 = progress bar + periodic table (via sink)
    pub verbosity: u8,

    /// Print a table row every N steps (only used when verbosity == 2).
    /// 0 disables table reporting.
    pub report_every: u64,

    // ---------------- rendering ----------------
    /// If Some(ms): render every step; sleep ms between frames (0 = no sleep).
    pub render_ms: Option<u64>,
}

pub struct Runner {
    cfg: RunnerConfig,
    sink: Box<dyn StepSink>,
}

impl Runner {
    pub fn new(cfg: RunnerConfig, sink: Box<dyn StepSink>) -> Self {
        Self { cfg, sink }
    }

    /// Replay the trace through the agent until game over (or `max_steps`).
    pub fn run<P: Policy>(
        &mut self,
        agent: &mut Agent<P>,
        rt: &mut TraceRuntime,
    ) -> Result<RunSummary> {
        let cfg = self.cfg.clone();

        // Progress tracks trace frames, not decisions: one decision spans a variable tick count.
        let pb = if cfg.verbosity >= 1 {
            let pb = ProgressBar::new(rt.len() as u64);
            pb.set_style(
                ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {pos:>7}/{len:<7}  {percent:>3}%  {elapsed_precise}  {msg}",
                )
                .context("progress template")?
                .progress_chars("=>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut stats = RunStats::new();
        let mut stopped_early = false;

        loop {
            if rt.is_game_over()? {
                break;
            }
            if cfg.max_steps.is_some_and(|n| stats.steps_done >= n) {
                stopped_early = true;
                break;
            }

            let outcome = agent.step(rt).map_err(|e| step_error(e, rt))?;
            stats.on_step(&outcome);

            if let Some(ref pb) = pb {
                pb.set_position(rt.cursor().min(rt.len()) as u64);
            }

            if let Some(ms) = cfg.render_ms {
                self.render(&outcome, &stats, pb.as_ref());
                if ms > 0 {
                    std::thread::sleep(Duration::from_millis(ms));
                }
            }

            if cfg.verbosity == 2
                && cfg.report_every > 0
                && (stats.steps_done % cfg.report_every == 0)
            {
                let row = ReportRow {
                    step: stats.steps_done,
                    frame: rt.cursor(),
                    frames_total: rt.len(),
                    sps: stats.steps_per_sec(),
                    x: stats.last_x,
                    max_x: stats.max_x,
                    action: outcome.decision.action.name(),
                    rule: outcome.decision.rule.name(),
                    anti_stall: stats.anti_stall,
                    unrecognized: stats.unrecognized_hostiles,
                    agent_missing: stats.agent_missing,
                };
                self.sink.on_report_row(&row, pb.as_ref());
            }

            if cfg.verbosity >= 1 && (stats.steps_done % LIVE_EVERY == 0) {
                if let Some(ref pb) = pb {
                    pb.set_message(stats.live_msg());
                }
            }
        }

        let final_facts = agent.current_facts(rt)?;

        if let Some(pb) = pb {
            pb.finish_with_message(if stopped_early { "stopped" } else { "game over" });
        }

        Ok(stats.final_report(&cfg.trace_name, rt.len(), final_facts, stopped_early))
    }

    fn render(&self, o: &StepOutcome, stats: &RunStats, pb: Option<&ProgressBar>) {
        let d = &o.decision;
        let text = format!(
            "step={} x={} action={} rule={}{}\n{}",
            stats.steps_done,
            o.snapshot.facts.x_position,
            d.action.name(),
            d.rule.name(),
            if d.anti_stall { " (anti-stall)" } else { "" },
            o.snapshot.grid.render_ascii(),
        );
        match pb {
            Some(pb) => pb.println(text),
            None => print!("{text}"),
        }
    }
}

fn step_error(e: SensorError, rt: &TraceRuntime) -> anyhow::Error {
    anyhow::Error::new(e).context(format!("step failed at frame {}", rt.cursor()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollout::sinks::NoopSink;
    use sidescroll_engine::{
        ActionExecutor, ExpertPolicy, GRID_H, GRID_W, Snapshot, Tile, WorldFacts,
    };

    fn ground_frames(n: u32) -> Vec<Snapshot> {
        (0..n)
            .map(|i| {
                let mut s = Snapshot::default();
                for r in 10..=11 {
                    for c in 4..=5 {
                        s.grid.set(r, c, Tile::Agent);
                    }
                }
                for r in 12..GRID_H {
                    for c in 0..GRID_W {
                        s.grid.set(r, c, Tile::Ground);
                    }
                }
                s.facts = WorldFacts {
                    x_position: 100 + i * 8,
                    world: 1,
                    stage: 1,
                    game_over: false,
                };
                s
            })
            .collect()
    }

    fn cfg(max_steps: Option<u64>) -> RunnerConfig {
        RunnerConfig {
            max_steps,
            trace_name: "mem".into(),
            verbosity: 0,
            report_every: 0,
            render_ms: None,
        }
    }

    #[test]
    fn replays_until_trace_ends() {
        let mut rt = TraceRuntime::new(ground_frames(5), 10);
        let mut agent = Agent::new(ExpertPolicy::new(), ActionExecutor::default());
        let mut runner = Runner::new(cfg(None), Box::new(NoopSink));

        let s = runner.run(&mut agent, &mut rt).unwrap();
        assert_eq!(s.steps_done, 5);
        assert_eq!(s.ticks, 50);
        assert_eq!(s.max_x, 132);
        assert_eq!(s.actions.get("right"), Some(&5));
        assert!(s.final_facts.game_over);
        assert!(!s.stopped_early);
    }

    #[test]
    fn max_steps_stops_early() {
        let mut rt = TraceRuntime::new(ground_frames(5), 10);
        let mut agent = Agent::new(ExpertPolicy::new(), ActionExecutor::default());
        let mut runner = Runner::new(cfg(Some(2)), Box::new(NoopSink));

        let s = runner.run(&mut agent, &mut rt).unwrap();
        assert_eq!(s.steps_done, 2);
        assert!(s.stopped_early);
        assert_eq!(s.final_facts.x_position, 116);
    }
}
