// src/rollout/stats.rs
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;

use sidescroll_engine::{Action, Rule, StepOutcome, WorldFacts};

#[derive(Clone, Debug)]
pub struct RunStats {
    pub steps_done: u64,
    pub ticks: u64,

    pub action_counts: [u64; Action::COUNT],
    pub rule_counts: [u64; Rule::COUNT],

    /// Up-after-Up decisions rewritten to Right.
    pub anti_stall: u64,
    pub unrecognized_hostiles: u64,
    pub agent_missing: u64,

    pub max_x: u32,
    pub last_x: u32,
    pub last_action: Option<Action>,
    pub last_rule: Option<Rule>,

    t0: Instant,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            steps_done: 0,
            ticks: 0,
            action_counts: [0; Action::COUNT],
            rule_counts: [0; Rule::COUNT],
            anti_stall: 0,
            unrecognized_hostiles: 0,
            agent_missing: 0,
            max_x: 0,
            last_x: 0,
            last_action: None,
            last_rule: None,
            t0: Instant::now(),
        }
    }

    /// Call once per decision step.
    pub fn on_step(&mut self, o: &StepOutcome) {
        let d = &o.decision;
        self.steps_done += 1;
        self.ticks += u64::from(o.ticks);

        self.action_counts[d.action.idx()] += 1;
        self.rule_counts[d.rule.idx()] += 1;
        self.anti_stall += u64::from(d.anti_stall);
        self.unrecognized_hostiles += u64::from(d.unrecognized.is_some());
        self.agent_missing += u64::from(!d.perception.agent_found);

        let x = o.snapshot.facts.x_position;
        self.max_x = self.max_x.max(x);
        self.last_x = x;
        self.last_action = Some(d.action);
        self.last_rule = Some(d.rule);
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn steps_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.steps_done as f64 / dt
        } else {
            0.0
        }
    }

    /// Most frequent action so far, ties resolved by ordinal.
    pub fn top_action(&self) -> Option<Action> {
        let (i, &n) = self
            .action_counts
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))?;
        if n == 0 { None } else { Action::from_idx(i) }
    }

    pub fn live_msg(&self) -> String {
        format!(
            "sps={:.1} x={} max_x={} last={}/{} top={} anti_stall={} unknown={}",
            self.steps_per_sec(),
            self.last_x,
            self.max_x,
            self.last_action.map_or("-", Action::name),
            self.last_rule.map_or("-", Rule::name),
            self.top_action().map_or("-", Action::name),
            self.anti_stall,
            self.unrecognized_hostiles,
        )
    }

    pub fn final_report(
        &self,
        trace: &str,
        frames_total: usize,
        final_facts: WorldFacts,
        stopped_early: bool,
    ) -> RunSummary {
        let actions = Action::ALL
            .iter()
            .filter(|a| self.action_counts[a.idx()] > 0)
            .map(|a| (a.name().to_string(), self.action_counts[a.idx()]))
            .collect();
        let rules = Rule::ALL
            .iter()
            .filter(|r| self.rule_counts[r.idx()] > 0)
            .map(|r| (r.name().to_string(), self.rule_counts[r.idx()]))
            .collect();

        RunSummary {
            trace: trace.to_string(),
            frames_total,
            steps_done: self.steps_done,
            ticks: self.ticks,
            elapsed_s: self.elapsed_secs(),
            steps_per_s: self.steps_per_sec(),
            max_x: self.max_x,
            anti_stall: self.anti_stall,
            unrecognized_hostiles: self.unrecognized_hostiles,
            agent_missing: self.agent_missing,
            actions,
            rules,
            final_facts,
            stopped_early,
        }
    }
}

/// End-of-run record; also what `--summary` writes as JSON.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub trace: String,
    pub frames_total: usize,

    pub steps_done: u64,
    pub ticks: u64,
    pub elapsed_s: f64,
    pub steps_per_s: f64,

    pub max_x: u32,
    pub anti_stall: u64,
    pub unrecognized_hostiles: u64,
    pub agent_missing: u64,

    pub actions: BTreeMap<String, u64>,
    pub rules: BTreeMap<String, u64>,

    pub final_facts: WorldFacts,
    /// True when `--max-steps` cut the run before game over.
    pub stopped_early: bool,
}
