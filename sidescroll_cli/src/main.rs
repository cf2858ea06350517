// src/main.rs
#![forbid(unsafe_code)]

mod rollout;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::rollout::{NoopSink, Runner, RunnerConfig, StepSink, TableSink, TraceRuntime, load_trace};
use sidescroll_engine::{ActionExecutor, Agent, ExecutorConfig, ExpertPolicy};

#[derive(Parser, Debug)]
#[command(name = "sidescroll_cli")]
struct Args {
    // ---------------- input ----------------
    /// Recorded trace: JSON Lines of {"facts": {...}, "grid": [[u8; 20]; 16]}.
    #[arg(long)]
    trace: PathBuf,

    /// Emulator ticks each trace frame stays on screen.
    #[arg(long, default_value_t = 10)]
    frame_ticks: u32,

    // ---------------- agent ----------------
    /// Ticks in one action period; every recipe duration scales with it.
    #[arg(long, default_value_t = ExecutorConfig::DEFAULT_ACTION_PERIOD)]
    action_period: u32,

    /// Stop after N decisions even if the trace continues.
    #[arg(long)]
    max_steps: Option<u64>,

    // ---------------- visualization ----------------
    /**
     * Render the tile grid as ASCII every step; value is sleep in ms. Omit to disable rendering.
     * Examples:
     *   --render 0    (render as fast as possible)
     *   --render 30   (sleep 30ms between frames)
     */
    #[arg(long, value_name = "ms")]
    render: Option<u64>,

    // ---------------- output / reporting ----------------
    /// Verbosity: 0=silent (final summary only), 1=progress bar, 2=progress bar + periodic table.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,

    /// Print a table row every N steps (only used with --verbosity 2).
    #[arg(long, default_value_t = 50)]
    report_every: u64,

    /// Write the end-of-run summary as pretty JSON to this path.
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so the progress bar and DONE line stay clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let frames = load_trace(&args.trace)?;
    info!(frames = frames.len(), trace = %args.trace.display(), "trace loaded");

    let mut rt = TraceRuntime::new(frames, args.frame_ticks);
    let executor = ActionExecutor::new(ExecutorConfig {
        action_period: args.action_period.max(1),
    });
    let mut agent = Agent::new(ExpertPolicy::new(), executor);

    // Replay configuration (data only; no logic).
    let cfg = RunnerConfig {
        max_steps: args.max_steps,
        trace_name: args.trace.display().to_string(),
        verbosity: args.verbosity,
        report_every: args.report_every,
        render_ms: args.render,
    };

    let sink: Box<dyn StepSink> = if cfg.verbosity >= 2 && cfg.report_every > 0 {
        Box::new(TableSink::new(20))
    } else {
        Box::new(NoopSink)
    };

    let mut runner = Runner::new(cfg, sink);
    let report = runner.run(&mut agent, &mut rt)?;

    if rt.latch().any_held() {
        warn!(held = ?rt.latch().held(), "inputs still held after the run");
    }

    if let Some(path) = &args.summary {
        let json = serde_json::to_string_pretty(&report).context("serializing summary")?;
        fs::write(path, json).with_context(|| format!("failed writing {}", path.display()))?;
        info!(path = %path.display(), "summary written");
    }

    // Final one-line summary (useful for logs / grep).
    println!(
        "DONE: trace={} frames={} steps_done={} ticks={} elapsed={:.3}s steps/s={:.1} max_x={} world={}-{} final_x={} game_over={} stopped_early={} anti_stall={} unknown_hostiles={} agent_missing={}",
        report.trace,
        report.frames_total,
        report.steps_done,
        rt.ticks(),
        report.elapsed_s,
        report.steps_per_s,
        report.max_x,
        report.final_facts.world,
        report.final_facts.stage,
        report.final_facts.x_position,
        report.final_facts.game_over,
        report.stopped_early,
        report.anti_stall,
        report.unrecognized_hostiles,
        report.agent_missing,
    );

    Ok(())
}
