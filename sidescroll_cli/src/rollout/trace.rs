// src/rollout/trace.rs
#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use sidescroll_engine::{
    Actuator, Button, FrameStepper, InputLatch, SensorError, Snapshot, TileGrid, WorldFacts,
    WorldSensor,
};

/// One recorded frame, as stored on a trace line.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraceFrame {
    pub facts: WorldFacts,
    /// 16 rows of 20 tile codes.
    pub grid: Vec<Vec<u8>>,
}

impl TraceFrame {
    #[cfg(test)]
    pub fn from_snapshot(s: &Snapshot) -> Self {
        Self {
            facts: s.facts,
            grid: s.grid.to_code_rows().iter().map(|r| r.to_vec()).collect(),
        }
    }

    pub fn into_snapshot(self) -> Result<Snapshot> {
        let grid = TileGrid::from_rows(self.grid.as_slice())?;
        Ok(Snapshot {
            grid,
            facts: self.facts,
        })
    }
}

pub fn load_trace(path: &Path) -> Result<Vec<Snapshot>> {
    let f = File::open(path).with_context(|| format!("failed opening trace {}", path.display()))?;
    parse_trace(BufReader::new(f))
        .with_context(|| format!("invalid trace {}", path.display()))
}

/// Parse JSON Lines; blank lines are skipped, errors carry the 1-based line number.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<Snapshot>> {
    let mut frames = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("line {}: read failed", i + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: TraceFrame =
            serde_json::from_str(&line).with_context(|| format!("line {}: bad frame", i + 1))?;
        frames.push(
            frame
                .into_snapshot()
                .with_context(|| format!("line {}: bad grid", i + 1))?,
        );
    }
    if frames.is_empty() {
        bail!("trace has no frames");
    }
    Ok(frames)
}

/**
 * Game runtime backed by a recorded trace.
 *
 * Frame `k` stays on screen for `frame_ticks` emulator ticks. The game is over
 * once the current frame says so or the trace runs out. Reading the grid past
 * the end fails; facts past the end repeat the last frame, flagged as over, so
 * the final report still has a position.
 */
pub struct TraceRuntime {
    frames: Vec<Snapshot>,
    frame_ticks: u32,
    tick: u64,
    latch: InputLatch,
}

impl TraceRuntime {
    pub fn new(frames: Vec<Snapshot>, frame_ticks: u32) -> Self {
        Self {
            frames,
            frame_ticks: frame_ticks.max(1),
            tick: 0,
            latch: InputLatch::new(),
        }
    }

    pub fn cursor(&self) -> usize {
        (self.tick / u64::from(self.frame_ticks)) as usize
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn latch(&self) -> &InputLatch {
        &self.latch
    }

    fn current(&self) -> Option<&Snapshot> {
        self.frames.get(self.cursor())
    }
}

impl WorldSensor for TraceRuntime {
    fn sample_grid(&mut self) -> Result<TileGrid, SensorError> {
        self.current().map(|s| s.grid).ok_or_else(|| {
            SensorError::Unavailable(format!(
                "trace exhausted at frame {} of {}",
                self.cursor(),
                self.frames.len()
            ))
        })
    }

    fn sample_facts(&mut self) -> Result<WorldFacts, SensorError> {
        if let Some(s) = self.current() {
            return Ok(s.facts);
        }
        match self.frames.last() {
            Some(s) => Ok(WorldFacts {
                game_over: true,
                ..s.facts
            }),
            None => Err(SensorError::Unavailable("empty trace".into())),
        }
    }

    fn is_game_over(&mut self) -> Result<bool, SensorError> {
        Ok(self.current().map_or(true, |s| s.facts.game_over))
    }
}

impl FrameStepper for TraceRuntime {
    fn advance_frame(&mut self) -> Result<(), SensorError> {
        self.tick += 1;
        Ok(())
    }
}

impl Actuator for TraceRuntime {
    fn hold(&mut self, button: Button) {
        self.latch.hold(button);
    }

    fn release(&mut self, button: Button) {
        self.latch.release(button);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidescroll_engine::{Action, ActionExecutor, Agent, ExpertPolicy, Tile};

    fn frame(x: u32, game_over: bool) -> String {
        let mut s = Snapshot::default();
        s.grid.set(10, 5, Tile::Agent);
        s.facts = WorldFacts {
            x_position: x,
            world: 1,
            stage: 1,
            game_over,
        };
        serde_json::to_string(&TraceFrame::from_snapshot(&s)).unwrap()
    }

    #[test]
    fn parses_lines_and_skips_blanks() {
        let text = format!("{}\n\n{}\n", frame(1, false), frame(2, true));
        let frames = parse_trace(text.as_bytes()).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].facts.x_position, 1);
        assert!(frames[1].facts.game_over);
        assert_eq!(frames[0].grid.at(10, 5), Some(Tile::Agent));
    }

    #[test]
    fn missing_game_over_defaults_to_false() {
        let rows = vec![vec![0u8; 20]; 16];
        let line = serde_json::json!({
            "facts": {"x_position": 7, "world": 1, "stage": 2},
            "grid": rows,
        })
        .to_string();
        let frames = parse_trace(line.as_bytes()).unwrap();
        assert!(!frames[0].facts.game_over);
        assert_eq!(frames[0].facts.stage, 2);
    }

    #[test]
    fn bad_line_reports_its_number() {
        let text = format!("{}\nnot json\n", frame(1, false));
        let err = parse_trace(text.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"), "{err:#}");
    }

    #[test]
    fn wrong_grid_shape_is_rejected() {
        let line = serde_json::json!({
            "facts": {"x_position": 0, "world": 1, "stage": 1},
            "grid": vec![vec![0u8; 20]; 15],
        })
        .to_string();
        let err = parse_trace(line.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("line 1"), "{err:#}");
    }

    #[test]
    fn empty_trace_is_an_error() {
        assert!(parse_trace("\n\n".as_bytes()).is_err());
    }

    #[test]
    fn runtime_advances_frames_by_ticks() {
        let text = format!("{}\n{}\n", frame(1, false), frame(2, false));
        let mut rt = TraceRuntime::new(parse_trace(text.as_bytes()).unwrap(), 3);
        assert_eq!(rt.sample_facts().unwrap().x_position, 1);
        for _ in 0..3 {
            rt.advance_frame().unwrap();
        }
        assert_eq!(rt.sample_facts().unwrap().x_position, 2);
        for _ in 0..3 {
            rt.advance_frame().unwrap();
        }
        assert!(rt.is_game_over().unwrap());
        assert!(rt.sample_grid().is_err());
        let last = rt.sample_facts().unwrap();
        assert_eq!(last.x_position, 2);
        assert!(last.game_over);
    }

    #[test]
    fn agent_replays_trace_to_the_end() {
        let text = (0..4).map(|x| frame(x, false)).collect::<Vec<_>>().join("\n");
        let mut rt = TraceRuntime::new(parse_trace(text.as_bytes()).unwrap(), 10);
        let mut agent = Agent::new(ExpertPolicy::new(), ActionExecutor::default());
        let end = agent.play(&mut rt, |_| {}).unwrap();
        assert!(end.steps > 0);
        assert!(end.final_facts.game_over);
        assert!(!rt.latch().any_held());
        assert_ne!(agent.policy().history().prev_action, Action::Down);
    }
}
