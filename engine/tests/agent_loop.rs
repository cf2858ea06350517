// engine/tests/agent_loop.rs
#![forbid(unsafe_code)]

/**
 * Agent loop tests.
 *
 * Purpose:
 * - Drive `Agent` against a scripted runtime and check loop-level contracts:
 *   termination on game over, inputs released between steps, history carried
 *   from one decision to the next, and sensor failures aborting the run.
 *
 * How the tests work:
 * - `Scripted` plays back a list of snapshots; each one stays on screen for
 *   `frame_ticks` emulator ticks. Running past the last snapshot or landing
 *   on one whose facts say game over ends the game.
 */
use sidescroll_engine::{
    Action, ActionExecutor, Actuator, Agent, Button, ExecutorConfig, ExpertPolicy, FrameStepper,
    GRID_H, GRID_W, InputLatch, Rule, SensorError, Snapshot, Tile, TileGrid, WorldFacts,
    WorldSensor,
};

struct Scripted {
    frames: Vec<Snapshot>,
    frame_ticks: u32,
    tick: u32,
    latch: InputLatch,
    /// Buttons still held each time the grid was sampled.
    held_at_sample: Vec<Vec<Button>>,
    fail_on_frame: Option<usize>,
}

impl Scripted {
    fn new(frames: Vec<Snapshot>, frame_ticks: u32) -> Self {
        Self {
            frames,
            frame_ticks,
            tick: 0,
            latch: InputLatch::new(),
            held_at_sample: Vec::new(),
            fail_on_frame: None,
        }
    }

    fn cursor(&self) -> usize {
        (self.tick / self.frame_ticks) as usize
    }

    fn current(&self) -> Result<&Snapshot, SensorError> {
        let i = self.cursor();
        if self.fail_on_frame == Some(i) {
            return Err(SensorError::Unavailable(format!("frame {i} corrupted")));
        }
        self.frames
            .get(i)
            .ok_or_else(|| SensorError::Unavailable("script exhausted".into()))
    }
}

impl WorldSensor for Scripted {
    fn sample_grid(&mut self) -> Result<TileGrid, SensorError> {
        self.held_at_sample.push(self.latch.held());
        Ok(self.current()?.grid)
    }

    fn sample_facts(&mut self) -> Result<WorldFacts, SensorError> {
        match self.frames.get(self.cursor()).or(self.frames.last()) {
            Some(s) => Ok(s.facts),
            None => Ok(WorldFacts::default()),
        }
    }

    fn is_game_over(&mut self) -> Result<bool, SensorError> {
        Ok(self
            .frames
            .get(self.cursor())
            .map_or(true, |s| s.facts.game_over))
    }
}

impl FrameStepper for Scripted {
    fn advance_frame(&mut self) -> Result<(), SensorError> {
        self.tick += 1;
        Ok(())
    }
}

impl Actuator for Scripted {
    fn hold(&mut self, button: Button) {
        self.latch.hold(button);
    }
    fn release(&mut self, button: Button) {
        self.latch.release(button);
    }
}

fn on_ground(x: u32) -> Snapshot {
    let mut grid = TileGrid::empty();
    for r in 10..=11 {
        for c in 4..=5 {
            grid.set(r, c, Tile::Agent);
        }
    }
    for r in 12..GRID_H {
        for c in 0..GRID_W {
            grid.set(r, c, Tile::Ground);
        }
    }
    Snapshot {
        grid,
        facts: WorldFacts {
            x_position: x,
            world: 1,
            stage: 1,
            game_over: false,
        },
    }
}

fn agent() -> Agent<ExpertPolicy> {
    Agent::new(ExpertPolicy::new(), ActionExecutor::default())
}

#[test]
fn play_runs_until_script_ends() {
    let frames = vec![on_ground(10), on_ground(20), on_ground(30)];
    let mut rt = Scripted::new(frames, ExecutorConfig::DEFAULT_ACTION_PERIOD);
    let mut actions = Vec::new();

    let end = agent()
        .play(&mut rt, |o| actions.push(o.decision.action))
        .expect("scripted run");

    assert_eq!(actions, vec![Action::Right; 3]);
    assert_eq!(end.steps, 3);
    assert_eq!(end.ticks, 30);
    assert_eq!(end.final_facts.x_position, 30);
}

#[test]
fn play_stops_on_game_over_flag() {
    let mut last = on_ground(30);
    last.facts.game_over = true;
    let frames = vec![on_ground(10), on_ground(20), last, on_ground(40)];
    let mut rt = Scripted::new(frames, ExecutorConfig::DEFAULT_ACTION_PERIOD);

    let end = agent().play(&mut rt, |_| {}).expect("scripted run");
    assert_eq!(end.steps, 2);
    assert!(end.final_facts.game_over);
}

#[test]
fn already_over_means_zero_steps() {
    let mut rt = Scripted::new(Vec::new(), 1);
    let end = agent().play(&mut rt, |_| {}).expect("empty script");
    assert_eq!(end.steps, 0);
    assert_eq!(end.ticks, 0);
}

#[test]
fn nothing_is_held_when_the_next_step_samples() {
    // Gap at column 7 on every frame: the loop keeps choosing gap jumps and
    // compound recipes, each of which must release everything.
    let mut frames = Vec::new();
    for x in 0..40 {
        let mut s = on_ground(100 + x);
        s.grid.set(12, 7, Tile::Empty);
        frames.push(s);
    }
    let mut rt = Scripted::new(frames, 5);
    let mut seen = Vec::new();
    agent()
        .play(&mut rt, |o| seen.push(o.decision.action))
        .expect("scripted run");

    assert!(seen.iter().any(|a| a.is_compound()));
    assert!(rt.held_at_sample.iter().all(Vec::is_empty), "{:?}", rt.held_at_sample);
    assert!(!rt.latch.any_held());
}

#[test]
fn history_threads_between_steps() {
    // No agent visible: top-row fallback alternates Up and its anti-stall rewrite.
    let frames = vec![Snapshot::default(); 4];
    let mut rt = Scripted::new(frames, ExecutorConfig::DEFAULT_ACTION_PERIOD);
    let mut got = Vec::new();

    let mut agent = agent();
    agent
        .play(&mut rt, |o| got.push((o.decision.action, o.decision.anti_stall)))
        .expect("scripted run");

    assert_eq!(
        got,
        vec![
            (Action::Up, false),
            (Action::Right, true),
            (Action::Up, false),
            (Action::Right, true),
        ]
    );
    assert_eq!(agent.policy().history().prev_action, Action::Right);
    assert_eq!(agent.steps(), 4);
}

#[test]
fn step_reports_rule_and_ticks() {
    let mut rt = Scripted::new(vec![on_ground(5)], 100);
    let mut agent = agent();
    let out = agent.step(&mut rt).expect("one step");
    assert_eq!(out.decision.rule, Rule::Advance);
    assert_eq!(out.ticks, ExecutorConfig::DEFAULT_ACTION_PERIOD);
    assert_eq!(out.snapshot.facts.x_position, 5);
    assert_eq!(agent.ticks(), u64::from(out.ticks));
}

#[test]
fn sensor_error_aborts_the_run() {
    let frames = vec![on_ground(10), on_ground(20), on_ground(30)];
    let mut rt = Scripted::new(frames, ExecutorConfig::DEFAULT_ACTION_PERIOD);
    rt.fail_on_frame = Some(1);
    let mut steps = 0;

    let err = agent().play(&mut rt, |_| steps += 1).unwrap_err();
    assert!(matches!(err, SensorError::Unavailable(_)));
    assert_eq!(steps, 1);
}
