// engine/benches/decision_bench.rs
#![forbid(unsafe_code)]

/**
 * Decision path micro-benchmarks.
 *
 * Focus:
 * - Scene analysis (`Perception::observe`) on a busy grid
 * - Full decision latency (`decide`) with a hostile in range
 * - Recipe expansion and execution against an input latch
 */
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use sidescroll_engine::{
    Action, ActionExecutor, Actuator, AgentHistory, Button, FrameStepper, GRID_H, GRID_W,
    HostileKind, InputLatch, Perception, SensorError, Tile, TileGrid, WorldFacts, decide, plan,
};

fn busy_scene() -> TileGrid {
    let mut g = TileGrid::empty();
    for r in 12..GRID_H {
        for c in 0..GRID_W {
            g.set(r, c, Tile::Ground);
        }
    }
    g.set(12, 9, Tile::Empty);
    g.set(12, 10, Tile::Empty);
    for (r, c) in [(10, 4), (10, 5), (11, 4), (11, 5)] {
        g.set(r, c, Tile::Agent);
    }
    g.set(7, 12, Tile::Block);
    g.set(7, 13, Tile::Powerup);
    g.set(10, 15, Tile::Pipe);
    g.set(11, 15, Tile::Pipe);
    g.set(11, 8, Tile::Hostile(HostileKind::Basic));
    g.set(6, 17, Tile::Hostile(HostileKind::Fly));
    g
}

#[derive(Default)]
struct Pad {
    latch: InputLatch,
    ticks: u64,
}

impl Actuator for Pad {
    fn hold(&mut self, button: Button) {
        self.latch.hold(button);
    }
    fn release(&mut self, button: Button) {
        self.latch.release(button);
    }
}

impl FrameStepper for Pad {
    fn advance_frame(&mut self) -> Result<(), SensorError> {
        self.ticks += 1;
        Ok(())
    }
}

fn bench_observe(c: &mut Criterion) {
    let grid = busy_scene();
    c.bench_function("perception.observe.busy", |b| {
        b.iter(|| black_box(Perception::observe(black_box(&grid))));
    });
}

fn bench_decide(c: &mut Criterion) {
    let grid = busy_scene();
    let facts = WorldFacts {
        x_position: 1200,
        world: 1,
        stage: 1,
        game_over: false,
    };
    c.bench_function("policy.expert.decide", |b| {
        b.iter(|| {
            for prev in Action::ALL {
                let h = AgentHistory::new(prev, 1200);
                black_box(decide(black_box(&grid), &facts, &h));
            }
        });
    });
}

fn bench_plan(c: &mut Criterion) {
    c.bench_function("actuation.plan.all", |b| {
        b.iter(|| {
            for a in Action::ALL {
                black_box(plan(a, 10));
            }
        });
    });
}

fn bench_execute(c: &mut Criterion) {
    let exec = ActionExecutor::default();
    c.bench_function("actuation.execute.jump_stairs", |b| {
        b.iter_batched(
            Pad::default,
            |mut pad| {
                let _ = black_box(exec.execute(Action::JumpStairs, &mut pad));
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_observe, bench_decide, bench_plan, bench_execute);
criterion_main!(benches);
