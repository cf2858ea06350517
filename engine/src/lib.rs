// engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod actuation;
pub mod agent;
pub mod io;
pub mod perception;
pub mod policy;
pub mod world;

// Re-export the bits the replay harness and tests reach for most:
pub use actuation::{ActionExecutor, ExecutorConfig, Instruction, plan, recipe};
pub use agent::{Agent, RunEnd, StepOutcome};
pub use io::{
    Actuator, Button, FrameStepper, GameRuntime, InputEvent, InputLatch, SensorError, Snapshot,
    WorldSensor, sample,
};
pub use perception::{GridPos, HostileSighting, ObstacleKind, Perception};
pub use policy::{Action, AgentHistory, Decision, ExpertPolicy, Policy, Rule, decide};
pub use world::{GRID_H, GRID_W, GridShapeError, HostileKind, Tile, TileGrid, WorldFacts};
