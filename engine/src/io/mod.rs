// engine/src/io/mod.rs
#![forbid(unsafe_code)]

mod latch;
mod reader;
mod sensor;

pub use latch::{InputEvent, InputLatch};
pub use reader::{Snapshot, sample};
pub use sensor::{Actuator, Button, FrameStepper, GameRuntime, SensorError, WorldSensor};
