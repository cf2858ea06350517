// engine/src/io/sensor.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::{TileGrid, WorldFacts};

/// Physical inputs of the handheld. `A` jumps.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Button {
    Down,
    Left,
    Right,
    Up,
    A,
    B,
}

impl Button {
    pub const COUNT: usize = 6;

    pub const ALL: [Button; Self::COUNT] = [
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Up,
        Button::A,
        Button::B,
    ];

    pub fn idx(self) -> usize {
        match self {
            Button::Down => 0,
            Button::Left => 1,
            Button::Right => 2,
            Button::Up => 3,
            Button::A => 4,
            Button::B => 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum SensorError {
    /// Sampling failed before or during a step. Fatal for the run.
    #[error("world sensor unavailable: {0}")]
    Unavailable(String),
}

/// Read side of the external game runtime.
pub trait WorldSensor {
    fn sample_grid(&mut self) -> Result<TileGrid, SensorError>;
    fn sample_facts(&mut self) -> Result<WorldFacts, SensorError>;
    fn is_game_over(&mut self) -> Result<bool, SensorError>;
}

/// Blocking frame advance. The only place the core yields control.
pub trait FrameStepper {
    fn advance_frame(&mut self) -> Result<(), SensorError>;
}

/// Input injection. Both calls are idempotent.
pub trait Actuator {
    fn hold(&mut self, button: Button);
    fn release(&mut self, button: Button);
}

/// An emulator handle exposing sensing, stepping and input through one object.
pub trait GameRuntime: WorldSensor + FrameStepper + Actuator {}

impl<T: WorldSensor + FrameStepper + Actuator + ?Sized> GameRuntime for T {}
