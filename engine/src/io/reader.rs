// engine/src/io/reader.rs
#![forbid(unsafe_code)]

use super::sensor::{SensorError, WorldSensor};
use crate::world::{TileGrid, WorldFacts};

/// Per-step read model: the grid plus the scalar facts sampled with it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Snapshot {
    pub grid: TileGrid,
    pub facts: WorldFacts,
}

/// Query the sensor once. Any failure aborts the step; there is no degraded mode.
pub fn sample<S: WorldSensor + ?Sized>(sensor: &mut S) -> Result<Snapshot, SensorError> {
    let grid = sensor.sample_grid()?;
    let facts = sensor.sample_facts()?;
    Ok(Snapshot { grid, facts })
}
