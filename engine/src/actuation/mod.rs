// engine/src/actuation/mod.rs
#![forbid(unsafe_code)]

mod executor;
mod recipe;

pub use executor::{ActionExecutor, ExecutorConfig, Instruction, plan};
pub use recipe::{Phase, RECIPES, Recipe, recipe};
