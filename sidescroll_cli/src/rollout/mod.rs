// src/rollout/mod.rs
#![forbid(unsafe_code)]

pub mod runner;
pub mod sinks;
pub mod stats;
pub mod trace;

pub use runner::{Runner, RunnerConfig};
pub use sinks::{NoopSink, StepSink, TableSink};
pub use trace::{TraceRuntime, load_trace};
