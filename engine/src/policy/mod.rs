// engine/src/policy/mod.rs
#![forbid(unsafe_code)]

mod action;
mod base;
mod expert;
mod expert_policy;
mod history;

/**
 * Curated policy public API.
 *
 * Internal implementation modules remain private; only stable policy entrypoints are re-exported.
 */
pub use action::Action;
pub use base::Policy;
pub use expert::{Decision, Rule, decide};
pub use expert_policy::ExpertPolicy;
pub use history::AgentHistory;
