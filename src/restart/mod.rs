//! # Restart strategies: bounded retry supervision for crashed activities.
//!
//! When an activity crashes, the host asks a [`RestartStrategy`] for a new
//! instance bound to one [`Restartable`]:
//!
//! ```text
//! crash ──▶ strategy.new_instance(restartable)
//!                 │
//!                 ▼
//!        attempt_restart() ··· sampled until is_restarted() holds
//!                 │                  for the success window
//!                 ▼
//!        restart_complete(success)      exactly once per instance
//! ```
//!
//! ## Rules
//! - `restart_complete` is called exactly once per instance, with `true` only
//!   after the restartable stayed restarted for the whole success window.
//! - Listeners vote on every attempt; a single `false` vetoes the restart and
//!   ends the instance with failure. Every listener is consulted even after a
//!   veto.
//! - `quit()` abandons supervision without a completion call.

mod limited;
mod none;
mod strategy;

pub use limited::LimitedRetryRestartStrategy;
pub use none::NoRestartRestartStrategy;
pub use strategy::{
    ListenerSet, Restartable, RestartStrategy, RestartStrategyInstance, RestartStrategyListener,
};
