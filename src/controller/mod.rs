//! # Lifecycle controller: the single writer of activity status.
//!
//! [`LifecycleController`] drives one activity through its lifecycle:
//!
//! ```text
//! Ready ──startup()──▶ StartupAttempt ──▶ Running ◀──deactivate()── Active
//!                            │               │  ▲                     ▲
//!                            │               │  └─────activate()──────┘
//!                            ▼               │
//!                      StartupFailure        └──shutdown()──▶ Ready
//! ```
//!
//! All lifecycle operations run on one logical thread; handlers and liveness
//! polls observe status and the admission gate concurrently but never drive
//! transitions themselves.
//!
//! User code participates through [`ActivityHooks`], a set of optional
//! callbacks invoked at fixed points of every operation.

mod core;
mod hooks;

pub use self::core::LifecycleController;
pub use hooks::{ActivityHooks, NoopHooks};
