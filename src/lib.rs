//! # activisor: live-activity lifecycle and handler-admission runtime.
//!
//! An activity is a long-lived unit of behavior built from named
//! [`Component`]s. activisor drives it through a well-defined lifecycle,
//! gates event handlers through an admission barrier, and supervises
//! crashed activities with bounded-retry restarts.
//!
//! ## Architecture
//! ```text
//!                  ┌───────────────────────────────┐
//!   startup()      │      LifecycleController      │  StatusChanged
//!   activate()  ──▶│  (single writer of status)    │──────────▶ Bus ──▶ SubscriberSet
//!   shutdown()     └──────┬──────────────┬─────────┘
//!                         │              │
//!                         ▼              ▼
//!              ┌───────────────┐  ┌──────────────────┐
//!              │ComponentRegistry│ │ ComponentContext │◀── handlers
//!              │ ordered start,  │ │  admission gate, │    (HandlerTicket)
//!              │ rollback, stop  │ │  drain counter   │
//!              └──────┬────────┘  └──────────────────┘
//!                     ▼
//!              Component / ManagedResource
//!
//!   crash ──▶ RestartStrategy ──▶ attempt / sample / restart_complete
//! ```
//!
//! ## Lifecycle
//! - [`LifecycleController::startup`] runs setup hooks, starts managed
//!   resources, then configures and starts components in dependency order.
//!   Any failure rolls back what already started and yields
//!   `StartupFailure`; handlers are never admitted.
//! - While `Running`/`Active`, handlers are admitted through
//!   [`ComponentContext::try_enter_handler`] and counted in flight.
//! - [`LifecycleController::shutdown`] denies new handlers, drains in-flight
//!   ones with a bounded wait, then tears everything down in reverse order,
//!   attempting every step.
//! - [`LifecycleController::check_activity_state`] polls liveness and marks
//!   the activity `Crashed` when a component or the user hook reports it
//!   down; a [`RestartStrategy`] then supervises the restart.
//!
//! ## Quickstart
//! ```no_run
//! use std::sync::Arc;
//! use activisor::{Config, LifecycleController, NoopHooks};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut controller =
//!         LifecycleController::new("hall-display", Config::new(), Arc::new(NoopHooks));
//!
//!     controller.startup().await;
//!     assert!(controller.state().is_running());
//!
//!     controller.shutdown().await;
//! }
//! ```

mod components;
mod config;
mod controller;
mod error;
mod events;
mod resources;
mod restart;
mod status;
mod subscribers;
mod time;

pub use components::{
    Component, ComponentContext, ComponentFactory, ComponentRef, ComponentRegistry,
    DependencyResolver, HandlerTicket, RouteRegistry,
};
pub use config::Config;
pub use controller::{ActivityHooks, LifecycleController, NoopHooks};
pub use error::{ActivityError, ComponentError};
pub use events::{Bus, Event, EventKind};
pub use resources::{ManagedResource, ManagedResources, ResourceRef};
pub use restart::{
    LimitedRetryRestartStrategy, ListenerSet, NoRestartRestartStrategy, Restartable,
    RestartStrategy, RestartStrategyInstance, RestartStrategyListener,
};
pub use status::{ActivityState, ActivityStatus};
pub use subscribers::{Subscribe, SubscriberSet};
pub use time::{MonotonicTimeProvider, TimeProvider, TimeRef};

#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
