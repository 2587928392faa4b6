//! # Event subscriber trait.
//!
//! Provides [`Subscribe`], an extension point for plugging custom status
//! observers into the runtime (dashboards, alerting, deployment masters).
//!
//! Each subscriber gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-subscriber bounded queue** (capacity via [`Subscribe::queue_capacity`])
//! - **Panic isolation** (panics are caught and logged)
//!
//! ## Rules
//! - A slow subscriber only affects its own queue.
//! - Queue overflow drops the event for this subscriber only; other
//!   subscribers are unaffected.
//! - Events are processed sequentially (FIFO) per subscriber.
//! - Subscribers do not block the lifecycle thread or each other.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use activisor::{Event, EventKind, Subscribe};
//!
//! struct CrashAlert;
//!
//! #[async_trait]
//! impl Subscribe for CrashAlert {
//!     async fn on_event(&self, ev: &Event) {
//!         if let (EventKind::StatusChanged, Some(new)) = (ev.kind, ev.new.as_ref()) {
//!             if new.state() == activisor::ActivityState::Crashed {
//!                 // page someone, etc.
//!             }
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "crash-alert" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber for runtime observability.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, never in the publisher context.
    /// Events are delivered in FIFO order per subscriber.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in logs.
    ///
    /// Prefer short, descriptive names. The default uses
    /// `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this subscriber.
    ///
    /// On overflow the new event is dropped for this subscriber only and a
    /// warning is logged. Clamped to a minimum of 1. Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
