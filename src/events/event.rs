//! # Events emitted by the lifecycle controller.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the metadata:
//! the activity name, the `(old, new)` status pair for transitions, a detail
//! string, a wall-clock timestamp, and a global sequence number.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! observed out of order across subscribers.
//!
//! ## Example
//! ```rust
//! use activisor::{ActivityState, ActivityStatus, Event, EventKind};
//!
//! let old = ActivityStatus::new(ActivityState::Ready);
//! let new = ActivityStatus::new(ActivityState::StartupAttempt);
//! let ev = Event::now(EventKind::StatusChanged)
//!     .with_activity("hall-display")
//!     .with_transition(old, new);
//!
//! assert_eq!(ev.kind, EventKind::StatusChanged);
//! assert_eq!(ev.activity.as_deref(), Some("hall-display"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::status::ActivityStatus;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The activity status was replaced.
    ///
    /// Sets:
    /// - `activity`: activity name
    /// - `old` / `new`: the status pair
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    StatusChanged,

    /// The shutdown drain timed out with handlers still in flight.
    ///
    /// Sets:
    /// - `activity`: activity name
    /// - `detail`: how many handlers were still running
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    HandlerDrainTimedOut,
}

/// A runtime event with optional metadata.
#[derive(Debug, Clone)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Name of the activity the event belongs to.
    pub activity: Option<String>,
    /// Status before the transition, for [`EventKind::StatusChanged`].
    pub old: Option<ActivityStatus>,
    /// Status after the transition, for [`EventKind::StatusChanged`].
    pub new: Option<ActivityStatus>,
    /// Free-form detail.
    pub detail: Option<String>,
    /// Wall-clock timestamp at creation.
    pub at: SystemTime,
    /// Globally monotonic sequence number.
    pub seq: u64,
}

impl Event {
    /// Creates an event stamped with "now" and the next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            kind,
            activity: None,
            old: None,
            new: None,
            detail: None,
            at: SystemTime::now(),
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }

    /// Sets the activity name.
    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = Some(activity.into());
        self
    }

    /// Sets the `(old, new)` status pair.
    pub fn with_transition(mut self, old: ActivityStatus, new: ActivityStatus) -> Self {
        self.old = Some(old);
        self.new = Some(new);
        self
    }

    /// Sets the detail string.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
