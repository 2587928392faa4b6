//! # Activity state and status snapshots.
//!
//! [`ActivityState`] is the enumerated lifecycle tag; [`ActivityStatus`] is an
//! immutable snapshot of {state, description, cause}.
//!
//! ## Rules
//! - Exactly one status value is current per activity at any instant.
//! - Transitions replace the whole snapshot; a status is never mutated in place.
//! - Every transition is broadcast as a `StatusChanged` event carrying the
//!   `(old, new)` pair.

use std::fmt;

/// Lifecycle state of an activity.
///
/// The `is_running()` flag marks the states liveness checks care about:
/// only [`Running`](ActivityState::Running) and [`Active`](ActivityState::Active)
/// count as running-like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityState {
    /// Constructed or cleanly shut down; can be started.
    Ready,
    /// Startup sequence is in flight.
    StartupAttempt,
    /// Started successfully; handlers are admitted.
    Running,
    /// Activated on top of running.
    Active,
    /// The activate hook failed; the activity keeps running.
    ActivateFailure,
    /// The deactivate hook failed; the activity keeps running.
    DeactivateFailure,
    /// The startup sequence failed; a full shutdown is expected next.
    StartupFailure,
    /// One or more shutdown steps failed.
    ShutdownFailure,
    /// Liveness polling found the activity no longer running.
    Crashed,
}

impl ActivityState {
    /// Returns `true` for states a liveness check should inspect.
    pub fn is_running(&self) -> bool {
        matches!(self, ActivityState::Running | ActivityState::Active)
    }

    /// Returns a short stable label (snake_case) for logs and events.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActivityState::Ready => "ready",
            ActivityState::StartupAttempt => "startup_attempt",
            ActivityState::Running => "running",
            ActivityState::Active => "active",
            ActivityState::ActivateFailure => "activate_failure",
            ActivityState::DeactivateFailure => "deactivate_failure",
            ActivityState::StartupFailure => "startup_failure",
            ActivityState::ShutdownFailure => "shutdown_failure",
            ActivityState::Crashed => "crashed",
        }
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Immutable status snapshot for one activity.
///
/// Created at activity construction (state [`ActivityState::Ready`]) and
/// replaced wholesale on every transition.
///
/// ## Example
/// ```rust
/// use activisor::{ActivityState, ActivityStatus};
///
/// let status = ActivityStatus::new(ActivityState::StartupFailure)
///     .with_cause("component `router` refused to start");
///
/// assert_eq!(status.state(), ActivityState::StartupFailure);
/// assert!(!status.state().is_running());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityStatus {
    state: ActivityState,
    description: Option<String>,
    cause: Option<String>,
}

impl ActivityStatus {
    /// Creates a status for the given state with no description or cause.
    pub fn new(state: ActivityState) -> Self {
        Self {
            state,
            description: None,
            cause: None,
        }
    }

    /// Returns a copy with the given human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns a copy with the given failure cause.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// The lifecycle state this snapshot carries.
    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// Optional human-readable detail.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional failure cause, present on failure transitions.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

impl Default for ActivityStatus {
    /// A fresh activity starts out [`ActivityState::Ready`].
    fn default() -> Self {
        Self::new(ActivityState::Ready)
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state.as_label())?;
        if let Some(desc) = &self.description {
            write!(f, " ({desc})")?;
        }
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}
