//! # LogWriter: simple event logger.
//!
//! A minimal subscriber that writes incoming [`Event`]s through `tracing`.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! INFO activity="hall-display" old="ready" new="startup_attempt" status changed
//! WARN activity="hall-display" detail="2 handlers still running" handler drain timed out
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let activity = e.activity.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::StatusChanged => {
                let old = e.old.as_ref().map(|s| s.state().as_label()).unwrap_or("unknown");
                let new = e.new.as_ref().map(|s| s.state().as_label()).unwrap_or("unknown");
                tracing::info!(activity, old, new, "status changed");
            }
            EventKind::HandlerDrainTimedOut => {
                tracing::warn!(activity, detail = e.detail.as_deref(), "handler drain timed out");
            }
        }
    }

    fn name(&self) -> &'static str {
        "logger"
    }
}
