//! # ComponentContext: the handler admission gate.
//!
//! One [`ComponentContext`] is shared by reference with every component of one
//! activity instance. It decides whether a handler invocation may begin and
//! tracks how many are in flight, so shutdown can drain before teardown.
//!
//! ## Ordering guarantees
//! ```text
//! lock_running_set()            handlers denied, before any component starts
//!        │
//!        ▼
//! component startup ...         no listener may invoke a handler yet
//!        │
//!        ▼
//! unlock_running_set(success)   handlers admitted iff startup succeeded
//!        │
//!        ▼
//! handlers run  ──────────────  try_enter_handler() / HandlerTicket
//!        │
//!        ▼
//! clear_running()               no new handlers; in-flight ones keep running
//!        │
//!        ▼
//! wait_on_no_processing_handlers(sample, max)    best-effort drain
//! ```
//!
//! ## Rules
//! - [`can_handler_run`](ComponentContext::can_handler_run) is a fast, racy
//!   pre-check, not a guarantee; admission and counting are only coupled
//!   through [`try_enter_handler`](ComponentContext::try_enter_handler).
//! - The in-flight count never goes negative; an unmatched exit is logged as
//!   an error and clamped.
//! - None of these operations fail; they are pure counters and flags usable
//!   from arbitrary threads.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Admission gate and startup/shutdown barrier for one activity instance.
///
/// Created at startup entry, discarded at shutdown exit.
#[derive(Debug, Default)]
pub struct ComponentContext {
    handlers_allowed: AtomicBool,
    running_set_locked: AtomicBool,
    in_flight: AtomicUsize,
}

impl ComponentContext {
    /// Creates a fresh context with handlers denied.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Locks the running set before any component starts.
    ///
    /// Must be called before components wire up any listener that could
    /// invoke a handler.
    pub fn lock_running_set(&self) {
        self.running_set_locked.store(true, Ordering::SeqCst);
        self.handlers_allowed.store(false, Ordering::SeqCst);
    }

    /// Ends the startup barrier after all components attempted startup.
    ///
    /// Handlers are admitted only when `success` is true; on false they stay
    /// permanently disabled for this activity instance.
    pub fn unlock_running_set(&self, success: bool) {
        self.handlers_allowed.store(success, Ordering::SeqCst);
    }

    /// Stops admitting new handlers; already-admitted ones keep running.
    ///
    /// Called at the start of shutdown.
    pub fn clear_running(&self) {
        self.handlers_allowed.store(false, Ordering::SeqCst);
    }

    /// Fast pre-check: may a handler begin right now?
    ///
    /// Racy by design; the authoritative bracket is
    /// [`try_enter_handler`](Self::try_enter_handler).
    pub fn can_handler_run(&self) -> bool {
        self.handlers_allowed.load(Ordering::SeqCst)
    }

    /// Read-only query used by supervision and tests.
    pub fn are_handlers_allowed(&self) -> bool {
        self.handlers_allowed.load(Ordering::SeqCst)
    }

    /// True once [`lock_running_set`](Self::lock_running_set) has been called.
    pub fn is_running_set_locked(&self) -> bool {
        self.running_set_locked.load(Ordering::SeqCst)
    }

    /// Marks a handler as entered.
    ///
    /// Call only after observing [`can_handler_run`](Self::can_handler_run)
    /// and guarantee [`exit_handler`](Self::exit_handler) on every exit path;
    /// prefer [`try_enter_handler`](Self::try_enter_handler), which does both.
    pub fn enter_handler(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
    }

    /// Marks a handler as exited.
    pub fn exit_handler(&self) {
        let underflow = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err();
        if underflow {
            tracing::error!("there are more handler exits than enters");
        }
    }

    /// Scoped admission: returns a ticket when handlers are admitted.
    ///
    /// `None` means admission was denied and the handler must return
    /// immediately without doing any work. The ticket releases admission on
    /// every exit path via `Drop`.
    ///
    /// ## Example
    /// ```rust
    /// use activisor::ComponentContext;
    ///
    /// let context = ComponentContext::new();
    /// context.lock_running_set();
    /// context.unlock_running_set(true);
    ///
    /// if let Some(_ticket) = context.try_enter_handler() {
    ///     // handle the event; admission is released when the ticket drops
    /// }
    /// ```
    pub fn try_enter_handler(self: &Arc<Self>) -> Option<HandlerTicket> {
        if !self.can_handler_run() {
            return None;
        }
        self.enter_handler();
        Some(HandlerTicket {
            context: Arc::clone(self),
        })
    }

    /// Are handlers still processing?
    pub fn are_processing_handlers(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Number of handlers currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Polls until no handlers are processing or `max_wait` elapses.
    ///
    /// Returns `true` if the in-flight count reached zero. A `false` return
    /// is advisory: shutdown proceeds anyway and the caller logs a warning.
    pub async fn wait_on_no_processing_handlers(
        &self,
        sample_interval: Duration,
        max_wait: Duration,
    ) -> bool {
        let start = tokio::time::Instant::now();
        while self.are_processing_handlers() && start.elapsed() < max_wait {
            tokio::time::sleep(sample_interval).await;
        }
        !self.are_processing_handlers()
    }
}

/// Scoped admission ticket: guarantees `exit_handler` on every exit path.
#[derive(Debug)]
pub struct HandlerTicket {
    context: Arc<ComponentContext>,
}

impl Drop for HandlerTicket {
    fn drop(&mut self) {
        self.context.exit_handler();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admission_window() {
        let ctx = ComponentContext::new();
        assert!(!ctx.can_handler_run());

        ctx.lock_running_set();
        assert!(ctx.is_running_set_locked());
        assert!(!ctx.can_handler_run());

        ctx.unlock_running_set(true);
        assert!(ctx.can_handler_run());

        ctx.clear_running();
        assert!(!ctx.can_handler_run());
    }

    #[test]
    fn failed_startup_keeps_handlers_denied() {
        let ctx = ComponentContext::new();
        ctx.lock_running_set();
        ctx.unlock_running_set(false);
        assert!(!ctx.can_handler_run());
        assert!(ctx.try_enter_handler().is_none());
    }

    #[test]
    fn ticket_releases_on_drop() {
        let ctx = ComponentContext::new();
        ctx.lock_running_set();
        ctx.unlock_running_set(true);

        let ticket = ctx.try_enter_handler().expect("admission granted");
        assert!(ctx.are_processing_handlers());
        assert_eq!(ctx.in_flight(), 1);

        drop(ticket);
        assert!(!ctx.are_processing_handlers());
        assert_eq!(ctx.in_flight(), 0);
    }

    #[test]
    fn admitted_handler_survives_clear_running() {
        let ctx = ComponentContext::new();
        ctx.lock_running_set();
        ctx.unlock_running_set(true);

        let ticket = ctx.try_enter_handler().expect("admission granted");
        ctx.clear_running();

        // No new admissions, but the in-flight one is still counted.
        assert!(ctx.try_enter_handler().is_none());
        assert_eq!(ctx.in_flight(), 1);
        drop(ticket);
    }

    #[test]
    fn exit_without_enter_clamps_at_zero() {
        let ctx = ComponentContext::new();
        ctx.exit_handler();
        assert_eq!(ctx.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drain_returns_true_when_idle() {
        let ctx = ComponentContext::new();
        assert!(
            ctx.wait_on_no_processing_handlers(Duration::from_millis(50), Duration::from_millis(500))
                .await
        );
    }

    #[tokio::test(start_paused = true)]
    async fn drain_times_out_with_handler_in_flight() {
        let ctx = ComponentContext::new();
        ctx.lock_running_set();
        ctx.unlock_running_set(true);
        let ticket = ctx.try_enter_handler().expect("admission granted");

        let drained = ctx
            .wait_on_no_processing_handlers(Duration::from_millis(50), Duration::from_millis(500))
            .await;
        assert!(!drained);
        drop(ticket);

        let drained = ctx
            .wait_on_no_processing_handlers(Duration::from_millis(50), Duration::from_millis(500))
            .await;
        assert!(drained);
    }
}
