//! # User hook points of the activity lifecycle.
//!
//! Every method has a no-op default; implement only the points you need.
//! Hooks are invoked by the lifecycle controller at fixed positions:
//!
//! - startup: `on_setup` → resources start → components configure/start →
//!   `on_startup` → status `Running` → `on_post_startup` (best effort)
//! - activate/deactivate: `on_activate` / `on_deactivate`
//! - shutdown: drain → `on_pre_shutdown` → `on_shutdown` → `on_cleanup` →
//!   `common_cleanup` → components stop → resources stop
//! - liveness: `on_check_state` (a `false` vote marks the activity crashed),
//!   then on crash `on_failure` → `on_cleanup` → `common_cleanup`
//!
//! ## Rules
//! - A hook error during startup aborts the sequence and fails the startup.
//! - Hook errors during shutdown or after a crash are logged; every hook in
//!   the sequence still runs.
//! - `common_cleanup` runs on both the clean path and the crash path; put
//!   cleanup shared by both there.

use async_trait::async_trait;
use std::sync::Arc;

use crate::components::ComponentContext;
use crate::error::ActivityError;

/// Optional lifecycle callbacks for one activity.
///
/// The controller passes the activity's [`ComponentContext`] so hooks can
/// consult the admission gate, for example to spawn handler work that honors
/// [`try_enter_handler`](ComponentContext::try_enter_handler).
#[async_trait]
pub trait ActivityHooks: Send + Sync + 'static {
    /// First step of startup, before resources and components come up.
    async fn on_setup(&self, _context: &Arc<ComponentContext>) -> Result<(), ActivityError> {
        Ok(())
    }

    /// Last fallible step of startup, after every component started.
    async fn on_startup(&self, _context: &Arc<ComponentContext>) -> Result<(), ActivityError> {
        Ok(())
    }

    /// Runs after the activity reached `Running`.
    ///
    /// Failures are logged and do not change the status.
    async fn on_post_startup(&self, _context: &Arc<ComponentContext>) -> Result<(), ActivityError> {
        Ok(())
    }

    /// Runs when the host reacts to a failed startup, before the shutdown
    /// that cleans up the partial start.
    async fn on_startup_failure(
        &self,
        _context: &Arc<ComponentContext>,
    ) -> Result<(), ActivityError> {
        Ok(())
    }

    /// Transitions `Running` to `Active`; an error yields `ActivateFailure`
    /// and the activity keeps running.
    async fn on_activate(&self, _context: &Arc<ComponentContext>) -> Result<(), ActivityError> {
        Ok(())
    }

    /// Transitions `Active` back to `Running`; an error yields
    /// `DeactivateFailure` and the activity keeps running.
    async fn on_deactivate(&self, _context: &Arc<ComponentContext>) -> Result<(), ActivityError> {
        Ok(())
    }

    /// Runs after the handler drain, before anything is torn down.
    async fn on_pre_shutdown(&self, _context: &Arc<ComponentContext>) -> Result<(), ActivityError> {
        Ok(())
    }

    /// The main user teardown step.
    async fn on_shutdown(&self, _context: &Arc<ComponentContext>) -> Result<(), ActivityError> {
        Ok(())
    }

    /// Cleanup after teardown; also runs on the crash path.
    async fn on_cleanup(&self, _context: &Arc<ComponentContext>) -> Result<(), ActivityError> {
        Ok(())
    }

    /// Cleanup shared by the clean shutdown path and the crash path.
    async fn common_cleanup(&self, _context: &Arc<ComponentContext>) -> Result<(), ActivityError> {
        Ok(())
    }

    /// Liveness vote polled while the activity is running-like.
    ///
    /// Return `false` to declare the activity no longer healthy; the
    /// controller then marks it `Crashed`.
    async fn on_check_state(&self, _context: &Arc<ComponentContext>) -> bool {
        true
    }

    /// Runs once when the activity is marked `Crashed`.
    async fn on_failure(&self, _context: &Arc<ComponentContext>) -> Result<(), ActivityError> {
        Ok(())
    }
}

/// Hook implementation that accepts every default.
pub struct NoopHooks;

#[async_trait]
impl ActivityHooks for NoopHooks {}
