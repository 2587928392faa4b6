//! # Component abstraction.
//!
//! A [`Component`] is a named, independently startable/stoppable capability
//! unit (message router, web server, browser, ...) with declared dependencies.
//! The runtime only ever calls this capability surface; domain behavior is
//! entirely opaque to the lifecycle core.
//!
//! The common handle type is [`ComponentRef`], an `Arc<dyn Component>` owned
//! by the registry for the lifetime of one activity instance.
//!
//! ## Contract
//! - `configure` receives the [`Config`] and the shared [`ComponentContext`];
//!   components that invoke handlers must keep the context and gate every
//!   callback through it.
//! - `startup` must not wire up any listener that could invoke a handler
//!   before it is called; the running set is locked before any component
//!   starts.
//! - `shutdown` must be idempotent; rollback may call it after a partial
//!   startup.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use activisor::{Component, ComponentContext, ComponentError, Config};
//!
//! struct Heartbeat {
//!     running: std::sync::atomic::AtomicBool,
//! }
//!
//! #[async_trait]
//! impl Component for Heartbeat {
//!     fn name(&self) -> &str { "heartbeat" }
//!
//!     async fn configure(
//!         &self,
//!         _config: &Config,
//!         _context: Arc<ComponentContext>,
//!     ) -> Result<(), ComponentError> {
//!         Ok(())
//!     }
//!
//!     async fn startup(&self) -> Result<(), ComponentError> {
//!         self.running.store(true, std::sync::atomic::Ordering::SeqCst);
//!         Ok(())
//!     }
//!
//!     async fn shutdown(&self) -> Result<(), ComponentError> {
//!         self.running.store(false, std::sync::atomic::Ordering::SeqCst);
//!         Ok(())
//!     }
//!
//!     fn is_running(&self) -> bool {
//!         self.running.load(std::sync::atomic::Ordering::SeqCst)
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::components::context::ComponentContext;
use crate::config::Config;
use crate::error::ComponentError;

/// A named, startable/stoppable capability unit with declared dependencies.
#[async_trait]
pub trait Component: Send + Sync + 'static {
    /// Returns the stable component name, unique within one activity.
    fn name(&self) -> &str;

    /// Names of components that must configure and start before this one.
    ///
    /// Dependencies that were never registered are ignored for ordering.
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Configures the component.
    ///
    /// The context is the admission gate shared by all components of the
    /// activity instance; store it if the component invokes handlers.
    async fn configure(
        &self,
        config: &Config,
        context: Arc<ComponentContext>,
    ) -> Result<(), ComponentError>;

    /// Starts the component.
    async fn startup(&self) -> Result<(), ComponentError>;

    /// Stops the component. Must be safe to call after a partial startup.
    async fn shutdown(&self) -> Result<(), ComponentError>;

    /// Reports whether the component is currently running; polled by
    /// liveness checks.
    fn is_running(&self) -> bool;

    /// Optional human-readable status detail for diagnostics.
    fn status_detail(&self) -> Option<String> {
        None
    }
}

/// Shared handle to a component.
pub type ComponentRef = Arc<dyn Component>;
