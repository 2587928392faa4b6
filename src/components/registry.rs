//! # ComponentRegistry: ordered configure/start with rollback.
//!
//! The registry owns the components of one activity instance. Membership is
//! mutated only by the single lifecycle thread; reads for liveness checks are
//! safe concurrently.
//!
//! ## Rules
//! - Components are configured and started in the same dependency order.
//! - `configure_all` aborts on the first failure; nothing is started.
//! - `startup_all` rolls back on failure: every component whose startup
//!   already completed is shut down in reverse order, secondary failures are
//!   logged, the original error propagates. The failing component itself is
//!   never shut down.
//! - `shutdown_all_and_clear` shuts down every started component in exact
//!   reverse of the realized start order, attempts every shutdown regardless
//!   of prior failures, and clears the registry.

use std::sync::Arc;

use crate::components::component::ComponentRef;
use crate::components::context::ComponentContext;
use crate::components::factory::ComponentFactory;
use crate::components::resolver::DependencyResolver;
use crate::config::Config;
use crate::error::ComponentError;

/// Insertion-ordered collection of named components with dependency-aware
/// startup and rollback-on-failure shutdown.
#[derive(Default)]
pub struct ComponentRegistry {
    /// Components in insertion order.
    added: Vec<ComponentRef>,
    /// Components in dependency order, filled by `configure_all`.
    configured: Vec<ComponentRef>,
    /// Components in successful start order, filled by `startup_all`.
    started: Vec<ComponentRef>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component.
    ///
    /// Fails fast on a duplicate name and leaves existing state unchanged.
    pub fn add(&mut self, component: ComponentRef) -> Result<(), ComponentError> {
        if self.get(component.name()).is_some() {
            return Err(ComponentError::DuplicateComponent {
                name: component.name().to_string(),
            });
        }
        self.added.push(component);
        Ok(())
    }

    /// Constructs a component from the factory by type tag and registers it.
    pub fn add_from_factory(
        &mut self,
        factory: &ComponentFactory,
        type_tag: &str,
    ) -> Result<(), ComponentError> {
        let component = factory.new_component(type_tag)?;
        self.add(component)
    }

    /// Looks up a registered component by name.
    pub fn get(&self, name: &str) -> Option<ComponentRef> {
        self.added.iter().find(|c| c.name() == name).cloned()
    }

    /// Looks up a registered component by name, failing if absent.
    pub fn required(&self, name: &str) -> Result<ComponentRef, ComponentError> {
        self.get(name).ok_or_else(|| ComponentError::MissingComponent {
            name: name.to_string(),
        })
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.added.len()
    }

    /// True if no components are registered.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
    }

    /// Configures every component in dependency order.
    ///
    /// Aborts on the first failure; no further components are configured and
    /// none are started.
    pub async fn configure_all(
        &mut self,
        config: &Config,
        context: &Arc<ComponentContext>,
    ) -> Result<(), ComponentError> {
        if !self.configured.is_empty() {
            return Err(ComponentError::AlreadyConfigured);
        }

        let mut resolver = DependencyResolver::new();
        for component in &self.added {
            resolver.add_node(component.name(), component.dependencies());
        }

        for name in resolver.resolve()? {
            // Every resolved name is a registered component; unknown
            // dependency names were dropped by the resolver.
            let component = self.required(&name)?;
            component.configure(config, Arc::clone(context)).await?;
            self.configured.push(component);
        }

        Ok(())
    }

    /// Starts every configured component in configure order.
    ///
    /// On failure, already-started components are shut down in reverse order
    /// (each attempted independently, secondary failures logged) and the
    /// original error propagates. The rollback consumes the started list, so
    /// a later [`shutdown_all_and_clear`](Self::shutdown_all_and_clear)
    /// cannot touch those components again.
    pub async fn startup_all(&mut self) -> Result<(), ComponentError> {
        for component in self.configured.clone() {
            tracing::info!(component = component.name(), "starting component");
            match component.startup().await {
                Ok(()) => self.started.push(component),
                Err(e) => {
                    tracing::error!(
                        component = component.name(),
                        error = %e,
                        "error starting component"
                    );
                    for started in self.started.drain(..).rev() {
                        if let Err(rollback_err) = started.shutdown().await {
                            tracing::error!(
                                component = started.name(),
                                error = %rollback_err,
                                "error shutting down after startup failure"
                            );
                        }
                    }
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Shuts down every started component in reverse start order and clears
    /// the registry.
    ///
    /// Every shutdown is attempted regardless of prior failures; errors are
    /// logged. Returns `true` if all shutdowns succeeded.
    pub async fn shutdown_all_and_clear(&mut self) -> bool {
        let mut all_ok = true;

        for component in self.started.drain(..).rev() {
            if let Err(e) = component.shutdown().await {
                all_ok = false;
                tracing::error!(
                    component = component.name(),
                    error = %e,
                    "error during component shutdown"
                );
            }
        }

        self.configured.clear();
        self.added.clear();
        all_ok
    }

    /// True when every started component reports itself running.
    ///
    /// Components that are not running are logged; used by liveness checks.
    pub fn are_all_running(&self) -> bool {
        let mut all_running = true;
        for component in &self.started {
            if !component.is_running() {
                all_running = false;
                let detail = component.status_detail();
                tracing::error!(
                    component = component.name(),
                    detail = detail.as_deref(),
                    "component not running when expected"
                );
            }
        }
        all_running
    }
}
