//! # Managed resources: started after setup, stopped after cleanup.
//!
//! A [`ManagedResource`] is anything with a paired start/stop that the
//! activity owns but that is not a full component: file handles, native
//! bindings, background timers. The controller starts them before components
//! and stops them after components, so components may rely on resources being
//! live for their whole lifetime.
//!
//! ## Rules
//! - Startup is fail-fast: the first failure rolls back already-started
//!   resources in reverse order and propagates.
//! - Shutdown attempts every resource regardless of prior failures; errors
//!   are logged and folded into a single boolean.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ActivityError;

/// Paired start/stop owned by the activity, outside the component registry.
#[async_trait]
pub trait ManagedResource: Send + Sync + 'static {
    /// Stable name used in logs and errors.
    fn name(&self) -> &str;

    /// Brings the resource up.
    async fn startup(&self) -> Result<(), ActivityError>;

    /// Tears the resource down.
    async fn shutdown(&self) -> Result<(), ActivityError>;
}

/// Shared handle to a managed resource.
pub type ResourceRef = Arc<dyn ManagedResource>;

/// Insertion-ordered set of managed resources with rollback-on-failure
/// startup and attempt-all shutdown.
#[derive(Default)]
pub struct ManagedResources {
    resources: Vec<ResourceRef>,
    started: Vec<ResourceRef>,
}

impl ManagedResources {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource; resources start in insertion order.
    pub fn add(&mut self, resource: ResourceRef) {
        self.resources.push(resource);
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True if no resources were added.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Starts every resource in insertion order.
    ///
    /// On failure, already-started resources are shut down in reverse order
    /// (secondary failures logged) and the original error propagates.
    pub async fn startup_all(&mut self) -> Result<(), ActivityError> {
        for resource in self.resources.clone() {
            match resource.startup().await {
                Ok(()) => self.started.push(resource),
                Err(e) => {
                    tracing::error!(
                        resource = resource.name(),
                        error = %e,
                        "error starting managed resource"
                    );
                    for started in self.started.drain(..).rev() {
                        if let Err(rollback_err) = started.shutdown().await {
                            tracing::error!(
                                resource = started.name(),
                                error = %rollback_err,
                                "error shutting down resource after startup failure"
                            );
                        }
                    }
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Shuts down every started resource in reverse start order.
    ///
    /// Every shutdown is attempted; errors are logged. Returns `true` if all
    /// shutdowns succeeded.
    pub async fn shutdown_all(&mut self) -> bool {
        let mut all_ok = true;

        for resource in self.started.drain(..).rev() {
            if let Err(e) = resource.shutdown().await {
                all_ok = false;
                tracing::error!(
                    resource = resource.name(),
                    error = %e,
                    "error during managed resource shutdown"
                );
            }
        }

        all_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Fixture {
        name: String,
        fail_startup: bool,
        fail_shutdown: bool,
        journal: Arc<Mutex<Vec<String>>>,
    }

    impl Fixture {
        fn new(name: &str, journal: &Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                name: name.to_string(),
                fail_startup: false,
                fail_shutdown: false,
                journal: Arc::clone(journal),
            }
        }

        fn failing_startup(mut self) -> Self {
            self.fail_startup = true;
            self
        }

        fn failing_shutdown(mut self) -> Self {
            self.fail_shutdown = true;
            self
        }

        fn log(&self, what: &str) {
            self.journal
                .lock()
                .unwrap()
                .push(format!("{}:{}", what, self.name));
        }
    }

    #[async_trait]
    impl ManagedResource for Fixture {
        fn name(&self) -> &str {
            &self.name
        }

        async fn startup(&self) -> Result<(), ActivityError> {
            self.log("startup");
            if self.fail_startup {
                return Err(ActivityError::Resource {
                    resource: self.name.clone(),
                    reason: "startup refused".into(),
                });
            }
            Ok(())
        }

        async fn shutdown(&self) -> Result<(), ActivityError> {
            self.log("shutdown");
            if self.fail_shutdown {
                return Err(ActivityError::Resource {
                    resource: self.name.clone(),
                    reason: "shutdown refused".into(),
                });
            }
            Ok(())
        }
    }

    fn entries(journal: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        journal.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn start_in_order_stop_reversed() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let mut resources = ManagedResources::new();
        resources.add(Arc::new(Fixture::new("log-file", &journal)));
        resources.add(Arc::new(Fixture::new("native-lib", &journal)));

        resources.startup_all().await.unwrap();
        assert!(resources.shutdown_all().await);

        assert_eq!(
            entries(&journal),
            vec![
                "startup:log-file",
                "startup:native-lib",
                "shutdown:native-lib",
                "shutdown:log-file",
            ]
        );
    }

    #[tokio::test]
    async fn startup_failure_rolls_back_started_resources() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let mut resources = ManagedResources::new();
        resources.add(Arc::new(Fixture::new("first", &journal)));
        resources.add(Arc::new(Fixture::new("second", &journal).failing_startup()));
        resources.add(Arc::new(Fixture::new("third", &journal)));

        let err = resources.startup_all().await.unwrap_err();
        assert_eq!(err.as_label(), "activity_resource_failed");
        assert_eq!(
            entries(&journal),
            vec!["startup:first", "startup:second", "shutdown:first"]
        );

        // Rollback consumed the started list.
        journal.lock().unwrap().clear();
        assert!(resources.shutdown_all().await);
        assert!(entries(&journal).is_empty());
    }

    #[tokio::test]
    async fn shutdown_attempts_every_resource() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let mut resources = ManagedResources::new();
        resources.add(Arc::new(Fixture::new("first", &journal)));
        resources.add(Arc::new(Fixture::new("second", &journal).failing_shutdown()));
        resources.add(Arc::new(Fixture::new("third", &journal)));

        resources.startup_all().await.unwrap();
        assert!(!resources.shutdown_all().await);

        assert_eq!(
            entries(&journal),
            vec![
                "startup:first",
                "startup:second",
                "startup:third",
                "shutdown:third",
                "shutdown:second",
                "shutdown:first",
            ]
        );
    }
}
