//! Error types used by the activisor runtime and its components.
//!
//! This module defines two main error enums:
//!
//! - [`ActivityError`]: failures raised at the activity level (hooks, managed
//!   resources).
//! - [`ComponentError`]: failures raised by the component registry and by
//!   individual components.
//!
//! Both types provide `as_label()` for logging/metrics. Errors from hooks and
//! components are always caught at the controller boundary and translated into
//! a status transition; they never escape to handler threads or supervisors.

use thiserror::Error;

/// # Errors raised at the activity level.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ActivityError {
    /// A lifecycle hook failed.
    #[error("hook {hook} failed: {reason}")]
    Hook {
        /// Name of the failing hook.
        hook: &'static str,
        /// The underlying error message.
        reason: String,
    },

    /// A component operation failed.
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// A managed resource failed to start or stop.
    #[error("managed resource {resource} failed: {reason}")]
    Resource {
        /// Name of the failing resource.
        resource: String,
        /// The underlying error message.
        reason: String,
    },

    /// Generic activity-level failure, typically raised by user hooks.
    #[error("{reason}")]
    Failed {
        /// The underlying error message.
        reason: String,
    },
}

impl ActivityError {
    /// Generic failure from a user hook.
    ///
    /// # Example
    /// ```
    /// use activisor::ActivityError;
    ///
    /// let err = ActivityError::failed("could not open device");
    /// assert_eq!(err.as_label(), "activity_failed");
    /// ```
    pub fn failed(reason: impl Into<String>) -> Self {
        ActivityError::Failed {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActivityError::Hook { .. } => "activity_hook_failed",
            ActivityError::Component(e) => e.as_label(),
            ActivityError::Resource { .. } => "activity_resource_failed",
            ActivityError::Failed { .. } => "activity_failed",
        }
    }
}

/// # Errors raised by the component registry and by components.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ComponentError {
    /// A component with the same name is already registered.
    ///
    /// Registration fails fast and leaves existing state unchanged.
    #[error("component already registered for name {name}")]
    DuplicateComponent {
        /// The conflicting component name.
        name: String,
    },

    /// A component (or factory type tag) was looked up but never registered.
    #[error("no component registered for name {name}")]
    MissingComponent {
        /// The missing component name.
        name: String,
    },

    /// Declared dependencies form a cycle; no deterministic order exists.
    #[error("component dependency cycle: {names:?}")]
    DependencyCycle {
        /// Names on the detected cycle.
        names: Vec<String>,
    },

    /// `configure_all` was called on an already configured registry.
    #[error("components are already configured")]
    AlreadyConfigured,

    /// A route channel with the same name is already registered.
    #[error("route channel already registered for name {channel}")]
    DuplicateRoute {
        /// The conflicting channel name.
        channel: String,
    },

    /// A configuration property is missing or malformed.
    #[error("configuration property {key}: {reason}")]
    Config {
        /// The property key.
        key: String,
        /// Why the property could not be read.
        reason: String,
    },

    /// A component's own configure/startup/shutdown failed.
    #[error("component {component} failed: {reason}")]
    Failed {
        /// Name of the failing component.
        component: String,
        /// The underlying error message.
        reason: String,
    },
}

impl ComponentError {
    /// Failure raised by a component implementation.
    pub fn failed(component: impl Into<String>, reason: impl Into<String>) -> Self {
        ComponentError::Failed {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use activisor::ComponentError;
    ///
    /// let err = ComponentError::DuplicateRoute { channel: "out".into() };
    /// assert_eq!(err.as_label(), "component_duplicate_route");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ComponentError::DuplicateComponent { .. } => "component_duplicate",
            ComponentError::MissingComponent { .. } => "component_missing",
            ComponentError::DependencyCycle { .. } => "component_dependency_cycle",
            ComponentError::AlreadyConfigured => "component_already_configured",
            ComponentError::DuplicateRoute { .. } => "component_duplicate_route",
            ComponentError::Config { .. } => "component_config",
            ComponentError::Failed { .. } => "component_failed",
        }
    }
}
