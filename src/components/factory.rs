//! # Component factory: type tag to constructor.
//!
//! [`ComponentFactory`] maps a component type tag to a constructor function,
//! resolved at composition time. This replaces reflective by-class-name
//! construction with a static registry.
//!
//! ## Example
//! ```rust
//! # use std::sync::Arc;
//! # use async_trait::async_trait;
//! # use activisor::{Component, ComponentContext, ComponentError, ComponentFactory, Config};
//! # struct Router;
//! # #[async_trait]
//! # impl Component for Router {
//! #     fn name(&self) -> &str { "router" }
//! #     async fn configure(&self, _c: &Config, _x: Arc<ComponentContext>) -> Result<(), ComponentError> { Ok(()) }
//! #     async fn startup(&self) -> Result<(), ComponentError> { Ok(()) }
//! #     async fn shutdown(&self) -> Result<(), ComponentError> { Ok(()) }
//! #     fn is_running(&self) -> bool { true }
//! # }
//! let mut factory = ComponentFactory::new();
//! factory.register("comm.router", || Arc::new(Router)).unwrap();
//!
//! let component = factory.new_component("comm.router").unwrap();
//! assert_eq!(component.name(), "router");
//! assert!(factory.new_component("comm.unknown").is_err());
//! ```

use std::collections::HashMap;

use crate::components::component::ComponentRef;
use crate::error::ComponentError;

type Constructor = Box<dyn Fn() -> ComponentRef + Send + Sync>;

/// Static registry mapping a component type tag to a constructor.
#[derive(Default)]
pub struct ComponentFactory {
    constructors: HashMap<String, Constructor>,
}

impl ComponentFactory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor under a type tag.
    ///
    /// Fails fast on a duplicate tag.
    pub fn register<F>(&mut self, type_tag: impl Into<String>, constructor: F) -> Result<(), ComponentError>
    where
        F: Fn() -> ComponentRef + Send + Sync + 'static,
    {
        let type_tag = type_tag.into();
        if self.constructors.contains_key(&type_tag) {
            return Err(ComponentError::DuplicateComponent { name: type_tag });
        }
        self.constructors.insert(type_tag, Box::new(constructor));
        Ok(())
    }

    /// Constructs a new component for the given type tag.
    pub fn new_component(&self, type_tag: &str) -> Result<ComponentRef, ComponentError> {
        self.constructors
            .get(type_tag)
            .map(|c| c())
            .ok_or_else(|| ComponentError::MissingComponent {
                name: type_tag.to_string(),
            })
    }

    /// True if a constructor is registered for the tag.
    pub fn knows(&self, type_tag: &str) -> bool {
        self.constructors.contains_key(type_tag)
    }
}
