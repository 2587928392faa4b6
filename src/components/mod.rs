//! Component model: the capability unit, its admission context, and the
//! registry that drives ordered startup and rollback.
//!
//! Internal modules:
//! - [`component`]: the [`Component`] trait and [`ComponentRef`] handle;
//! - [`context`]: [`ComponentContext`], the handler admission gate, and the
//!   scoped [`HandlerTicket`];
//! - [`registry`]: [`ComponentRegistry`], dependency-ordered configure/start
//!   with rollback and reverse-order shutdown;
//! - [`resolver`]: deterministic topological ordering over declared
//!   dependency names;
//! - [`factory`]: type-tag to constructor map for composition-time lookup;
//! - [`routes`]: named input/output channel registry for router-style
//!   components.

mod component;
mod context;
mod factory;
mod registry;
mod resolver;
mod routes;

pub use component::{Component, ComponentRef};
pub use context::{ComponentContext, HandlerTicket};
pub use factory::ComponentFactory;
pub use registry::ComponentRegistry;
pub use resolver::DependencyResolver;
pub use routes::RouteRegistry;
