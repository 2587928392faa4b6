//! Runtime events: status transitions broadcast over a bounded bus.
//!
//! - [`event`]: the [`Event`] value and its [`EventKind`] classification;
//! - [`bus`]: a thin broadcast wrapper used to fan events out to observers.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
