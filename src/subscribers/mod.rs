//! Observer fan-out for runtime events.
//!
//! - [`subscriber`]: the [`Subscribe`] extension point;
//! - [`set`]: [`SubscriberSet`], non-blocking fan-out with per-subscriber
//!   bounded queues and worker tasks;
//! - `log` (feature `logging`): a simple tracing-backed event writer.

mod set;
mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscriber::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
