//! # Monotonic time source.
//!
//! [`TimeProvider`] abstracts "current time in milliseconds" for restart
//! success-window arithmetic, so strategies can be driven by a mock clock in
//! tests. The default [`MonotonicTimeProvider`] is backed by
//! [`tokio::time::Instant`] and therefore follows a paused test clock.

use std::sync::Arc;

use tokio::time::Instant;

/// Monotonic current-time source, in milliseconds from an arbitrary origin.
pub trait TimeProvider: Send + Sync + 'static {
    /// Current monotonic time in milliseconds.
    fn current_time_millis(&self) -> u64;
}

/// Shared handle to a time provider.
pub type TimeRef = Arc<dyn TimeProvider>;

/// Default provider: milliseconds elapsed since the provider was created.
pub struct MonotonicTimeProvider {
    origin: Instant,
}

impl MonotonicTimeProvider {
    /// Creates a provider anchored at "now".
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Creates a shared handle anchored at "now".
    pub fn arc() -> TimeRef {
        Arc::new(Self::new())
    }
}

impl Default for MonotonicTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for MonotonicTimeProvider {
    fn current_time_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn follows_the_paused_clock() {
        let time = MonotonicTimeProvider::new();
        let before = time.current_time_millis();
        tokio::time::sleep(std::time::Duration::from_millis(250)).await;
        assert!(time.current_time_millis() >= before + 250);
    }
}
