use std::sync::Arc;

use async_trait::async_trait;

use crate::restart::strategy::{
    ListenerSet, Restartable, RestartStrategy, RestartStrategyInstance, RestartStrategyListener,
};

/// Never restarts: every instance completes with failure before it is even
/// handed back to the caller.
#[derive(Default)]
pub struct NoRestartRestartStrategy {
    listeners: Arc<ListenerSet>,
}

impl NoRestartRestartStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener; it only ever observes failures.
    pub fn add_listener(&self, listener: Arc<dyn RestartStrategyListener>) {
        self.listeners.add(listener);
    }
}

struct Finished;

impl RestartStrategyInstance for Finished {
    fn quit(&self) {}

    fn is_restarting(&self) -> bool {
        false
    }
}

#[async_trait]
impl RestartStrategy for NoRestartRestartStrategy {
    async fn new_instance(
        &self,
        restartable: Arc<dyn Restartable>,
    ) -> Box<dyn RestartStrategyInstance> {
        restartable.restart_complete(false).await;
        self.listeners.notify_failure(&restartable).await;
        Box::new(Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    struct Probe {
        attempts: AtomicU32,
        completions: Mutex<Vec<bool>>,
    }

    #[async_trait]
    impl Restartable for Probe {
        async fn attempt_restart(&self) {
            self.attempts.fetch_add(1, Ordering::SeqCst);
        }

        fn is_restarted(&self) -> bool {
            false
        }

        async fn restart_complete(&self, success: bool) {
            self.completions.lock().unwrap().push(success);
        }
    }

    #[tokio::test]
    async fn completes_with_failure_before_returning() {
        let probe = Arc::new(Probe {
            attempts: AtomicU32::new(0),
            completions: Mutex::new(Vec::new()),
        });

        let instance = NoRestartRestartStrategy::new()
            .new_instance(probe.clone())
            .await;

        assert_eq!(probe.attempts.load(Ordering::SeqCst), 0);
        assert_eq!(probe.completions.lock().unwrap().clone(), vec![false]);
        assert!(!instance.is_restarting());
    }
}
