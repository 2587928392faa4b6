use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::restart::strategy::{
    ListenerSet, Restartable, RestartStrategy, RestartStrategyInstance, RestartStrategyListener,
};
use crate::time::{MonotonicTimeProvider, TimeRef};

/// Retries a restart a bounded number of times.
///
/// The first attempt happens immediately; afterwards the restartable is
/// sampled every `sample_delay`. A sample that finds it down consumes a retry
/// and attempts again. The instance completes with success once the
/// restartable stayed up for `success_duration` since its last attempt, and
/// with failure when the retries are exhausted or a listener vetoes.
pub struct LimitedRetryRestartStrategy {
    retries: u32,
    sample_delay: Duration,
    success_duration: Duration,
    time: TimeRef,
    listeners: Arc<ListenerSet>,
}

impl LimitedRetryRestartStrategy {
    /// Creates a strategy allowing `retries` attempts in total.
    pub fn new(retries: u32, sample_delay: Duration, success_duration: Duration) -> Self {
        Self {
            retries,
            sample_delay,
            success_duration,
            time: MonotonicTimeProvider::arc(),
            listeners: Arc::new(ListenerSet::new()),
        }
    }

    /// Overrides the time source used for the success window.
    pub fn with_time_provider(mut self, time: TimeRef) -> Self {
        self.time = time;
        self
    }

    /// Adds a listener consulted on every attempt.
    pub fn add_listener(&self, listener: Arc<dyn RestartStrategyListener>) {
        self.listeners.add(listener);
    }
}

struct Instance {
    token: CancellationToken,
    restarting: Arc<AtomicBool>,
}

impl RestartStrategyInstance for Instance {
    fn quit(&self) {
        self.restarting.store(false, Ordering::SeqCst);
        self.token.cancel();
    }

    fn is_restarting(&self) -> bool {
        self.restarting.load(Ordering::SeqCst)
    }
}

async fn finish(
    restarting: &AtomicBool,
    restartable: &Arc<dyn Restartable>,
    listeners: &ListenerSet,
    success: bool,
) {
    restarting.store(false, Ordering::SeqCst);
    restartable.restart_complete(success).await;
    if success {
        listeners.notify_success(restartable).await;
    } else {
        listeners.notify_failure(restartable).await;
    }
}

#[async_trait]
impl RestartStrategy for LimitedRetryRestartStrategy {
    async fn new_instance(
        &self,
        restartable: Arc<dyn Restartable>,
    ) -> Box<dyn RestartStrategyInstance> {
        let token = CancellationToken::new();
        let restarting = Arc::new(AtomicBool::new(true));
        let instance = Instance {
            token: token.clone(),
            restarting: Arc::clone(&restarting),
        };

        if self.retries == 0 || !self.listeners.vote_attempt(&restartable).await {
            finish(&restarting, &restartable, &self.listeners, false).await;
            return Box::new(instance);
        }

        // First attempt happens immediately; the sampling loop takes over
        // from there.
        let mut retries_left = self.retries - 1;
        let mut last_attempt = self.time.current_time_millis();
        restartable.attempt_restart().await;

        let sample_delay = self.sample_delay;
        let success_ms = self.success_duration.as_millis() as u64;
        let time = Arc::clone(&self.time);
        let listeners = Arc::clone(&self.listeners);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(sample_delay) => {}
                }

                if restartable.is_restarted() {
                    let held = time.current_time_millis().saturating_sub(last_attempt);
                    if held >= success_ms {
                        finish(&restarting, &restartable, &listeners, true).await;
                        return;
                    }
                } else if retries_left > 0 {
                    if !listeners.vote_attempt(&restartable).await {
                        finish(&restarting, &restartable, &listeners, false).await;
                        return;
                    }
                    retries_left -= 1;
                    last_attempt = time.current_time_millis();
                    restartable.attempt_restart().await;
                } else {
                    finish(&restarting, &restartable, &listeners, false).await;
                    return;
                }
            }
        });

        Box::new(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::sync::Mutex;

    struct Flaky {
        attempts: AtomicU32,
        /// Attempt number from which `is_restarted` holds; 0 means never.
        succeeds_on: u32,
        completions: Mutex<Vec<bool>>,
    }

    impl Flaky {
        fn new(succeeds_on: u32) -> Arc<Self> {
            Arc::new(Self {
                attempts: AtomicU32::new(0),
                succeeds_on,
                completions: Mutex::new(Vec::new()),
            })
        }

        fn attempts(&self) -> u32 {
            self.attempts.load(Ordering::SeqCst)
        }

        fn completions(&self) -> Vec<bool> {
            self.completions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Restartable for Flaky {
        async fn attempt_restart(&self) {
            self.attempts.fetch_add(1, Ordering::SeqCst);
        }

        fn is_restarted(&self) -> bool {
            self.succeeds_on != 0 && self.attempts() >= self.succeeds_on
        }

        async fn restart_complete(&self, success: bool) {
            self.completions.lock().unwrap().push(success);
        }
    }

    struct Veto;

    #[async_trait]
    impl RestartStrategyListener for Veto {
        async fn on_restart_attempt(
            &self,
            _restartable: &Arc<dyn Restartable>,
            _continue_so_far: bool,
        ) -> bool {
            false
        }
    }

    fn strategy(retries: u32) -> LimitedRetryRestartStrategy {
        LimitedRetryRestartStrategy::new(
            retries,
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_once_the_success_window_holds() {
        let flaky = Flaky::new(2);
        let instance = strategy(3).new_instance(flaky.clone()).await;

        tokio::time::sleep(Duration::from_secs(2)).await;

        // Second attempt stuck; no further retries were spent.
        assert_eq!(flaky.attempts(), 2);
        assert_eq!(flaky.completions(), vec![true]);
        assert!(!instance.is_restarting());
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_retries_and_fails_once() {
        let flaky = Flaky::new(0);
        let instance = strategy(3).new_instance(flaky.clone()).await;

        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(flaky.attempts(), 3);
        assert_eq!(flaky.completions(), vec![false]);
        assert!(!instance.is_restarting());
    }

    #[tokio::test(start_paused = true)]
    async fn listener_veto_fails_before_any_attempt() {
        let flaky = Flaky::new(1);
        let strategy = strategy(3);
        strategy.add_listener(Arc::new(Veto));

        let instance = strategy.new_instance(flaky.clone()).await;

        assert_eq!(flaky.attempts(), 0);
        assert_eq!(flaky.completions(), vec![false]);
        assert!(!instance.is_restarting());
    }

    #[tokio::test(start_paused = true)]
    async fn quit_abandons_without_completion() {
        let flaky = Flaky::new(0);
        let instance = strategy(10).new_instance(flaky.clone()).await;
        instance.quit();

        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(flaky.attempts(), 1);
        assert!(flaky.completions().is_empty());
        assert!(!instance.is_restarting());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_fails_immediately() {
        let flaky = Flaky::new(1);
        let instance = strategy(0).new_instance(flaky.clone()).await;

        assert_eq!(flaky.attempts(), 0);
        assert_eq!(flaky.completions(), vec![false]);
        assert!(!instance.is_restarting());
    }
}
