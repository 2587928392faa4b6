use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Something a strategy can try to bring back to life.
///
/// Implemented by the host that owns the crashed activity; the strategy never
/// touches the activity directly.
#[async_trait]
pub trait Restartable: Send + Sync + 'static {
    /// Makes one restart attempt.
    async fn attempt_restart(&self);

    /// True while the restarted activity looks healthy.
    fn is_restarted(&self) -> bool;

    /// Called exactly once when the strategy gives its verdict.
    ///
    /// `success` is true only when the restart held for the strategy's
    /// success window.
    async fn restart_complete(&self, success: bool);
}

/// Live supervision of one restart, handed out by
/// [`RestartStrategy::new_instance`].
pub trait RestartStrategyInstance: Send + Sync {
    /// Abandons the restart; no completion call follows.
    fn quit(&self);

    /// True while the strategy is still trying.
    fn is_restarting(&self) -> bool;
}

/// Observer with a veto on restart attempts.
#[async_trait]
pub trait RestartStrategyListener: Send + Sync + 'static {
    /// Votes on an attempt.
    ///
    /// `continue_so_far` folds the votes of earlier listeners; returning
    /// `false` vetoes the attempt. Every listener is consulted regardless of
    /// earlier votes.
    async fn on_restart_attempt(
        &self,
        _restartable: &Arc<dyn Restartable>,
        continue_so_far: bool,
    ) -> bool {
        continue_so_far
    }

    /// The instance ended with a successful restart.
    async fn on_restart_success(&self, _restartable: &Arc<dyn Restartable>) {}

    /// The instance ended without a successful restart.
    async fn on_restart_failure(&self, _restartable: &Arc<dyn Restartable>) {}
}

/// Produces one [`RestartStrategyInstance`] per crash.
#[async_trait]
pub trait RestartStrategy: Send + Sync + 'static {
    /// Starts supervising one restart.
    ///
    /// Strategies that refuse to restart complete with failure before
    /// returning.
    async fn new_instance(
        &self,
        restartable: Arc<dyn Restartable>,
    ) -> Box<dyn RestartStrategyInstance>;
}

/// Shared set of restart listeners with AND-folded attempt votes.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Mutex<Vec<Arc<dyn RestartStrategyListener>>>,
}

impl ListenerSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener.
    pub fn add(&self, listener: Arc<dyn RestartStrategyListener>) {
        self.listeners
            .lock()
            .expect("listener set poisoned")
            .push(listener);
    }

    fn snapshot(&self) -> Vec<Arc<dyn RestartStrategyListener>> {
        self.listeners
            .lock()
            .expect("listener set poisoned")
            .clone()
    }

    /// Folds the attempt votes of every listener; `false` vetoes.
    pub async fn vote_attempt(&self, restartable: &Arc<dyn Restartable>) -> bool {
        let mut cont = true;
        for listener in self.snapshot() {
            cont = listener.on_restart_attempt(restartable, cont).await && cont;
        }
        cont
    }

    /// Announces a successful restart to every listener.
    pub async fn notify_success(&self, restartable: &Arc<dyn Restartable>) {
        for listener in self.snapshot() {
            listener.on_restart_success(restartable).await;
        }
    }

    /// Announces a failed restart to every listener.
    pub async fn notify_failure(&self, restartable: &Arc<dyn Restartable>) {
        for listener in self.snapshot() {
            listener.on_restart_failure(restartable).await;
        }
    }
}
