use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::components::{ComponentContext, ComponentRegistry, ComponentRef};
use crate::config::Config;
use crate::controller::hooks::ActivityHooks;
use crate::error::{ActivityError, ComponentError};
use crate::events::{Bus, Event, EventKind};
use crate::resources::{ManagedResources, ResourceRef};
use crate::status::{ActivityState, ActivityStatus};
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::time::{MonotonicTimeProvider, TimeRef};

/// Drives one activity through startup, activation, liveness checks, and
/// shutdown.
///
/// The controller is the single writer of the activity status; every
/// transition replaces the status snapshot and broadcasts a
/// [`EventKind::StatusChanged`] event. All methods taking `&mut self` belong
/// to the lifecycle thread.
pub struct LifecycleController {
    name: String,
    config: Config,
    hooks: Arc<dyn ActivityHooks>,
    registry: ComponentRegistry,
    resources: ManagedResources,
    context: Option<Arc<ComponentContext>>,
    status: ActivityStatus,
    bus: Bus,
    time: TimeRef,
    drain_sample: Duration,
    drain_max: Duration,
}

impl LifecycleController {
    /// How often the shutdown drain re-samples the in-flight handler count.
    pub const DRAIN_SAMPLE_INTERVAL: Duration = Duration::from_millis(500);
    /// How long the shutdown drain waits before proceeding anyway.
    pub const DRAIN_MAX_WAIT: Duration = Duration::from_millis(3000);

    /// Creates a controller in status `Ready`.
    pub fn new(name: impl Into<String>, config: Config, hooks: Arc<dyn ActivityHooks>) -> Self {
        Self {
            name: name.into(),
            config,
            hooks,
            registry: ComponentRegistry::new(),
            resources: ManagedResources::new(),
            context: None,
            status: ActivityStatus::default(),
            bus: Bus::new(64),
            time: MonotonicTimeProvider::arc(),
            drain_sample: Self::DRAIN_SAMPLE_INTERVAL,
            drain_max: Self::DRAIN_MAX_WAIT,
        }
    }

    /// Overrides the shutdown drain timing.
    pub fn set_drain_timing(&mut self, sample_interval: Duration, max_wait: Duration) {
        self.drain_sample = sample_interval;
        self.drain_max = max_wait;
    }

    /// Overrides the event bus capacity (clamped to 1 minimum).
    ///
    /// Replaces the bus, so call it before `subscribe` or
    /// `attach_subscribers`; receivers of the previous bus are disconnected.
    pub fn set_bus_capacity(&mut self, capacity: usize) {
        self.bus = Bus::new(capacity);
    }

    /// Overrides the time source used for startup duration logging.
    pub fn set_time_provider(&mut self, time: TimeRef) {
        self.time = time;
    }

    /// Registers a component; duplicate names fail fast.
    pub fn add_component(&mut self, component: ComponentRef) -> Result<(), ComponentError> {
        self.registry.add(component)
    }

    /// Adds a managed resource; resources start before components and stop
    /// after them.
    pub fn add_resource(&mut self, resource: ResourceRef) {
        self.resources.add(resource);
    }

    /// The activity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The activity configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The component registry, for by-name lookups.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// The admission gate of the current activity instance, if one is live.
    pub fn context(&self) -> Option<Arc<ComponentContext>> {
        self.context.clone()
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> ActivityStatus {
        self.status.clone()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> ActivityState {
        self.status.state()
    }

    /// True while the status is `Active`.
    pub fn is_activated(&self) -> bool {
        self.status.state() == ActivityState::Active
    }

    /// Observes subsequent runtime events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Fans subsequent runtime events out to the given subscribers.
    ///
    /// Each subscriber gets its own bounded queue and worker; a slow
    /// subscriber never blocks the lifecycle thread. The pump ends, and the
    /// workers drain, once the controller is dropped.
    pub fn attach_subscribers(
        &self,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> tokio::task::JoinHandle<()> {
        let mut rx = self.bus.subscribe();
        tokio::spawn(async move {
            let set = SubscriberSet::new(subscribers);
            loop {
                match rx.recv().await {
                    Ok(ev) => set.emit(&ev),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "subscriber pump lagged, events skipped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            set.shutdown().await;
        })
    }

    /// Runs the startup sequence.
    ///
    /// On success the status becomes `Running` and handlers are admitted. On
    /// any failure the sequence aborts, handlers stay denied, and the status
    /// becomes `StartupFailure` carrying the cause; the host is expected to
    /// call [`handle_startup_failure`](Self::handle_startup_failure) next.
    pub async fn startup(&mut self) {
        let state = self.status.state();
        if state.is_running() || state == ActivityState::StartupAttempt {
            tracing::warn!(activity = %self.name, state = %state, "startup ignored, already started");
            return;
        }

        let began = self.time.current_time_millis();
        self.set_status(ActivityStatus::new(ActivityState::StartupAttempt));

        let context = ComponentContext::new();
        context.lock_running_set();
        self.context = Some(Arc::clone(&context));

        match self.run_startup_sequence(&context).await {
            Ok(()) => {
                context.unlock_running_set(true);
                self.set_status(ActivityStatus::new(ActivityState::Running));
                let elapsed = self.time.current_time_millis().saturating_sub(began);
                tracing::info!(activity = %self.name, elapsed_ms = elapsed, "activity started");

                if let Err(e) = self.hooks.on_post_startup(&context).await {
                    tracing::error!(
                        activity = %self.name,
                        error = %e,
                        "post startup hook failed"
                    );
                }
            }
            Err(e) => {
                context.unlock_running_set(false);
                tracing::error!(activity = %self.name, error = %e, "activity startup failed");
                self.set_status(
                    ActivityStatus::new(ActivityState::StartupFailure).with_cause(e.to_string()),
                );
            }
        }
    }

    async fn run_startup_sequence(
        &mut self,
        context: &Arc<ComponentContext>,
    ) -> Result<(), ActivityError> {
        self.hooks.on_setup(context).await?;
        self.resources.startup_all().await?;
        self.registry.configure_all(&self.config, context).await?;
        self.registry.startup_all().await?;
        self.hooks.on_startup(context).await?;
        Ok(())
    }

    /// Reacts to a failed startup: runs the `on_startup_failure` hook, then a
    /// full shutdown to clean up whatever the partial startup left behind.
    pub async fn handle_startup_failure(&mut self) {
        let context = self.context.clone().unwrap_or_else(ComponentContext::new);
        if let Err(e) = self.hooks.on_startup_failure(&context).await {
            tracing::error!(
                activity = %self.name,
                error = %e,
                "startup failure hook failed"
            );
        }
        self.shutdown().await;
    }

    /// Runs the shutdown sequence.
    ///
    /// New handlers are denied immediately; in-flight ones are drained with a
    /// bounded wait. Every teardown step is attempted regardless of prior
    /// failures. Returns `true` and status `Ready` when every step succeeded,
    /// otherwise `false` and status `ShutdownFailure`. The drain result is
    /// advisory and does not affect cleanliness.
    pub async fn shutdown(&mut self) -> bool {
        let context = self.context.take().unwrap_or_else(ComponentContext::new);
        context.clear_running();

        let drained = context
            .wait_on_no_processing_handlers(self.drain_sample, self.drain_max)
            .await;
        if !drained {
            tracing::warn!(
                activity = %self.name,
                in_flight = context.in_flight(),
                "shutdown proceeding with handlers still in flight"
            );
            self.bus.publish(
                Event::now(EventKind::HandlerDrainTimedOut)
                    .with_activity(self.name.clone())
                    .with_detail(format!("{} handlers still running", context.in_flight())),
            );
        }

        let mut clean = true;
        self.note_hook(
            "on_pre_shutdown",
            self.hooks.on_pre_shutdown(&context).await,
            &mut clean,
        );
        self.note_hook(
            "on_shutdown",
            self.hooks.on_shutdown(&context).await,
            &mut clean,
        );
        self.note_hook(
            "on_cleanup",
            self.hooks.on_cleanup(&context).await,
            &mut clean,
        );
        self.note_hook(
            "common_cleanup",
            self.hooks.common_cleanup(&context).await,
            &mut clean,
        );

        if !self.registry.shutdown_all_and_clear().await {
            clean = false;
        }
        if !self.resources.shutdown_all().await {
            clean = false;
        }

        if clean {
            self.set_status(
                ActivityStatus::new(ActivityState::Ready).with_description("post clean shutdown"),
            );
        } else {
            self.set_status(
                ActivityStatus::new(ActivityState::ShutdownFailure)
                    .with_cause("one or more shutdown steps failed"),
            );
        }
        clean
    }

    /// Transitions `Running` to `Active` via the `on_activate` hook.
    ///
    /// A hook error yields `ActivateFailure`; components and handlers are
    /// untouched.
    pub async fn activate(&mut self) {
        let context = self.context.clone().unwrap_or_else(ComponentContext::new);
        match self.hooks.on_activate(&context).await {
            Ok(()) => self.set_status(ActivityStatus::new(ActivityState::Active)),
            Err(e) => {
                tracing::error!(activity = %self.name, error = %e, "activation failed");
                self.set_status(
                    ActivityStatus::new(ActivityState::ActivateFailure).with_cause(e.to_string()),
                );
            }
        }
    }

    /// Transitions `Active` back to `Running` via the `on_deactivate` hook.
    ///
    /// A hook error yields `DeactivateFailure`; components and handlers are
    /// untouched.
    pub async fn deactivate(&mut self) {
        let context = self.context.clone().unwrap_or_else(ComponentContext::new);
        match self.hooks.on_deactivate(&context).await {
            Ok(()) => self.set_status(ActivityStatus::new(ActivityState::Running)),
            Err(e) => {
                tracing::error!(activity = %self.name, error = %e, "deactivation failed");
                self.set_status(
                    ActivityStatus::new(ActivityState::DeactivateFailure).with_cause(e.to_string()),
                );
            }
        }
    }

    /// Liveness poll: checks every started component and the
    /// `on_check_state` hook vote.
    ///
    /// A no-op unless the status is running-like. When anything reports
    /// unhealthy, the status becomes `Crashed` and the failure hooks run once;
    /// no components are shut down and in-flight handlers are left alone.
    pub async fn check_activity_state(&mut self) {
        if !self.status.state().is_running() {
            return;
        }

        let context = self.context.clone().unwrap_or_else(ComponentContext::new);
        let components_ok = self.registry.are_all_running();
        let hook_ok = self.hooks.on_check_state(&context).await;
        if components_ok && hook_ok {
            return;
        }

        tracing::error!(activity = %self.name, "activity no longer running");
        self.set_status(
            ActivityStatus::new(ActivityState::Crashed)
                .with_description("activity no longer running"),
        );

        let mut ignored = true;
        self.note_hook(
            "on_failure",
            self.hooks.on_failure(&context).await,
            &mut ignored,
        );
        self.note_hook(
            "on_cleanup",
            self.hooks.on_cleanup(&context).await,
            &mut ignored,
        );
        self.note_hook(
            "common_cleanup",
            self.hooks.common_cleanup(&context).await,
            &mut ignored,
        );
    }

    fn note_hook(&self, hook: &'static str, result: Result<(), ActivityError>, clean: &mut bool) {
        if let Err(e) = result {
            *clean = false;
            tracing::error!(activity = %self.name, hook, error = %e, "lifecycle hook failed");
        }
    }

    fn set_status(&mut self, new: ActivityStatus) {
        let old = std::mem::replace(&mut self.status, new.clone());
        tracing::info!(
            activity = %self.name,
            from = %old.state(),
            to = %new.state(),
            "status changed"
        );
        self.bus.publish(
            Event::now(EventKind::StatusChanged)
                .with_activity(self.name.clone())
                .with_transition(old, new),
        );
    }
}
