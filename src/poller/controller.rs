use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::heartbeat::HeartbeatPoller;

/// Lifecycle of the single poller task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartState {
    NotStarted,
    Starting,
    Started,
}

/// What a call to [`PollerController::start`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyStarted,
}

/// Owns the poller task and guarantees it is spawned at most once.
pub struct PollerController {
    state: Mutex<StartState>,
    task: Mutex<Option<JoinHandle<()>>>,
    cancel: CancellationToken,
}

impl Default for PollerController {
    fn default() -> Self {
        Self::new()
    }
}

impl PollerController {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StartState::NotStarted),
            task: Mutex::new(None),
            cancel: CancellationToken::new(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, StartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Spawns `poller` unless a poller was already started; the loser's poller is dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, poller: HeartbeatPoller) -> StartOutcome {
        {
            let mut state = self.lock_state();
            if *state != StartState::NotStarted {
                debug!("Heartbeat poller already {:?}, ignoring start", *state);
                return StartOutcome::AlreadyStarted;
            }
            *state = StartState::Starting;
        }

        let handle = tokio::spawn(poller.run(self.cancel.child_token()));
        *self.lock_task() = Some(handle);
        *self.lock_state() = StartState::Started;

        info!(
            event_name = "poller.controller.started",
            event_domain = "poller",
            "Heartbeat poller started"
        );
        StartOutcome::Started
    }

    pub fn state(&self) -> StartState {
        *self.lock_state()
    }

    /// True while the spawned task has not finished.
    pub fn is_running(&self) -> bool {
        self.state() == StartState::Started
            && self
                .lock_task()
                .as_ref()
                .map_or(false, |handle| !handle.is_finished())
    }

    /// Cancels the poller and waits for its task to end. The poller is not restarted.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let handle = self.lock_task().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Heartbeat poller task ended abnormally: {}", e);
            }
        }
    }
}
