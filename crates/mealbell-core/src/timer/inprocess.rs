//! In-process timer service backed by tokio tasks.
//!
//! One spawned sleep per pending registration; fired ids land on an mpsc
//! channel for the host loop to drain through the delivery handler. This is
//! the harness used by `mealbell-cli run` and by integration tests; it does
//! not survive process exit, which is exactly the property boot recovery
//! exists to paper over on real hosts.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{TimerPrecision, TimerService};
use crate::error::TimerError;

pub struct InProcessTimerService {
    fires: mpsc::UnboundedSender<u32>,
    pending: Mutex<HashMap<u32, JoinHandle<()>>>,
}

impl std::fmt::Debug for InProcessTimerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InProcessTimerService").finish_non_exhaustive()
    }
}

impl InProcessTimerService {
    /// Create the service and the receiving end of its fire channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<u32>) {
        let (fires, rx) = mpsc::unbounded_channel();
        (
            Self {
                fires,
                pending: Mutex::new(HashMap::new()),
            },
            rx,
        )
    }

    /// Number of registrations not yet cancelled. Completed sleeps are
    /// counted until their id is re-registered or cancelled; this is a
    /// debugging aid, not the source of truth for what will fire.
    pub fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .expect("pending timer table poisoned")
            .len()
    }
}

impl TimerService for InProcessTimerService {
    fn register(
        &self,
        id: u32,
        tag: &str,
        at: DateTime<Utc>,
        precision: TimerPrecision,
    ) -> Result<(), TimerError> {
        let runtime = Handle::try_current().map_err(|err| TimerError::RegistrationFailed {
            id,
            message: err.to_string(),
        })?;
        let delay = (at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        debug!(id, tag, %at, ?precision, "registering in-process timer");

        let fires = self.fires.clone();
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the host loop shut down; nothing to do.
            let _ = fires.send(id);
        });

        let mut pending = self.pending.lock().expect("pending timer table poisoned");
        if let Some(old) = pending.insert(id, task) {
            old.abort();
        }
        Ok(())
    }

    fn cancel(&self, id: u32) -> Result<(), TimerError> {
        let mut pending = self.pending.lock().expect("pending timer table poisoned");
        if let Some(task) = pending.remove(&id) {
            task.abort();
            debug!(id, "cancelled in-process timer");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[tokio::test]
    async fn register_fires_on_channel() {
        let (timers, mut rx) = InProcessTimerService::new();
        timers
            .register(7, "meal_breakfast", Utc::now(), TimerPrecision::Exact)
            .unwrap();
        let fired = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap();
        assert_eq!(fired, Some(7));
    }

    #[tokio::test]
    async fn cancel_prevents_fire() {
        let (timers, mut rx) = InProcessTimerService::new();
        timers
            .register(
                9,
                "hydration",
                Utc::now() + TimeDelta::milliseconds(50),
                TimerPrecision::Exact,
            )
            .unwrap();
        timers.cancel(9).unwrap();
        assert_eq!(timers.pending_count(), 0);
        let fired = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(fired.is_err(), "cancelled timer must not fire");
    }

    #[tokio::test]
    async fn reregister_replaces_pending_task() {
        let (timers, mut rx) = InProcessTimerService::new();
        for _ in 0..2 {
            timers
                .register(
                    5,
                    "daily_summary",
                    Utc::now() + TimeDelta::milliseconds(20),
                    TimerPrecision::Exact,
                )
                .unwrap();
        }
        assert_eq!(timers.pending_count(), 1);
        let first = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap();
        assert_eq!(first, Some(5));
        let second = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(second.is_err(), "superseded timer must not also fire");
    }

    #[test]
    fn register_outside_runtime_is_an_error() {
        let (timers, _rx) = InProcessTimerService::new();
        let result = timers.register(1, "meal_lunch", Utc::now(), TimerPrecision::Exact);
        assert!(matches!(
            result,
            Err(TimerError::RegistrationFailed { id: 1, .. })
        ));
    }
}
