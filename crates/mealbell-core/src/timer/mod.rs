//! Host timer and notification boundaries.
//!
//! The scheduler talks to the platform through two narrow traits so the
//! same chain runs against an OS alarm facility, the in-process tokio
//! implementation, or a recording fake in tests.

mod inprocess;

pub use inprocess::InProcessTimerService;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::TimerError;

/// Requested timing quality for a registration.
///
/// `Exact` asks for best-effort-exact delivery; hosts that gate exact
/// timing behind a permission report that via
/// [`TimerService::exact_allowed`] and the scheduler degrades to `Inexact`
/// rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPrecision {
    Exact,
    Inexact,
}

/// One-shot, wake-capable timer facility.
///
/// At most one timer may be pending per id; callers pair every `register`
/// with a preceding `cancel` of the same id, so implementations may either
/// replace or reject a duplicate id without affecting correctness.
pub trait TimerService: Send + Sync {
    /// Whether the host currently grants best-effort-exact scheduling.
    fn exact_allowed(&self) -> bool {
        true
    }

    /// Register a one-shot wakeup at `at`, keyed by `id` and carrying the
    /// firing identity `tag`.
    ///
    /// # Errors
    /// Returns an error if the host refuses the registration. Callers treat
    /// this as "not scheduled"; it must not leave a partial registration.
    fn register(
        &self,
        id: u32,
        tag: &str,
        at: DateTime<Utc>,
        precision: TimerPrecision,
    ) -> Result<(), TimerError>;

    /// Remove any pending timer for `id`. Must succeed as a no-op when
    /// nothing is pending.
    ///
    /// # Errors
    /// Returns [`TimerError::CancelFailed`] only if the host cancellation
    /// call itself fails; "nothing was pending" is success. The in-process
    /// implementation cannot fail here, but OS-alarm hosts can (e.g. a
    /// dead binder/service connection), and the scheduler logs rather than
    /// propagates it.
    fn cancel(&self, id: u32) -> Result<(), TimerError>;
}

/// Notification presentation failure.
#[derive(Error, Debug)]
#[error("Notification {id} failed: {message}")]
pub struct NotifyError {
    pub id: u32,
    pub message: String,
}

/// Platform notification surface.
pub trait NotificationPresenter: Send + Sync {
    /// Present a notification. Reusing an `id` replaces any notification
    /// currently displayed under it.
    ///
    /// # Errors
    /// Returns an error if the platform rejects the notification. Delivery
    /// logs and continues; presentation failure never stops the chain.
    fn present(&self, id: u32, title: &str, body: &str) -> Result<(), NotifyError>;
}
