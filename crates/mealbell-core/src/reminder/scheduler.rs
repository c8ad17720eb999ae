//! Trigger-time computation and timer registration.
//!
//! Recurrence is not expressed with a repeating host alarm. Power-saving
//! schedulers coalesce and drift those, and they cannot express "the same
//! wall-clock minute every day" across daylight-saving transitions. Instead
//! each reminder holds exactly one one-shot timer for its next occurrence,
//! recomputed from settings on every (re)arm.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use tracing::{debug, warn};

use crate::reminder::{ReminderKind, TimeOfDay};
use crate::storage::SettingsStore;
use crate::timer::{TimerPrecision, TimerService};

/// Margin below which a same-day trigger is pushed out to `now + buffer`
/// instead of being registered for an instant the host may already consider
/// past. Applies only under this threshold; between the threshold and the
/// rollover boundary the computed time is used as-is.
pub const SCHEDULE_BUFFER_SECS: i64 = 30;

fn wall_clock_at<Tz: TimeZone>(tz: &Tz, date: NaiveDate, at: TimeOfDay) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(at.naive())).earliest()
}

fn tomorrow_at<Tz: TimeZone>(tz: &Tz, today: NaiveDate, at: TimeOfDay) -> Option<DateTime<Tz>> {
    today.succ_opt().and_then(|d| wall_clock_at(tz, d, at))
}

/// Next trigger instant for a reminder configured at `at`, seen from `now`.
///
/// - already passed today (including exactly now): tomorrow at `at`
/// - less than [`SCHEDULE_BUFFER_SECS`] away: `now + buffer`, so scheduling
///   microseconds before the target minute does not skip a whole day
/// - otherwise: today at `at`
///
/// The next-day case re-derives the wall-clock time from tomorrow's date
/// rather than adding 24h of elapsed time, which keeps the configured
/// minute stable across DST transitions.
pub fn next_trigger<Tz: TimeZone>(now: DateTime<Tz>, at: TimeOfDay) -> DateTime<Tz> {
    let tz = now.timezone();
    let buffer = TimeDelta::seconds(SCHEDULE_BUFFER_SECS);
    let today = now.date_naive();

    let Some(candidate) = wall_clock_at(&tz, today, at) else {
        // Today's wall-clock minute was skipped by a DST jump.
        let fallback = now + buffer;
        return tomorrow_at(&tz, today, at).unwrap_or(fallback);
    };

    let delta = candidate.clone() - now.clone();
    if delta <= TimeDelta::zero() {
        let fallback = candidate + TimeDelta::days(1);
        tomorrow_at(&tz, today, at).unwrap_or(fallback)
    } else if delta < buffer {
        now + buffer
    } else {
        candidate
    }
}

/// Computes trigger instants from settings and keeps the host timer table
/// in step with them.
///
/// Every mutating call is short and synchronous; the host serializes
/// invocations (settings toggles, fire callbacks, boot), so correctness
/// rests on the cancel-then-register pairing, not on locking.
#[derive(Clone)]
pub struct ReminderScheduler {
    timers: Arc<dyn TimerService>,
    settings: SettingsStore,
}

impl std::fmt::Debug for ReminderScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderScheduler")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ReminderScheduler {
    pub fn new(timers: Arc<dyn TimerService>, settings: SettingsStore) -> Self {
        Self { timers, settings }
    }

    /// Register exactly one future firing for `kind` at the next occurrence
    /// of `at`. Any pending timer for `kind` is cancelled first, so calling
    /// twice in a row never yields two deliveries.
    ///
    /// Registration failure is logged and reported as `None` ("not
    /// scheduled"); it never propagates. Toggling a setting stays safe even
    /// when the host refuses the request.
    pub fn schedule_reminder(&self, kind: ReminderKind, at: TimeOfDay) -> Option<DateTime<Local>> {
        self.cancel_reminder(kind);

        let trigger = next_trigger(Local::now(), at);
        let precision = if self.timers.exact_allowed() {
            TimerPrecision::Exact
        } else {
            debug!(kind = kind.tag(), "exact timing not granted; registering inexact");
            TimerPrecision::Inexact
        };

        match self
            .timers
            .register(kind.id(), kind.tag(), trigger.with_timezone(&Utc), precision)
        {
            Ok(()) => {
                debug!(kind = kind.tag(), trigger = %trigger, "reminder scheduled");
                Some(trigger)
            }
            Err(err) => {
                warn!(kind = kind.tag(), %err, "timer registration failed; reminder not scheduled");
                None
            }
        }
    }

    /// Remove any pending timer for `kind`. Safe when none exists.
    pub fn cancel_reminder(&self, kind: ReminderKind) {
        if let Err(err) = self.timers.cancel(kind.id()) {
            warn!(kind = kind.tag(), %err, "timer cancellation failed");
        }
    }

    /// Rebuild the schedule from settings: every kind whose master and
    /// category flags are on and which has a time of day gets one pending
    /// timer. Returns how many were scheduled. Used at startup, after boot,
    /// and after the master switch flips back on.
    pub fn schedule_all(&self) -> usize {
        let settings = self.settings.load();
        let mut scheduled = 0;
        for kind in ReminderKind::ALL {
            if !settings.kind_enabled(kind) {
                continue;
            }
            let Some(at) = settings.time_of_day(kind) else {
                debug!(kind = kind.tag(), "no time configured; skipping");
                continue;
            };
            if self.schedule_reminder(kind, at).is_some() {
                scheduled += 1;
            }
        }
        scheduled
    }

    /// Cancel every kind unconditionally.
    pub fn cancel_all(&self) {
        for kind in ReminderKind::ALL {
            self.cancel_reminder(kind);
        }
    }
}
