//! Fire-side handling: present the notification and re-arm the chain.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::reminder::{ReminderKind, ReminderScheduler};
use crate::storage::SettingsStore;
use crate::timer::NotificationPresenter;

/// Terminal result of one firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Notification presented (or attempted) and the next occurrence armed.
    Delivered,
    /// Settings disabled this kind between scheduling and firing; nothing
    /// presented, no successor registered. This is how a chain is stopped
    /// without explicit cancellation.
    Suppressed,
}

/// Invoked by the host when a reminder timer fires.
///
/// Runs inside the short execution budget of a broadcast-style callback:
/// one settings read, one notification post, one timer registration. No
/// network, no blocking I/O beyond that.
pub struct DeliveryHandler {
    scheduler: ReminderScheduler,
    presenter: Arc<dyn NotificationPresenter>,
    settings: SettingsStore,
}

impl std::fmt::Debug for DeliveryHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryHandler")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl DeliveryHandler {
    pub fn new(
        scheduler: ReminderScheduler,
        presenter: Arc<dyn NotificationPresenter>,
        settings: SettingsStore,
    ) -> Self {
        Self {
            scheduler,
            presenter,
            settings,
        }
    }

    /// Host callback for a fired timer.
    ///
    /// Settings are re-read here, not trusted from scheduling time: the
    /// enabled check catches disables that raced the firing, and the
    /// requeue picks up any time-of-day change starting with the next
    /// occurrence. Once the enabled check passes the requeue happens
    /// unconditionally; a presentation failure is logged but must not kill
    /// the chain.
    pub fn on_fire(&self, kind: ReminderKind) -> DeliveryOutcome {
        let settings = self.settings.load();
        if !settings.kind_enabled(kind) {
            debug!(kind = kind.tag(), "reminder disabled since scheduling; chain stops");
            return DeliveryOutcome::Suppressed;
        }

        let (title, body) = notification_copy(kind);
        if let Err(err) = self.presenter.present(kind.id(), title, body) {
            warn!(kind = kind.tag(), %err, "notification failed; re-arming anyway");
        }

        match settings.time_of_day(kind) {
            Some(at) => {
                self.scheduler.schedule_reminder(kind, at);
            }
            // Only reachable if the configured time was removed from the
            // settings file out from under a live chain.
            None => warn!(kind = kind.tag(), "no time configured at requeue; chain stops"),
        }
        DeliveryOutcome::Delivered
    }
}

/// Title and body for each kind. Locale handling lives in the app shell;
/// these are the built-in strings.
pub(crate) fn notification_copy(kind: ReminderKind) -> (&'static str, &'static str) {
    match kind {
        ReminderKind::Breakfast => (
            "Breakfast time",
            "Good morning! Don't forget to log your breakfast.",
        ),
        ReminderKind::Lunch => ("Lunch time", "Take a break and log your lunch."),
        ReminderKind::Dinner => ("Dinner time", "Wind down and log your dinner."),
        ReminderKind::Hydration1 | ReminderKind::Hydration2 | ReminderKind::Hydration3 => (
            "Time to hydrate",
            "Drink a glass of water and log it.",
        ),
        ReminderKind::DailySummary => (
            "Your daily summary",
            "Review today's meals and see how you did.",
        ),
    }
}
