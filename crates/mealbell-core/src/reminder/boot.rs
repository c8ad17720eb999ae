//! Schedule reconstruction after device restart.
//!
//! Pending timers do not survive a reboot; persisted settings are the only
//! durable record of what should be scheduled.

use tracing::{debug, info};

use crate::reminder::ReminderScheduler;
use crate::storage::SettingsStore;

/// Invoked once by the host after boot completes.
#[derive(Debug, Clone)]
pub struct BootRecoveryHandler {
    scheduler: ReminderScheduler,
    settings: SettingsStore,
}

impl BootRecoveryHandler {
    pub fn new(scheduler: ReminderScheduler, settings: SettingsStore) -> Self {
        Self {
            scheduler,
            settings,
        }
    }

    /// Rebuild the full schedule from settings. No-op when the master
    /// switch is off. Returns how many reminders were armed.
    pub fn on_boot_completed(&self) -> usize {
        if !self.settings.load().enabled {
            debug!("reminders disabled; nothing to restore after boot");
            return 0;
        }
        let restored = self.scheduler.schedule_all();
        info!(restored, "reminder schedule rebuilt after boot");
        restored
    }
}
