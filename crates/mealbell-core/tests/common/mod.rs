//! Shared fakes for reminder integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use mealbell_core::{
    NotificationPresenter, NotifyError, ReminderSettings, SettingsStore, TimerError,
    TimerPrecision, TimerService,
};

/// One recorded `register` call, kept per id like a host timer table.
#[derive(Debug, Clone)]
pub struct Registration {
    pub id: u32,
    pub tag: String,
    pub at: DateTime<Utc>,
    pub precision: TimerPrecision,
}

/// Timer service that records the pending table instead of sleeping.
pub struct RecordingTimers {
    exact: bool,
    fail: bool,
    pub pending: Mutex<HashMap<u32, Registration>>,
    pub cancels: Mutex<Vec<u32>>,
}

impl RecordingTimers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            exact: true,
            fail: false,
            pending: Mutex::new(HashMap::new()),
            cancels: Mutex::new(Vec::new()),
        })
    }

    pub fn without_exact_permission() -> Arc<Self> {
        Arc::new(Self {
            exact: false,
            fail: false,
            pending: Mutex::new(HashMap::new()),
            cancels: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            exact: true,
            fail: true,
            pending: Mutex::new(HashMap::new()),
            cancels: Mutex::new(Vec::new()),
        })
    }

    pub fn pending_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.pending.lock().unwrap().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn registration(&self, id: u32) -> Option<Registration> {
        self.pending.lock().unwrap().get(&id).cloned()
    }
}

impl TimerService for RecordingTimers {
    fn exact_allowed(&self) -> bool {
        self.exact
    }

    fn register(
        &self,
        id: u32,
        tag: &str,
        at: DateTime<Utc>,
        precision: TimerPrecision,
    ) -> Result<(), TimerError> {
        if self.fail {
            return Err(TimerError::RegistrationFailed {
                id,
                message: "host refused".to_string(),
            });
        }
        self.pending.lock().unwrap().insert(
            id,
            Registration {
                id,
                tag: tag.to_string(),
                at,
                precision,
            },
        );
        Ok(())
    }

    fn cancel(&self, id: u32) -> Result<(), TimerError> {
        self.pending.lock().unwrap().remove(&id);
        self.cancels.lock().unwrap().push(id);
        Ok(())
    }
}

/// Presenter that records what it is asked to show.
pub struct RecordingPresenter {
    fail: bool,
    pub shown: Mutex<Vec<(u32, String, String)>>,
}

impl RecordingPresenter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            shown: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            shown: Mutex::new(Vec::new()),
        })
    }

    pub fn shown_ids(&self) -> Vec<u32> {
        self.shown.lock().unwrap().iter().map(|s| s.0).collect()
    }
}

impl NotificationPresenter for RecordingPresenter {
    fn present(&self, id: u32, title: &str, body: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError {
                id,
                message: "render failed".to_string(),
            });
        }
        self.shown
            .lock()
            .unwrap()
            .push((id, title.to_string(), body.to_string()));
        Ok(())
    }
}

/// Settings store on a temp file, pre-populated with `settings`.
pub fn store_with(settings: &ReminderSettings) -> (tempfile::TempDir, SettingsStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::open(dir.path().join("settings.toml"));
    store.save(settings).unwrap();
    (dir, store)
}
