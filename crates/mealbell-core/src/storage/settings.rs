//! TOML-based reminder settings.
//!
//! Stores the master switch, the per-category switches and the configured
//! times of day. Settings are the only state that survives a reboot; the
//! whole timer schedule is derivable from this file alone.
//!
//! Settings are stored at `~/.config/mealbell/settings.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::data_dir;
use crate::error::SettingsError;
use crate::reminder::{ReminderCategory, ReminderKind, TimeOfDay};

/// Persisted reminder settings.
///
/// Time fields hold `"HH:MM"` strings and are absent until the user picks a
/// time; an unconfigured kind is simply not scheduled. A *malformed* string
/// is treated as configured and falls back to the kind's default time, so a
/// corrupted value degrades the time rather than silently dropping the
/// reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    /// Master switch. Off means no timer may be pending for any kind.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub meal_reminders: bool,
    #[serde(default = "default_true")]
    pub hydration_reminders: bool,
    #[serde(default = "default_true")]
    pub daily_summary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_summary_time: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            meal_reminders: true,
            hydration_reminders: true,
            daily_summary: true,
            breakfast_time: None,
            lunch_time: None,
            dinner_time: None,
            daily_summary_time: None,
        }
    }
}

impl ReminderSettings {
    pub fn category_enabled(&self, category: ReminderCategory) -> bool {
        match category {
            ReminderCategory::Meal => self.meal_reminders,
            ReminderCategory::Hydration => self.hydration_reminders,
            ReminderCategory::Summary => self.daily_summary,
        }
    }

    /// Whether `kind` may have a pending timer under the current flags.
    pub fn kind_enabled(&self, kind: ReminderKind) -> bool {
        self.enabled && self.category_enabled(kind.category())
    }

    fn time_string(&self, kind: ReminderKind) -> Option<&String> {
        match kind {
            ReminderKind::Breakfast => self.breakfast_time.as_ref(),
            ReminderKind::Lunch => self.lunch_time.as_ref(),
            ReminderKind::Dinner => self.dinner_time.as_ref(),
            ReminderKind::DailySummary => self.daily_summary_time.as_ref(),
            _ => None,
        }
    }

    /// Configured time of day for `kind`.
    ///
    /// Hydration slots always return their fixed time. Configurable kinds
    /// return `None` while unconfigured; a malformed stored string falls
    /// back to the kind's hard-coded default.
    pub fn time_of_day(&self, kind: ReminderKind) -> Option<TimeOfDay> {
        if let Some(fixed) = kind.fixed_time() {
            return Some(fixed);
        }
        let raw = self.time_string(kind)?;
        match TimeOfDay::parse(raw) {
            Some(t) => Some(t),
            None => {
                warn!(
                    kind = kind.tag(),
                    value = raw.as_str(),
                    "malformed time of day; using default"
                );
                Some(kind.default_time())
            }
        }
    }
}

/// Handle to the settings file. Cheap to clone; every read goes to disk so
/// fire-time checks always see the latest toggles.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

const SETTINGS_FILE: &str = "settings.toml";

/// Keys accepted by [`SettingsStore::get`] / [`SettingsStore::set`].
pub const SETTINGS_KEYS: [&str; 8] = [
    "enabled",
    "meal_reminders",
    "hydration_reminders",
    "daily_summary",
    "breakfast_time",
    "lunch_time",
    "dinner_time",
    "daily_summary_time",
];

impl SettingsStore {
    /// Store at the default platform location.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created.
    pub fn open_default() -> Result<Self, SettingsError> {
        Ok(Self {
            path: data_dir()?.join(SETTINGS_FILE),
        })
    }

    /// Store at an explicit path. Used by tests and embedding hosts.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the settings file, surfacing failures.
    ///
    /// # Errors
    /// Returns [`SettingsError::ReadFailed`] if the file cannot be read and
    /// [`SettingsError::ParseFailed`] if it is not valid TOML.
    pub fn try_load(&self) -> Result<ReminderSettings, SettingsError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| SettingsError::ReadFailed {
                path: self.path.clone(),
                source,
            })?;
        Ok(toml::from_str(&content)?)
    }

    /// Read the settings file. A missing or unparseable file yields
    /// defaults; reminders keep working off a fresh install or a corrupt
    /// file rather than erroring at fire time.
    pub fn load(&self) -> ReminderSettings {
        match self.try_load() {
            Ok(settings) => settings,
            // Fresh install: no file yet, nothing worth logging.
            Err(SettingsError::ReadFailed { .. }) => ReminderSettings::default(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "corrupt settings file; using defaults");
                ReminderSettings::default()
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self, settings: &ReminderSettings) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(settings)?;
        std::fs::write(&self.path, content).map_err(|source| SettingsError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }

    /// Get a settings value as a string by key. `None` for unknown keys and
    /// for unconfigured time keys.
    pub fn get(&self, key: &str) -> Option<String> {
        let s = self.load();
        match key {
            "enabled" => Some(s.enabled.to_string()),
            "meal_reminders" => Some(s.meal_reminders.to_string()),
            "hydration_reminders" => Some(s.hydration_reminders.to_string()),
            "daily_summary" => Some(s.daily_summary.to_string()),
            "breakfast_time" => s.breakfast_time,
            "lunch_time" => s.lunch_time,
            "dinner_time" => s.dinner_time,
            "daily_summary_time" => s.daily_summary_time,
            _ => None,
        }
    }

    /// Set a settings value by key and persist.
    ///
    /// Flag keys take `true`/`false`; time keys take `"HH:MM"`, stored
    /// normalized and zero-padded.
    ///
    /// # Errors
    /// Returns an error for unknown keys, unparseable values, or a failed
    /// write.
    pub fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut s = self.load();
        match key {
            "enabled" => s.enabled = parse_flag(key, value)?,
            "meal_reminders" => s.meal_reminders = parse_flag(key, value)?,
            "hydration_reminders" => s.hydration_reminders = parse_flag(key, value)?,
            "daily_summary" => s.daily_summary = parse_flag(key, value)?,
            "breakfast_time" => s.breakfast_time = Some(parse_time(key, value)?),
            "lunch_time" => s.lunch_time = Some(parse_time(key, value)?),
            "dinner_time" => s.dinner_time = Some(parse_time(key, value)?),
            "daily_summary_time" => s.daily_summary_time = Some(parse_time(key, value)?),
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        self.save(&s)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, SettingsError> {
    value.parse().map_err(|_| SettingsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_time(key: &str, value: &str) -> Result<String, SettingsError> {
    TimeOfDay::parse(value)
        .map(|t| t.to_string())
        .ok_or_else(|| SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}
