mod settings;

pub use settings::{ReminderSettings, SettingsStore, SETTINGS_KEYS};

use std::path::PathBuf;

use crate::error::SettingsError;

/// Returns `~/.config/mealbell[-dev]/` based on MEALBELL_ENV.
///
/// Set MEALBELL_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, SettingsError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MEALBELL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("mealbell-dev")
    } else {
        base_dir.join("mealbell")
    };

    std::fs::create_dir_all(&dir).map_err(|source| SettingsError::WriteFailed {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
