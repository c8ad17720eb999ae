//! Core error types for mealbell-core.
//!
//! Scheduling is deliberately forgiving: registration failures are logged
//! and swallowed at the call site (a settings toggle must never crash
//! because the host refused a timer), so most of these types surface only
//! through the settings CLI and the timer-service boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mealbell-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings persistence errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Timer registration/cancellation errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read the settings file
    #[error("Failed to read settings at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the settings file
    #[error("Failed to write settings at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML
    #[error("Failed to parse settings: {0}")]
    ParseFailed(#[from] toml::de::Error),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    /// Key is not a known settings key
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    /// Value does not parse for the given key
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Timer-service boundary errors.
#[derive(Error, Debug)]
pub enum TimerError {
    /// The host refused or failed the registration call
    #[error("Timer registration failed for id {id}: {message}")]
    RegistrationFailed { id: u32, message: String },

    /// Cancellation call failed (distinct from "nothing was pending",
    /// which is not an error)
    #[error("Timer cancellation failed for id {id}: {message}")]
    CancelFailed { id: u32, message: String },
}
