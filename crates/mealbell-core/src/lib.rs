//! # MealBell Core Library
//!
//! This library provides the local recurring-reminder subsystem for the
//! MealBell diet tracker: meal reminders, hydration prompts and a daily
//! summary, fired at user-configured wall-clock times.
//!
//! ## Architecture
//!
//! Host-platform "repeating alarm" primitives are inexact and batched, so
//! recurrence is built as a self-requeuing chain of one-shot timers instead:
//! each delivery immediately registers the next occurrence from the current
//! settings. Pending timers do not survive a reboot; the persisted settings
//! file is the only durable source of truth and the full schedule is
//! reconstructed from it on boot.
//!
//! - **Scheduler**: computes the next trigger instant for each reminder and
//!   pairs every registration with a cancellation of the previous one, so a
//!   reminder can never be pending twice
//! - **Delivery**: invoked when a timer fires; presents the notification and
//!   re-arms the chain, or suppresses it when the user has since disabled
//!   the reminder
//! - **Storage**: TOML-based settings persistence
//! - **Timer**: trait boundary to the host timer facility, plus an
//!   in-process tokio-backed implementation for hosting the chain directly
//!
//! ## Key Components
//!
//! - [`ReminderScheduler`]: cancel-then-register scheduling over a
//!   [`TimerService`]
//! - [`DeliveryHandler`]: fire-side callback (present + requeue)
//! - [`BootRecoveryHandler`]: schedule reconstruction after restart
//! - [`SettingsStore`]: persisted reminder settings

pub mod error;
pub mod reminder;
pub mod storage;
pub mod timer;

pub use error::{CoreError, SettingsError, TimerError};
pub use reminder::{
    BootRecoveryHandler, DeliveryHandler, DeliveryOutcome, ReminderCategory, ReminderKind,
    ReminderScheduler, TimeOfDay,
};
pub use storage::{ReminderSettings, SettingsStore};
pub use timer::{
    InProcessTimerService, NotificationPresenter, NotifyError, TimerPrecision, TimerService,
};
