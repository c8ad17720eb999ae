//! Reminder model: the closed set of reminder kinds and their identities.
//!
//! Each kind owns one stable numeric id, used both as the timer registration
//! key and as the notification id. One slot per kind: re-registering a kind
//! replaces its pending timer, re-presenting it replaces its notification.

mod boot;
mod delivery;
mod scheduler;

pub use boot::BootRecoveryHandler;
pub use delivery::{DeliveryHandler, DeliveryOutcome};
pub use scheduler::{next_trigger, ReminderScheduler, SCHEDULE_BUFFER_SECS};

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Category a reminder belongs to, checked against the per-category
/// enable flags in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderCategory {
    Meal,
    Hydration,
    Summary,
}

/// The closed set of reminders the app can fire.
///
/// The three hydration slots are distinct kinds (distinct timer/notification
/// ids) that share the `hydration` firing tag and fixed times of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    Breakfast,
    Lunch,
    Dinner,
    Hydration1,
    Hydration2,
    Hydration3,
    DailySummary,
}

impl ReminderKind {
    /// Every kind, in scheduling order.
    pub const ALL: [ReminderKind; 7] = [
        ReminderKind::Breakfast,
        ReminderKind::Lunch,
        ReminderKind::Dinner,
        ReminderKind::Hydration1,
        ReminderKind::Hydration2,
        ReminderKind::Hydration3,
        ReminderKind::DailySummary,
    ];

    /// Stable numeric identity. Used as the timer registration key and the
    /// notification id, so both deduplicate per kind.
    pub fn id(self) -> u32 {
        match self {
            ReminderKind::Breakfast => 1001,
            ReminderKind::Lunch => 1002,
            ReminderKind::Dinner => 1003,
            ReminderKind::Hydration1 => 2001,
            ReminderKind::Hydration2 => 2002,
            ReminderKind::Hydration3 => 2003,
            ReminderKind::DailySummary => 3001,
        }
    }

    /// Reverse of [`ReminderKind::id`], for hosts that carry only the
    /// numeric key through the fire callback.
    pub fn from_id(id: u32) -> Option<ReminderKind> {
        ReminderKind::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Firing identity string carried by the timer registration.
    pub fn tag(self) -> &'static str {
        match self {
            ReminderKind::Breakfast => "meal_breakfast",
            ReminderKind::Lunch => "meal_lunch",
            ReminderKind::Dinner => "meal_dinner",
            ReminderKind::Hydration1 | ReminderKind::Hydration2 | ReminderKind::Hydration3 => {
                "hydration"
            }
            ReminderKind::DailySummary => "daily_summary",
        }
    }

    pub fn category(self) -> ReminderCategory {
        match self {
            ReminderKind::Breakfast | ReminderKind::Lunch | ReminderKind::Dinner => {
                ReminderCategory::Meal
            }
            ReminderKind::Hydration1 | ReminderKind::Hydration2 | ReminderKind::Hydration3 => {
                ReminderCategory::Hydration
            }
            ReminderKind::DailySummary => ReminderCategory::Summary,
        }
    }

    /// Fixed time of day for the non-configurable hydration slots.
    pub fn fixed_time(self) -> Option<TimeOfDay> {
        match self {
            ReminderKind::Hydration1 => Some(TimeOfDay { hour: 10, minute: 0 }),
            ReminderKind::Hydration2 => Some(TimeOfDay { hour: 15, minute: 0 }),
            ReminderKind::Hydration3 => Some(TimeOfDay { hour: 18, minute: 0 }),
            _ => None,
        }
    }

    /// Safe fallback time used when a configured time string is malformed.
    /// Hydration slots return their fixed time.
    pub fn default_time(self) -> TimeOfDay {
        match self {
            ReminderKind::Breakfast => TimeOfDay { hour: 8, minute: 0 },
            ReminderKind::Lunch => TimeOfDay { hour: 13, minute: 0 },
            ReminderKind::Dinner => TimeOfDay { hour: 19, minute: 0 },
            ReminderKind::Hydration1 => TimeOfDay { hour: 10, minute: 0 },
            ReminderKind::Hydration2 => TimeOfDay { hour: 15, minute: 0 },
            ReminderKind::Hydration3 => TimeOfDay { hour: 18, minute: 0 },
            ReminderKind::DailySummary => TimeOfDay { hour: 21, minute: 0 },
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// A wall-clock time of day, minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    /// Range-checked constructor.
    pub fn new(hour: u8, minute: u8) -> Option<TimeOfDay> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay { hour, minute })
        } else {
            None
        }
    }

    /// Parse a zero-padded or unpadded `"HH:MM"` string.
    pub fn parse(s: &str) -> Option<TimeOfDay> {
        let (h, m) = s.split_once(':')?;
        TimeOfDay::new(h.trim().parse().ok()?, m.trim().parse().ok()?)
    }

    pub fn naive(self) -> NaiveTime {
        // Range invariant is held by the constructors.
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
