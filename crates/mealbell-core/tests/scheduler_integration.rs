//! Integration tests for scheduling against a recorded timer table.

mod common;

use chrono::{TimeDelta, Utc};
use common::RecordingTimers;
use mealbell_core::{
    ReminderKind, ReminderScheduler, ReminderSettings, TimeOfDay, TimerPrecision,
};

fn scheduler_with(timers: std::sync::Arc<RecordingTimers>) -> (tempfile::TempDir, ReminderScheduler) {
    let (dir, store) = common::store_with(&ReminderSettings::default());
    (dir, ReminderScheduler::new(timers, store))
}

#[test]
fn schedule_twice_leaves_one_pending_timer() {
    let timers = RecordingTimers::new();
    let (_dir, scheduler) = scheduler_with(timers.clone());
    let at = TimeOfDay::new(8, 0).unwrap();

    scheduler.schedule_reminder(ReminderKind::Breakfast, at);
    scheduler.schedule_reminder(ReminderKind::Breakfast, at);

    assert_eq!(timers.pending_ids(), vec![ReminderKind::Breakfast.id()]);
}

#[test]
fn reschedule_cancels_before_registering() {
    let timers = RecordingTimers::new();
    let (_dir, scheduler) = scheduler_with(timers.clone());

    scheduler.schedule_reminder(ReminderKind::Lunch, TimeOfDay::new(12, 0).unwrap());
    scheduler.schedule_reminder(ReminderKind::Lunch, TimeOfDay::new(12, 30).unwrap());

    // Both calls cancelled first; one slot pending at the end.
    assert_eq!(
        timers.cancels.lock().unwrap().as_slice(),
        &[ReminderKind::Lunch.id(), ReminderKind::Lunch.id()]
    );
    assert_eq!(timers.pending_ids(), vec![ReminderKind::Lunch.id()]);
}

#[test]
fn cancel_without_pending_timer_is_safe() {
    let timers = RecordingTimers::new();
    let (_dir, scheduler) = scheduler_with(timers.clone());
    scheduler.cancel_reminder(ReminderKind::Dinner);
    assert!(timers.pending_ids().is_empty());
}

#[test]
fn trigger_is_in_the_future_and_within_a_day() {
    let timers = RecordingTimers::new();
    let (_dir, scheduler) = scheduler_with(timers.clone());

    let trigger = scheduler
        .schedule_reminder(ReminderKind::Breakfast, TimeOfDay::new(8, 0).unwrap())
        .expect("registration succeeds");

    let now = Utc::now();
    let registered = timers
        .registration(ReminderKind::Breakfast.id())
        .expect("pending registration");
    assert_eq!(registered.at, trigger.with_timezone(&Utc));
    assert_eq!(registered.tag, "meal_breakfast");
    assert!(registered.at > now);
    assert!(registered.at <= now + TimeDelta::days(1) + TimeDelta::seconds(1));
}

#[test]
fn registration_failure_means_not_scheduled() {
    let timers = RecordingTimers::failing();
    let (_dir, scheduler) = scheduler_with(timers.clone());

    let trigger = scheduler.schedule_reminder(ReminderKind::Breakfast, TimeOfDay::new(8, 0).unwrap());

    assert!(trigger.is_none());
    assert!(timers.pending_ids().is_empty());
}

#[test]
fn missing_exact_permission_degrades_to_inexact() {
    let timers = RecordingTimers::without_exact_permission();
    let (_dir, scheduler) = scheduler_with(timers.clone());

    scheduler.schedule_reminder(ReminderKind::DailySummary, TimeOfDay::new(21, 0).unwrap());

    let registered = timers.registration(ReminderKind::DailySummary.id()).unwrap();
    assert_eq!(registered.precision, TimerPrecision::Inexact);
}

#[test]
fn exact_permission_registers_exact() {
    let timers = RecordingTimers::new();
    let (_dir, scheduler) = scheduler_with(timers.clone());

    scheduler.schedule_reminder(ReminderKind::DailySummary, TimeOfDay::new(21, 0).unwrap());

    let registered = timers.registration(ReminderKind::DailySummary.id()).unwrap();
    assert_eq!(registered.precision, TimerPrecision::Exact);
}

#[test]
fn schedule_all_respects_category_flags_and_configured_times() {
    let timers = RecordingTimers::new();
    let settings = ReminderSettings {
        enabled: true,
        meal_reminders: true,
        hydration_reminders: false,
        daily_summary: false,
        breakfast_time: Some("08:00".to_string()),
        lunch_time: Some("12:30".to_string()),
        dinner_time: None,
        daily_summary_time: Some("21:00".to_string()),
    };
    let (_dir, store) = common::store_with(&settings);
    let scheduler = ReminderScheduler::new(timers.clone(), store);

    let scheduled = scheduler.schedule_all();

    // Dinner has no time, hydration and summary are off.
    assert_eq!(scheduled, 2);
    assert_eq!(
        timers.pending_ids(),
        vec![ReminderKind::Breakfast.id(), ReminderKind::Lunch.id()]
    );
}

#[test]
fn master_switch_off_schedules_nothing() {
    let timers = RecordingTimers::new();
    let settings = ReminderSettings {
        enabled: false,
        breakfast_time: Some("08:00".to_string()),
        ..ReminderSettings::default()
    };
    let (_dir, store) = common::store_with(&settings);
    let scheduler = ReminderScheduler::new(timers.clone(), store);

    assert_eq!(scheduler.schedule_all(), 0);
    assert!(timers.pending_ids().is_empty());
}

#[test]
fn enabling_hydration_arms_exactly_three_slots() {
    let timers = RecordingTimers::new();
    let settings = ReminderSettings {
        enabled: true,
        meal_reminders: false,
        hydration_reminders: true,
        daily_summary: false,
        ..ReminderSettings::default()
    };
    let (_dir, store) = common::store_with(&settings);
    let scheduler = ReminderScheduler::new(timers.clone(), store);

    assert_eq!(scheduler.schedule_all(), 3);
    assert_eq!(
        timers.pending_ids(),
        vec![
            ReminderKind::Hydration1.id(),
            ReminderKind::Hydration2.id(),
            ReminderKind::Hydration3.id(),
        ]
    );
    let now = Utc::now();
    for id in timers.pending_ids() {
        let registered = timers.registration(id).unwrap();
        assert_eq!(registered.tag, "hydration");
        assert!(registered.at > now);
        assert!(registered.at <= now + TimeDelta::days(1) + TimeDelta::seconds(1));
    }
}

#[test]
fn cancel_all_empties_the_timer_table() {
    let timers = RecordingTimers::new();
    let (_dir, store) = common::store_with(&ReminderSettings {
        breakfast_time: Some("08:00".to_string()),
        lunch_time: Some("12:30".to_string()),
        dinner_time: Some("19:00".to_string()),
        daily_summary_time: Some("21:00".to_string()),
        ..ReminderSettings::default()
    });
    let scheduler = ReminderScheduler::new(timers.clone(), store);

    assert_eq!(scheduler.schedule_all(), 7);
    scheduler.cancel_all();
    assert!(timers.pending_ids().is_empty());
}

#[test]
fn settings_store_is_shared_not_snapshotted() {
    // A flag flip after construction is honored by the next schedule_all.
    let timers = RecordingTimers::new();
    let (_dir, store) = common::store_with(&ReminderSettings {
        breakfast_time: Some("08:00".to_string()),
        ..ReminderSettings::default()
    });
    let scheduler = ReminderScheduler::new(timers.clone(), store.clone());

    store.set("enabled", "false").unwrap();
    assert_eq!(scheduler.schedule_all(), 0);

    store.set("enabled", "true").unwrap();
    assert!(scheduler.schedule_all() > 0);
}
