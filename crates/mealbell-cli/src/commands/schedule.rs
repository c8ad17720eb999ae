use chrono::Local;
use clap::Subcommand;
use mealbell_core::reminder::next_trigger;
use mealbell_core::{ReminderKind, SettingsStore};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show the next trigger instant for every reminder
    Preview,
    /// Show enabled flags and configured times
    Status,
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open_default()?;
    let settings = store.load();
    match action {
        ScheduleAction::Preview => {
            let now = Local::now();
            for kind in ReminderKind::ALL {
                if !settings.kind_enabled(kind) {
                    println!("{kind:<16} disabled");
                    continue;
                }
                match settings.time_of_day(kind) {
                    Some(at) => {
                        let trigger = next_trigger(now, at);
                        println!("{kind:<16} {}", trigger.format("%Y-%m-%d %H:%M:%S"));
                    }
                    None => println!("{kind:<16} no time configured"),
                }
            }
        }
        ScheduleAction::Status => {
            println!("enabled              {}", settings.enabled);
            println!("meal_reminders       {}", settings.meal_reminders);
            println!("hydration_reminders  {}", settings.hydration_reminders);
            println!("daily_summary        {}", settings.daily_summary);
            for kind in ReminderKind::ALL {
                let time = settings
                    .time_of_day(kind)
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "(unset)".to_string());
                println!("{kind:<16}     {time}");
            }
        }
    }
    Ok(())
}
