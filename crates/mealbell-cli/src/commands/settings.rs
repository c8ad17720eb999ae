use clap::Subcommand;
use mealbell_core::storage::SETTINGS_KEYS;
use mealbell_core::{ReminderSettings, SettingsStore};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "enabled", "breakfast_time")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value ("true"/"false" for flags, "HH:MM" for times)
        value: String,
    },
    /// List all settings values
    List,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open_default()?;
    match action {
        SettingsAction::Get { key } => match store.get(&key) {
            Some(value) => println!("{value}"),
            None if SETTINGS_KEYS.contains(&key.as_str()) => println!("(unset)"),
            None => {
                eprintln!("unknown key: {key}");
                std::process::exit(1);
            }
        },
        SettingsAction::Set { key, value } => {
            store.set(&key, &value)?;
            println!("ok");
        }
        SettingsAction::List => {
            let json = serde_json::to_string_pretty(&store.load())?;
            println!("{json}");
        }
        SettingsAction::Reset => {
            store.save(&ReminderSettings::default())?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
