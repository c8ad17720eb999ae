//! In-process host for the reminder chain.
//!
//! Stands in for the platform runtime: arms the schedule from settings,
//! then drains timer fires through the delivery handler until Ctrl-C.

use std::sync::Arc;

use chrono::Local;
use mealbell_core::{
    BootRecoveryHandler, DeliveryHandler, InProcessTimerService, NotificationPresenter,
    NotifyError, ReminderKind, ReminderScheduler, SettingsStore,
};
use tracing::warn;

/// Presents notifications on the terminal.
struct TerminalPresenter;

impl NotificationPresenter for TerminalPresenter {
    fn present(&self, id: u32, title: &str, body: &str) -> Result<(), NotifyError> {
        println!(
            "[{}] #{id} {title}: {body}",
            Local::now().format("%H:%M:%S")
        );
        Ok(())
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(host_loop())
}

async fn host_loop() -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open_default()?;
    let (timers, mut fires) = InProcessTimerService::new();
    let timers = Arc::new(timers);

    let scheduler = ReminderScheduler::new(timers, store.clone());
    let delivery = DeliveryHandler::new(scheduler.clone(), Arc::new(TerminalPresenter), store.clone());

    // Startup takes the same path as post-reboot recovery: rebuild the
    // whole schedule from persisted settings.
    let armed = BootRecoveryHandler::new(scheduler.clone(), store).on_boot_completed();
    println!("{armed} reminder(s) armed; waiting for fires (Ctrl-C to quit)");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                scheduler.cancel_all();
                println!("stopped");
                return Ok(());
            }
            fired = fires.recv() => {
                match fired {
                    Some(id) => match ReminderKind::from_id(id) {
                        Some(kind) => {
                            delivery.on_fire(kind);
                        }
                        None => warn!(id, "unknown timer id fired"),
                    },
                    None => return Ok(()),
                }
            }
        }
    }
}
