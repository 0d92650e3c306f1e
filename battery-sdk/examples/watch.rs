//! Print battery changes as they arrive.
//!
//! Run with `cargo run --example watch`. Set `BATTERY_LOG_MODE=development`
//! for manager diagnostics on stderr.

use std::sync::{mpsc, Arc};

use battery_sdk::{
    Battery, BatteryError, BatteryEventManager, BatteryHost, BatteryStatus, Subscription,
    SubscriptionId, SysfsBatteryHost,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    battery_sdk::init_logging_from_env()?;

    let host = Arc::new(SysfsBatteryHost::new());

    // One-shot read first
    let battery = Battery::new(host.clone());
    match battery.status().await {
        Ok(status) => println!(
            "battery: {}% ({})",
            status.level_percent(),
            if status.is_charging { "charging" } else { "discharging" }
        ),
        Err(BatteryError::Unsupported) => {
            eprintln!("no battery facility on this host");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    // Then follow changes until interrupted
    let manager = BatteryEventManager::new(host as Arc<dyn BatteryHost>);
    let (tx, rx) = mpsc::channel();
    manager.subscribe(Subscription::new(
        SubscriptionId::new("watch"),
        tx,
        |status: &BatteryStatus| status.clone(),
    ))?;

    for status in rx {
        println!(
            "battery: {}% ({})",
            status.level_percent(),
            if status.is_charging { "charging" } else { "discharging" }
        );
    }

    Ok(())
}
