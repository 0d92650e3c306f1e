//! Linux sysfs battery backend
//!
//! Maps `/sys/class/power_supply` attributes onto the raw reading model.
//! The kernel exposes no portable battery change event, so each
//! registration runs an interval task that re-reads the supply and fires
//! when a watched attribute changes.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{HostError, Result};
use crate::host::{BatteryHost, HostBattery};
use crate::model::{ChangeCategory, RawBatteryReading, RegistrationId};

/// Sysfs backend configuration
#[derive(Debug, Clone)]
pub struct SysfsConfig {
    /// Root of the power-supply class
    pub power_supply_dir: PathBuf,
    /// Interval between change-detection reads
    pub poll_interval: Duration,
}

impl Default for SysfsConfig {
    fn default() -> Self {
        Self {
            power_supply_dir: PathBuf::from("/sys/class/power_supply"),
            poll_interval: Duration::from_secs(2),
        }
    }
}

/// Linux `/sys/class/power_supply` battery host
///
/// Support detection scans the class directory once at construction for a
/// supply of type `Battery`; the result is stable for the lifetime of the
/// host.
pub struct SysfsBatteryHost {
    config: SysfsConfig,
    battery_dir: Option<PathBuf>,
}

impl SysfsBatteryHost {
    /// Create a host over the default sysfs location
    pub fn new() -> Self {
        Self::with_config(SysfsConfig::default())
    }

    /// Create a host with custom configuration
    pub fn with_config(config: SysfsConfig) -> Self {
        let battery_dir = detect_battery(&config.power_supply_dir);
        match &battery_dir {
            Some(dir) => tracing::info!("Found battery at {}", dir.display()),
            None => tracing::info!(
                "No battery supply under {}",
                config.power_supply_dir.display()
            ),
        }
        Self {
            config,
            battery_dir,
        }
    }
}

impl Default for SysfsBatteryHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BatteryHost for SysfsBatteryHost {
    fn is_supported(&self) -> bool {
        self.battery_dir.is_some()
    }

    async fn battery(&self) -> Result<Arc<dyn HostBattery>> {
        let dir = self.battery_dir.clone().ok_or(HostError::Unsupported)?;
        Ok(Arc::new(SysfsBattery {
            dir,
            poll_interval: self.config.poll_interval,
            next_id: AtomicU64::new(1),
            watchers: Mutex::new(HashMap::new()),
        }))
    }
}

/// Scan the power-supply class directory for a supply of type `Battery`
fn detect_battery(power_supply_dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(power_supply_dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if let Ok(kind) = fs::read_to_string(path.join("type")) {
            if kind.trim().eq_ignore_ascii_case("battery") {
                return Some(path);
            }
        }
    }
    None
}

struct SysfsBattery {
    dir: PathBuf,
    poll_interval: Duration,
    next_id: AtomicU64,
    watchers: Mutex<HashMap<RegistrationId, JoinHandle<()>>>,
}

impl Drop for SysfsBattery {
    fn drop(&mut self) {
        for (_, handle) in self.watchers.lock().drain() {
            handle.abort();
        }
    }
}

#[async_trait]
impl HostBattery for SysfsBattery {
    async fn read(&self) -> Result<RawBatteryReading> {
        read_reading(&self.dir)
    }

    async fn register(
        &self,
        categories: &[ChangeCategory],
        events: mpsc::UnboundedSender<RawBatteryReading>,
    ) -> Result<RegistrationId> {
        let id = RegistrationId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let dir = self.dir.clone();
        let watched = categories.to_vec();
        let interval = self.poll_interval;

        let handle = tokio::spawn(async move {
            let mut last = read_reading(&dir).ok();
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // An interval's first tick completes immediately; consume it
            // so the baseline reading is not reported as a change.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let current = match read_reading(&dir) {
                    Ok(reading) => reading,
                    Err(e) => {
                        tracing::warn!("Sysfs battery read failed during watch: {}", e);
                        continue;
                    }
                };
                let changed = match &last {
                    Some(previous) => watched
                        .iter()
                        .any(|category| category_changed(*category, previous, &current)),
                    None => true,
                };
                if changed && events.send(current.clone()).is_err() {
                    tracing::debug!("Event receiver dropped, stopping sysfs watcher");
                    break;
                }
                last = Some(current);
            }
        });

        self.watchers.lock().insert(id, handle);
        tracing::debug!("Registered sysfs battery watcher {}", id);
        Ok(id)
    }

    async fn unregister(&self, id: RegistrationId) -> Result<()> {
        let handle = self
            .watchers
            .lock()
            .remove(&id)
            .ok_or(HostError::UnknownRegistration(id))?;
        handle.abort();
        tracing::debug!("Unregistered sysfs battery watcher {}", id);
        Ok(())
    }
}

/// Read one raw snapshot from a battery supply directory
fn read_reading(dir: &Path) -> Result<RawBatteryReading> {
    if !dir.exists() {
        return Err(HostError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("battery supply {} disappeared", dir.display()),
        )));
    }

    // `Full` counts as charging: the supply is on external power and the
    // kernel reports no time-to-empty in that state.
    let charging = fs::read_to_string(dir.join("status"))
        .ok()
        .map(|status| matches!(status.trim(), "Charging" | "Full"));

    let level = read_attr_f64(dir, "capacity").map(|pct| (pct / 100.0).clamp(0.0, 1.0));
    let charging_time_secs = read_attr_f64(dir, "time_to_full_now");
    let discharging_time_secs = read_attr_f64(dir, "time_to_empty_now");

    Ok(RawBatteryReading {
        charging,
        level,
        charging_time_secs,
        discharging_time_secs,
    })
}

fn read_attr_f64(dir: &Path, attr: &str) -> Option<f64> {
    fs::read_to_string(dir.join(attr))
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

fn category_changed(
    category: ChangeCategory,
    previous: &RawBatteryReading,
    current: &RawBatteryReading,
) -> bool {
    match category {
        ChangeCategory::Charging => previous.charging != current.charging,
        ChangeCategory::Level => previous.level != current.level,
        ChangeCategory::ChargingTime => previous.charging_time_secs != current.charging_time_secs,
        ChangeCategory::DischargingTime => {
            previous.discharging_time_secs != current.discharging_time_secs
        }
    }
}
