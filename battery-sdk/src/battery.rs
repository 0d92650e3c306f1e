//! One-shot battery queries.

use std::sync::Arc;
use std::time::Duration;

use battery_events::{decode_reading, BatteryStatus};
use battery_host::BatteryHost;

use crate::error::{BatteryError, Result};

/// Query facade over a host battery facility.
///
/// Each operation performs a single asynchronous read against the host -
/// no retries, no caching, no timeout. When the host lacks a battery
/// facility every operation fails with [`BatteryError::Unsupported`]
/// without touching the host at all.
///
/// The discrete per-field operations are a convenience layer over
/// [`status`](Battery::status); each costs one host read.
pub struct Battery {
    host: Arc<dyn BatteryHost>,
    supported: bool,
}

impl Battery {
    /// Wrap a host backend. Support is probed once, here.
    pub fn new(host: Arc<dyn BatteryHost>) -> Self {
        let supported = host.is_supported();
        if !supported {
            tracing::info!("Host battery facility unsupported; all queries will fail");
        }
        Self { host, supported }
    }

    /// Whether the host reported a battery facility at construction.
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Read a full status snapshot.
    pub async fn status(&self) -> Result<BatteryStatus> {
        if !self.supported {
            return Err(BatteryError::Unsupported);
        }
        let battery = self.host.battery().await?;
        let raw = battery.read().await?;
        Ok(decode_reading(&raw))
    }

    /// Whether the battery is currently charging.
    pub async fn is_charging(&self) -> Result<bool> {
        Ok(self.status().await?.is_charging)
    }

    /// Charge level in `[0, 1]`.
    pub async fn charge_level(&self) -> Result<f64> {
        Ok(self.status().await?.level)
    }

    /// Time until fully charged; `None` when the host reports it unbounded.
    pub async fn charging_time(&self) -> Result<Option<Duration>> {
        Ok(self.status().await?.charging_time)
    }

    /// Time until empty; `None` when the host reports it unbounded.
    pub async fn discharging_time(&self) -> Result<Option<Duration>> {
        Ok(self.status().await?.discharging_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battery_host::mock::MockBatteryHost;
    use battery_host::RawBatteryReading;

    #[tokio::test]
    async fn test_unsupported_host_fails_every_query_without_host_calls() {
        let host = Arc::new(MockBatteryHost::unsupported());
        let battery = Battery::new(Arc::clone(&host) as Arc<dyn BatteryHost>);

        assert!(!battery.is_supported());
        assert!(matches!(battery.status().await, Err(BatteryError::Unsupported)));
        assert!(matches!(
            battery.is_charging().await,
            Err(BatteryError::Unsupported)
        ));
        assert!(matches!(
            battery.charge_level().await,
            Err(BatteryError::Unsupported)
        ));
        assert!(matches!(
            battery.charging_time().await,
            Err(BatteryError::Unsupported)
        ));
        assert!(matches!(
            battery.discharging_time().await,
            Err(BatteryError::Unsupported)
        ));

        // Zero host interaction across all five failures
        assert_eq!(host.host_call_count(), 0);
    }

    #[tokio::test]
    async fn test_level_query_with_unbounded_times() {
        let host = Arc::new(MockBatteryHost::with_reading(RawBatteryReading {
            charging: Some(true),
            level: Some(0.73),
            charging_time_secs: Some(f64::INFINITY),
            discharging_time_secs: Some(f64::INFINITY),
        }));
        let battery = Battery::new(Arc::clone(&host) as Arc<dyn BatteryHost>);

        assert_eq!(battery.charge_level().await.unwrap(), 0.73);
        assert_eq!(battery.charging_time().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_finite_discharging_time_in_milliseconds() {
        let host = Arc::new(MockBatteryHost::with_reading(RawBatteryReading {
            charging: Some(false),
            level: Some(0.12),
            charging_time_secs: Some(f64::INFINITY),
            discharging_time_secs: Some(5400.0),
        }));
        let battery = Battery::new(Arc::clone(&host) as Arc<dyn BatteryHost>);

        assert_eq!(
            battery.discharging_time().await.unwrap(),
            Some(Duration::from_millis(5_400_000))
        );
        assert!(!battery.is_charging().await.unwrap());
    }

    #[tokio::test]
    async fn test_each_query_is_a_single_read() {
        let host = Arc::new(MockBatteryHost::with_reading(RawBatteryReading {
            charging: Some(true),
            level: Some(0.5),
            ..Default::default()
        }));
        let battery = Battery::new(Arc::clone(&host) as Arc<dyn BatteryHost>);

        battery.status().await.unwrap();
        assert_eq!(host.read_count(), 1);

        battery.is_charging().await.unwrap();
        battery.charge_level().await.unwrap();
        assert_eq!(host.read_count(), 3);
        assert_eq!(host.register_count(), 0);
    }
}
