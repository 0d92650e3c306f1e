//! Raw data model at the host boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One raw attribute reading as reported by the host facility.
///
/// Every field is optional: a host may omit attributes it cannot report.
/// The two time fields carry seconds and use `f64::INFINITY` as the
/// "unbounded/unknown" sentinel; a missing field means the same thing.
/// Normalization into an application-facing snapshot happens downstream,
/// never here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawBatteryReading {
    /// Whether the battery is charging.
    pub charging: Option<bool>,
    /// Charge level in `[0, 1]`.
    pub level: Option<f64>,
    /// Seconds until fully charged.
    pub charging_time_secs: Option<f64>,
    /// Seconds until empty.
    pub discharging_time_secs: Option<f64>,
}

/// The named change-event categories a host battery can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeCategory {
    /// The charging flag flipped.
    Charging,
    /// The charge level moved.
    Level,
    /// The time-to-full estimate changed.
    ChargingTime,
    /// The time-to-empty estimate changed.
    DischargingTime,
}

impl ChangeCategory {
    /// All four categories, in declaration order.
    pub const ALL: [ChangeCategory; 4] = [
        ChangeCategory::Charging,
        ChangeCategory::Level,
        ChangeCategory::ChargingTime,
        ChangeCategory::DischargingTime,
    ];
}

/// Opaque handle identifying one change-event registration.
///
/// Returned by [`crate::host::HostBattery::register`] and passed back on
/// [`crate::host::HostBattery::unregister`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

impl RegistrationId {
    /// Wrap a backend-assigned raw id.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reg-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_default_is_all_absent() {
        let reading = RawBatteryReading::default();
        assert_eq!(reading.charging, None);
        assert_eq!(reading.level, None);
        assert_eq!(reading.charging_time_secs, None);
        assert_eq!(reading.discharging_time_secs, None);
    }

    #[test]
    fn test_reading_serde_round_trip() {
        let reading = RawBatteryReading {
            charging: Some(true),
            level: Some(0.42),
            charging_time_secs: Some(1800.0),
            discharging_time_secs: None,
        };

        let json = serde_json::to_string(&reading).unwrap();
        let back: RawBatteryReading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }

    #[test]
    fn test_registration_id_display() {
        let id = RegistrationId::new(7);
        assert_eq!(id.to_string(), "reg-7");
        assert_eq!(id.raw(), 7);
    }

    #[test]
    fn test_all_categories_distinct() {
        let set: std::collections::HashSet<_> = ChangeCategory::ALL.iter().collect();
        assert_eq!(set.len(), 4);
    }
}
