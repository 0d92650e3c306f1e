//! Battery status snapshot.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Immutable snapshot of all battery attributes at one instant.
///
/// The two time fields are `None` (not merely very large) when the host
/// reports them as unbounded or unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// Whether the battery is currently charging.
    pub is_charging: bool,
    /// Charge level in `[0, 1]`.
    pub level: f64,
    /// Time until fully charged.
    pub charging_time: Option<Duration>,
    /// Time until empty.
    pub discharging_time: Option<Duration>,
}

impl BatteryStatus {
    /// Charge level as a whole percentage, for display.
    pub fn level_percent(&self) -> u8 {
        (self.level * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_percent_rounds() {
        let status = BatteryStatus {
            is_charging: false,
            level: 0.734,
            charging_time: None,
            discharging_time: None,
        };
        assert_eq!(status.level_percent(), 73);
    }
}
