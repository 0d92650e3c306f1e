//! Reading decoder - normalizes raw host payloads into snapshots
//!
//! Malformed or missing fields never fail an event. Each field falls back
//! to its own default, so one bad attribute cannot suppress the rest of
//! the payload: `false` for the charging flag, `1.0` for the level, absent
//! for the two time estimates.

use std::time::Duration;

use battery_host::RawBatteryReading;

use crate::status::BatteryStatus;

/// Fallback charge level when the host omits or mangles the field
const DEFAULT_LEVEL: f64 = 1.0;

/// Decode a raw host reading into a status snapshot
pub fn decode_reading(raw: &RawBatteryReading) -> BatteryStatus {
    BatteryStatus {
        is_charging: raw.charging.unwrap_or(false),
        level: normalize_level(raw.level),
        charging_time: normalize_time_secs(raw.charging_time_secs),
        discharging_time: normalize_time_secs(raw.discharging_time_secs),
    }
}

fn normalize_level(level: Option<f64>) -> f64 {
    match level {
        Some(l) if l.is_finite() => l.clamp(0.0, 1.0),
        _ => DEFAULT_LEVEL,
    }
}

/// Convert a seconds field to a duration, mapping the host's infinite
/// sentinel (and anything else non-finite or negative) to absent
fn normalize_time_secs(secs: Option<f64>) -> Option<Duration> {
    match secs {
        Some(s) if s.is_finite() && s >= 0.0 => {
            Some(Duration::from_millis((s * 1000.0) as u64))
        }
        _ => None,
    }
}
