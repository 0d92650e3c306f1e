//! # Battery Host
//!
//! The host-facility boundary for battery-sdk: trait definitions for a
//! platform's battery facility, the raw reading model, a Linux sysfs
//! backend, and a scripted mock backend for tests.
//!
//! # Architecture
//!
//! ```text
//! BatteryHost (is_supported, battery handshake)
//!      └── HostBattery (read, register, unregister)
//!               └── change events → mpsc → consumer
//! ```
//!
//! Backends report raw, un-normalized attribute values: optional fields,
//! times in seconds, `f64::INFINITY` for "unbounded/unknown". Turning
//! those into application-facing snapshots is the consumer's job.

pub mod error;
pub mod host;
pub mod mock;
pub mod model;
pub mod sysfs;

pub use error::{HostError, Result};
pub use host::{BatteryHost, HostBattery};
pub use model::{ChangeCategory, RawBatteryReading, RegistrationId};
pub use sysfs::{SysfsBatteryHost, SysfsConfig};
