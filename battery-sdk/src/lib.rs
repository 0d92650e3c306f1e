//! # Battery SDK
//!
//! One-shot queries and change subscriptions over the host platform's
//! battery facility.
//!
//! # Architecture
//!
//! ```text
//! Host facility → battery-host (traits, sysfs/mock backends)
//!                      ├── Battery (one-shot queries)
//!                      └── BatteryEventManager (demand-driven subscriptions)
//!                               └── snapshots → application messages
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::{mpsc, Arc};
//! use battery_sdk::prelude::*;
//!
//! let host = Arc::new(SysfsBatteryHost::new());
//!
//! // One-shot query
//! let battery = Battery::new(host.clone());
//! let status = battery.status().await?;
//! println!("battery at {}%", status.level_percent());
//!
//! // Change subscription; the host listener attaches on the first
//! // subscriber and detaches after the last one leaves
//! let manager = BatteryEventManager::new(host);
//! let (tx, rx) = mpsc::channel();
//! manager.subscribe(Subscription::new(
//!     SubscriptionId::new("status-bar"),
//!     tx,
//!     |status| status.level_percent(),
//! ))?;
//! for percent in rx {
//!     println!("battery: {}%", percent);
//! }
//! ```
//!
//! Queries fail loudly with [`BatteryError::Unsupported`] on hosts
//! without a battery facility; subscriptions on such hosts are accepted
//! silently and simply never fire.

// Query facade
mod battery;

// Error types
pub mod error;

// Logging infrastructure
pub mod logging;

// ============================================================================
// Re-exports
// ============================================================================

pub use battery::Battery;
pub use error::{BatteryError, Result};

// Subscription management
pub use battery_events::{
    decode_reading, BatteryEventManager, BatteryStatus, EventManagerError, StatusMapper,
    Subscription, SubscriptionId,
};

// Host boundary
pub use battery_host::{
    BatteryHost, ChangeCategory, HostBattery, HostError, RawBatteryReading, RegistrationId,
    SysfsBatteryHost, SysfsConfig,
};

// Logging
pub use logging::{init_logging, init_logging_from_env, init_silent, LoggingError, LoggingMode};

/// Commonly used types for convenient importing
///
/// ```rust
/// use battery_sdk::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Battery, BatteryError, BatteryEventManager, BatteryHost, BatteryStatus, Result,
        Subscription, SubscriptionId, SysfsBatteryHost,
    };
}
