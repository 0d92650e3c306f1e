//! # Battery Events
//!
//! Demand-driven battery change subscription management with automatic
//! host listener lifecycle.
//!
//! ## Overview
//!
//! The event manager bridges a callback/event-based host battery facility
//! into a declarative subscription model. It provides a fully synchronous
//! interface; all async host interaction is hidden in a background worker
//! thread, so users never need async/await.
//!
//! ## Key Features
//!
//! - **Sync-First API**: all methods are synchronous
//! - **Demand-Driven Lifecycle**: the host listener is attached on the
//!   first subscriber and detached after the last one leaves
//! - **Single Registration**: at most one host registration exists at a
//!   time; intermediate subscription changes never re-attach
//! - **Ordered Fan-Out**: each host event is decoded once and delivered to
//!   every listener in insertion order, independently
//! - **Silent No-Op Path**: on hosts without a battery facility,
//!   subscription changes are accepted but nothing ever attaches or fires
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::{mpsc, Arc};
//! use battery_events::{BatteryEventManager, Subscription, SubscriptionId};
//! use battery_host::SysfsBatteryHost;
//!
//! let manager = BatteryEventManager::new(Arc::new(SysfsBatteryHost::new()));
//!
//! // Declare interest (sync); the host listener attaches now
//! let (tx, rx) = mpsc::channel();
//! manager.subscribe(Subscription::new(
//!     SubscriptionId::new("status-bar"),
//!     tx,
//!     |status| status.level_percent(),
//! ))?;
//!
//! // Consume mapped messages (blocking)
//! for percent in rx {
//!     println!("battery: {}%", percent);
//! }
//!
//! // Removing the last listener detaches the host listener
//! manager.unsubscribe(&SubscriptionId::new("status-bar"))?;
//! ```
//!
//! ## Architecture
//!
//! The manager implements a demand-driven observable over the host
//! facility:
//!
//! 1. **Declared Subscriptions**: applications register stable ids mapped
//!    to snapshot-to-message callbacks
//! 2. **Lifecycle Gating**: only the empty/non-empty transition of the
//!    listener set performs host I/O
//! 3. **Serialized Host Calls**: attach/detach run one at a time on a
//!    dedicated worker, so a detach can never race a pending attach
//! 4. **Decode Once, Deliver Many**: each raw host payload becomes one
//!    immutable snapshot, fanned out to every listener

pub mod decoder;
pub mod error;
pub mod manager;
pub mod status;
pub mod subscription;
pub mod worker;

// Re-export main types for convenience
pub use decoder::decode_reading;
pub use error::{EventManagerError, Result};
pub use manager::BatteryEventManager;
pub use status::BatteryStatus;
pub use subscription::{StatusMapper, Subscription, SubscriptionId};

// Re-export commonly used types from the host boundary
pub use battery_host::{BatteryHost, ChangeCategory, RawBatteryReading};

/// Prelude module for convenient imports
///
/// ```rust
/// use battery_events::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BatteryEventManager, BatteryHost, BatteryStatus, ChangeCategory, EventManagerError,
        RawBatteryReading, Result, Subscription, SubscriptionId,
    };
}
