//! Host facility traits
//!
//! The two-step shape mirrors the platform facilities this crate wraps:
//! a synchronous presence check, then an asynchronous handshake yielding
//! an opaque battery object that supports one-shot reads and change-event
//! registration.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;
use crate::model::{ChangeCategory, RawBatteryReading, RegistrationId};

/// Entry point to a platform's battery facility.
#[async_trait]
pub trait BatteryHost: Send + Sync {
    /// Whether the host exposes a battery facility at all.
    ///
    /// Backends compute this once at construction; the value is stable
    /// for the process lifetime.
    fn is_supported(&self) -> bool;

    /// Asynchronous handshake yielding the opaque host battery object.
    ///
    /// Fails with [`crate::HostError::Unsupported`] when
    /// [`is_supported`](BatteryHost::is_supported) is false.
    async fn battery(&self) -> Result<Arc<dyn HostBattery>>;
}

/// The opaque battery object obtained from [`BatteryHost::battery`].
#[async_trait]
pub trait HostBattery: Send + Sync {
    /// Single-shot read of all battery attributes.
    async fn read(&self) -> Result<RawBatteryReading>;

    /// Register for change events in the given categories.
    ///
    /// Each fired event carries the full raw reading as payload, sent on
    /// `events`. One registration may cover any subset of the categories;
    /// the returned handle deregisters the whole set at once.
    async fn register(
        &self,
        categories: &[ChangeCategory],
        events: mpsc::UnboundedSender<RawBatteryReading>,
    ) -> Result<RegistrationId>;

    /// Deregister a previously registered change listener.
    async fn unregister(&self, id: RegistrationId) -> Result<()>;
}
