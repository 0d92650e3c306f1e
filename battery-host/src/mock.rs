//! Scripted host backend for tests
//!
//! Mirrors the real host surface while journaling every interaction, so
//! tests can assert exact handshake/read/register/unregister counts and
//! fire simulated change events on demand.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use battery_host::mock::MockBatteryHost;
//! use battery_host::RawBatteryReading;
//!
//! let host = Arc::new(MockBatteryHost::supported());
//! host.set_reading(RawBatteryReading {
//!     charging: Some(true),
//!     level: Some(0.73),
//!     ..Default::default()
//! });
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::error::{HostError, Result};
use crate::host::{BatteryHost, HostBattery};
use crate::model::{ChangeCategory, RawBatteryReading, RegistrationId};

/// One host interaction, in call order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOp {
    /// `BatteryHost::battery` handshake
    Handshake,
    /// `HostBattery::read`
    Read,
    /// `HostBattery::register`
    Register,
    /// `HostBattery::unregister`
    Unregister,
}

#[derive(Default)]
struct MockState {
    reading: RawBatteryReading,
    ops: Vec<HostOp>,
    senders: Vec<(RegistrationId, mpsc::UnboundedSender<RawBatteryReading>)>,
    next_id: u64,
}

/// Scripted battery host
pub struct MockBatteryHost {
    supported: bool,
    state: Arc<Mutex<MockState>>,
}

impl MockBatteryHost {
    /// A host whose battery facility is present
    pub fn supported() -> Self {
        Self {
            supported: true,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// A host without a battery facility
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// A supported host scripted with an initial reading
    pub fn with_reading(reading: RawBatteryReading) -> Self {
        let host = Self::supported();
        host.set_reading(reading);
        host
    }

    /// Replace the reading returned by subsequent reads
    pub fn set_reading(&self, reading: RawBatteryReading) {
        self.state.lock().reading = reading;
    }

    /// Fire a simulated change event at every live registration
    pub fn emit(&self, reading: RawBatteryReading) {
        let mut state = self.state.lock();
        state.reading = reading.clone();
        state
            .senders
            .retain(|(_, sender)| sender.send(reading.clone()).is_ok());
    }

    /// The full interaction journal, in call order
    pub fn operations(&self) -> Vec<HostOp> {
        self.state.lock().ops.clone()
    }

    /// Total host interactions of any kind
    pub fn host_call_count(&self) -> usize {
        self.state.lock().ops.len()
    }

    fn count(&self, op: HostOp) -> usize {
        self.state.lock().ops.iter().filter(|o| **o == op).count()
    }

    /// Number of `battery()` handshakes performed
    pub fn handshake_count(&self) -> usize {
        self.count(HostOp::Handshake)
    }

    /// Number of single-shot reads performed
    pub fn read_count(&self) -> usize {
        self.count(HostOp::Read)
    }

    /// Number of change-event registrations performed
    pub fn register_count(&self) -> usize {
        self.count(HostOp::Register)
    }

    /// Number of deregistrations performed
    pub fn unregister_count(&self) -> usize {
        self.count(HostOp::Unregister)
    }

    /// Registrations currently live (registered and not yet unregistered)
    pub fn live_registrations(&self) -> usize {
        self.state.lock().senders.len()
    }
}

#[async_trait]
impl BatteryHost for MockBatteryHost {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn battery(&self) -> Result<Arc<dyn HostBattery>> {
        if !self.supported {
            return Err(HostError::Unsupported);
        }
        self.state.lock().ops.push(HostOp::Handshake);
        Ok(Arc::new(MockBattery {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockBattery {
    state: Arc<Mutex<MockState>>,
}

#[async_trait]
impl HostBattery for MockBattery {
    async fn read(&self) -> Result<RawBatteryReading> {
        let mut state = self.state.lock();
        state.ops.push(HostOp::Read);
        Ok(state.reading.clone())
    }

    async fn register(
        &self,
        _categories: &[ChangeCategory],
        events: mpsc::UnboundedSender<RawBatteryReading>,
    ) -> Result<RegistrationId> {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = RegistrationId::new(state.next_id);
        state.ops.push(HostOp::Register);
        state.senders.push((id, events));
        Ok(id)
    }

    async fn unregister(&self, id: RegistrationId) -> Result<()> {
        let mut state = self.state.lock();
        let before = state.senders.len();
        state.senders.retain(|(registered, _)| *registered != id);
        if state.senders.len() == before {
            return Err(HostError::UnknownRegistration(id));
        }
        state.ops.push(HostOp::Unregister);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(level: f64) -> RawBatteryReading {
        RawBatteryReading {
            charging: Some(false),
            level: Some(level),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unsupported_host_rejects_handshake() {
        let host = MockBatteryHost::unsupported();
        assert!(!host.is_supported());
        assert!(matches!(host.battery().await, Err(HostError::Unsupported)));
        // A rejected handshake is not a host interaction
        assert_eq!(host.host_call_count(), 0);
    }

    #[tokio::test]
    async fn test_journal_records_call_order() {
        let host = MockBatteryHost::with_reading(reading(0.5));
        let battery = host.battery().await.unwrap();
        battery.read().await.unwrap();

        let (tx, _rx) = mpsc::unbounded_channel();
        let id = battery.register(&ChangeCategory::ALL, tx).await.unwrap();
        battery.unregister(id).await.unwrap();

        assert_eq!(
            host.operations(),
            vec![
                HostOp::Handshake,
                HostOp::Read,
                HostOp::Register,
                HostOp::Unregister
            ]
        );
    }

    #[tokio::test]
    async fn test_emit_reaches_live_registrations_only() {
        let host = MockBatteryHost::supported();
        let battery = host.battery().await.unwrap();

        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        battery.register(&ChangeCategory::ALL, tx_a).await.unwrap();
        let id_b = battery.register(&ChangeCategory::ALL, tx_b).await.unwrap();
        battery.unregister(id_b).await.unwrap();

        host.emit(reading(0.25));

        assert_eq!(rx_a.recv().await.unwrap().level, Some(0.25));
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unregister_unknown_handle() {
        let host = MockBatteryHost::supported();
        let battery = host.battery().await.unwrap();
        assert!(matches!(
            battery.unregister(RegistrationId::new(42)).await,
            Err(HostError::UnknownRegistration(_))
        ));
    }
}
