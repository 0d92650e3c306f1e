//! Subscription model - stable ids mapped to application callbacks.

use std::fmt;
use std::sync::mpsc;

use crate::status::BatteryStatus;

/// Stable identifier for one declared subscription.
///
/// Chosen by the application; the manager keys the listener set on it so
/// re-declaring the same subscription replaces the callback instead of
/// duplicating it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(String);

impl SubscriptionId {
    /// Create an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Callback turning a snapshot into the application's message type.
pub type StatusMapper<M> = Box<dyn Fn(&BatteryStatus) -> M + Send + Sync>;

/// One declared subscription: a stable id, a callback mapping snapshots to
/// application messages, and the channel those messages are delivered on.
///
/// Mappers run on the manager's worker thread while the listener set is
/// held; they must not call back into the manager.
pub struct Subscription<M> {
    pub id: SubscriptionId,
    pub mapper: StatusMapper<M>,
    pub sink: mpsc::Sender<M>,
}

impl<M> Subscription<M> {
    /// Build a subscription from its parts.
    pub fn new(
        id: SubscriptionId,
        sink: mpsc::Sender<M>,
        mapper: impl Fn(&BatteryStatus) -> M + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            mapper: Box::new(mapper),
            sink,
        }
    }
}

impl<M> fmt::Debug for Subscription<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_maps_status() {
        let (tx, rx) = mpsc::channel();
        let sub = Subscription::new(SubscriptionId::new("pct"), tx, |status: &BatteryStatus| {
            status.level_percent()
        });

        let status = BatteryStatus {
            is_charging: false,
            level: 0.5,
            charging_time: None,
            discharging_time: None,
        };
        sub.sink.send((sub.mapper)(&status)).unwrap();
        assert_eq!(rx.recv().unwrap(), 50);
    }

    #[test]
    fn test_subscription_id_display() {
        let id = SubscriptionId::new("status-bar");
        assert_eq!(id.to_string(), "status-bar");
        assert_eq!(id.as_str(), "status-bar");
    }
}
