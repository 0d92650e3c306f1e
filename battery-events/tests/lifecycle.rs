//! End-to-end subscription lifecycle against the scripted host
//!
//! Exercises the full pipeline: declare interest, receive decoded
//! snapshots, drop interest, and verify the host listener is gone.

use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use battery_events::{BatteryEventManager, BatteryStatus, Subscription, SubscriptionId};
use battery_host::mock::MockBatteryHost;
use battery_host::RawBatteryReading;

fn wait_for(predicate: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if predicate() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    predicate()
}

fn snapshot_subscription(
    id: &str,
) -> (Subscription<BatteryStatus>, mpsc::Receiver<BatteryStatus>) {
    let (tx, rx) = mpsc::channel();
    let subscription = Subscription::new(SubscriptionId::new(id), tx, |status: &BatteryStatus| {
        status.clone()
    });
    (subscription, rx)
}

fn reading(charging: bool, level: f64) -> RawBatteryReading {
    RawBatteryReading {
        charging: Some(charging),
        level: Some(level),
        charging_time_secs: Some(f64::INFINITY),
        discharging_time_secs: Some(f64::INFINITY),
    }
}

#[test]
fn events_stop_after_last_unsubscribe_and_resume_on_resubscribe() {
    let host = Arc::new(MockBatteryHost::supported());
    let manager: BatteryEventManager<BatteryStatus> =
        BatteryEventManager::new(Arc::clone(&host) as Arc<dyn battery_host::BatteryHost>);

    // Round one: subscribe and receive
    let (sub, rx) = snapshot_subscription("round-one");
    manager.subscribe(sub).unwrap();
    assert!(wait_for(|| host.live_registrations() == 1));

    host.emit(reading(true, 0.5));
    assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap().level, 0.5);

    // Drop interest: the registration must disappear, and further host
    // activity must not reach the old receiver
    manager.unsubscribe(&SubscriptionId::new("round-one")).unwrap();
    assert!(wait_for(|| host.live_registrations() == 0));

    host.emit(reading(true, 0.6));
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

    // Round two: a fresh subscriber re-attaches and receives again
    let (sub, rx) = snapshot_subscription("round-two");
    manager.subscribe(sub).unwrap();
    assert!(wait_for(|| host.live_registrations() == 1));

    host.emit(reading(false, 0.7));
    let status = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert!(!status.is_charging);
    assert_eq!(status.level, 0.7);

    assert_eq!(host.register_count(), 2);
    assert_eq!(host.unregister_count(), 1);
}

#[test]
fn resubscribing_same_id_swaps_the_callback_without_host_traffic() {
    let host = Arc::new(MockBatteryHost::supported());
    let manager: BatteryEventManager<&'static str> =
        BatteryEventManager::new(Arc::clone(&host) as Arc<dyn battery_host::BatteryHost>);

    let (tx_old, rx_old) = mpsc::channel();
    manager
        .subscribe(Subscription::new(
            SubscriptionId::new("badge"),
            tx_old,
            |_: &BatteryStatus| "old",
        ))
        .unwrap();
    assert!(wait_for(|| host.register_count() == 1));

    let (tx_new, rx_new) = mpsc::channel();
    manager
        .subscribe(Subscription::new(
            SubscriptionId::new("badge"),
            tx_new,
            |_: &BatteryStatus| "new",
        ))
        .unwrap();

    host.emit(reading(true, 0.9));

    assert_eq!(rx_new.recv_timeout(Duration::from_secs(2)).unwrap(), "new");
    assert!(rx_old.recv_timeout(Duration::from_millis(100)).is_err());

    // The swap itself produced no attach or detach
    assert_eq!(host.register_count(), 1);
    assert_eq!(host.unregister_count(), 0);
}

#[test]
fn dropped_receiver_does_not_block_other_listeners() {
    let host = Arc::new(MockBatteryHost::supported());
    let manager: BatteryEventManager<BatteryStatus> =
        BatteryEventManager::new(Arc::clone(&host) as Arc<dyn battery_host::BatteryHost>);

    let (sub_a, rx_a) = snapshot_subscription("a");
    let (sub_b, rx_b) = snapshot_subscription("b");
    manager.subscribe(sub_a).unwrap();
    manager.subscribe(sub_b).unwrap();
    assert!(wait_for(|| host.live_registrations() == 1));

    // Listener "a" goes away without unsubscribing
    drop(rx_a);

    host.emit(reading(false, 0.33));
    let status = rx_b.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(status.level, 0.33);
}
