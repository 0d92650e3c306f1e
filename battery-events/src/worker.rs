//! Background worker thread for host event processing
//!
//! Spawns a thread with its own tokio runtime so attach/detach against the
//! async host facility stay strictly ordered while the manager itself
//! exposes a sync API. The worker owns the single host registration
//! handle; nothing else touches it.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use battery_host::{
    BatteryHost, ChangeCategory, HostBattery, RawBatteryReading, RegistrationId,
};
use tokio::sync::mpsc;

use crate::decoder::decode_reading;
use crate::subscription::Subscription;

/// Commands sent from the sync BatteryEventManager to the background worker
#[derive(Debug)]
pub enum Command {
    /// Attach the host change listener for all categories
    Attach,
    /// Detach the host change listener
    Detach,
    /// Shutdown the worker
    Shutdown,
}

/// Live registration state while attached
struct Attachment {
    battery: Arc<dyn HostBattery>,
    registration: RegistrationId,
    events: mpsc::UnboundedReceiver<RawBatteryReading>,
}

/// Spawns the background event worker thread
///
/// The worker owns its own single-threaded tokio runtime and manages:
/// - The host handshake and the single change-event registration
/// - Strict ordering of attach/detach requests
/// - Decoding and fan-out of host events to the shared listener set
pub(crate) fn spawn_event_worker<M: Send + 'static>(
    host: Arc<dyn BatteryHost>,
    command_rx: Receiver<Command>,
    listeners: Arc<RwLock<Vec<Subscription<M>>>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Failed to create tokio runtime for battery event worker: {}", e);
                return;
            }
        };

        rt.block_on(async {
            run_event_loop(host, command_rx, listeners).await;
        });
    })
}

/// Main event loop running inside the tokio runtime
///
/// Commands are drained and executed one at a time; each attach or detach
/// is awaited to completion before the next command is examined, so a
/// detach can never overtake a pending attach.
async fn run_event_loop<M: Send + 'static>(
    host: Arc<dyn BatteryHost>,
    command_rx: Receiver<Command>,
    listeners: Arc<RwLock<Vec<Subscription<M>>>>,
) {
    let mut attachment: Option<Attachment> = None;

    tracing::info!("Battery event worker started");

    loop {
        tokio::select! {
            // Forward host events to the listener set
            event = next_event(&mut attachment) => {
                match event {
                    Some(reading) => fan_out(&reading, &listeners),
                    None => {
                        tracing::warn!("Host event channel closed while attached");
                        attachment = None;
                    }
                }
            }

            // Process commands (poll periodically)
            _ = tokio::time::sleep(Duration::from_millis(10)) => {
                loop {
                    match command_rx.try_recv() {
                        Ok(Command::Attach) => attach(&host, &mut attachment).await,
                        Ok(Command::Detach) => detach(&mut attachment).await,
                        Ok(Command::Shutdown) => {
                            tracing::info!("Worker received shutdown command");
                            detach(&mut attachment).await;
                            return;
                        }
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => {
                            tracing::debug!("Command sender dropped, shutting down worker");
                            detach(&mut attachment).await;
                            return;
                        }
                    }
                }
            }
        }
    }
}

/// Await the next host event, or park forever while detached
async fn next_event(attachment: &mut Option<Attachment>) -> Option<RawBatteryReading> {
    match attachment {
        Some(a) => a.events.recv().await,
        None => std::future::pending().await,
    }
}

async fn attach(host: &Arc<dyn BatteryHost>, attachment: &mut Option<Attachment>) {
    if attachment.is_some() {
        tracing::warn!("Attach requested while already attached, ignoring");
        return;
    }

    let battery = match host.battery().await {
        Ok(battery) => battery,
        Err(e) => {
            tracing::warn!("Host battery handshake failed: {}", e);
            return;
        }
    };

    let (tx, rx) = mpsc::unbounded_channel();
    match battery.register(&ChangeCategory::ALL, tx).await {
        Ok(registration) => {
            tracing::debug!("Attached host battery listener {}", registration);
            *attachment = Some(Attachment {
                battery,
                registration,
                events: rx,
            });
        }
        Err(e) => tracing::warn!("Failed to register host battery listener: {}", e),
    }
}

async fn detach(attachment: &mut Option<Attachment>) {
    match attachment.take() {
        Some(a) => {
            if let Err(e) = a.battery.unregister(a.registration).await {
                tracing::warn!("Failed to unregister host battery listener: {}", e);
            } else {
                tracing::debug!("Detached host battery listener {}", a.registration);
            }
        }
        None => tracing::warn!("Detach requested but no host listener attached"),
    }
}

/// Decode one raw payload and deliver it to every listener in order
///
/// Delivery is independent per listener: a dropped receiver only skips
/// that listener's message, never the remaining ones.
fn fan_out<M: Send>(reading: &RawBatteryReading, listeners: &Arc<RwLock<Vec<Subscription<M>>>>) {
    let status = decode_reading(reading);

    let subscriptions = match listeners.read() {
        Ok(subscriptions) => subscriptions,
        Err(_) => {
            tracing::error!("Listener set lock poisoned, dropping event");
            return;
        }
    };

    tracing::debug!(
        "Dispatching battery change to {} listener(s)",
        subscriptions.len()
    );

    for subscription in subscriptions.iter() {
        let message = (subscription.mapper)(&status);
        if subscription.sink.send(message).is_err() {
            tracing::warn!(
                "Listener {} dropped its receiver, skipping delivery",
                subscription.id
            );
        }
    }
}
