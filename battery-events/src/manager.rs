//! Sync-first battery subscription manager
//!
//! Provides a fully synchronous API for declaring interest in battery
//! changes. All async host interaction is hidden in a background worker
//! thread; the manager itself only tracks the listener set and drives the
//! demand-driven lifecycle of the single host registration.

use std::sync::mpsc::Sender;
use std::sync::{mpsc, Arc, RwLock};
use std::thread::JoinHandle;

use battery_host::BatteryHost;

use crate::error::{EventManagerError, Result};
use crate::subscription::{Subscription, SubscriptionId};
use crate::worker::{spawn_event_worker, Command};

/// Demand-driven battery event manager
///
/// Holds the ordered listener set and at most one underlying host-event
/// registration. The registration is created when the listener set
/// becomes non-empty and destroyed when it empties again; intermediate
/// subscription-set changes never touch the host.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::{mpsc, Arc};
/// use battery_events::{BatteryEventManager, Subscription, SubscriptionId};
/// use battery_host::SysfsBatteryHost;
///
/// let manager = BatteryEventManager::new(Arc::new(SysfsBatteryHost::new()));
///
/// let (tx, rx) = mpsc::channel();
/// manager.subscribe(Subscription::new(
///     SubscriptionId::new("status-bar"),
///     tx,
///     |status| status.level_percent(),
/// ))?;
///
/// for percent in rx {
///     println!("battery: {}%", percent);
/// }
/// ```
pub struct BatteryEventManager<M: Send + 'static> {
    /// Send commands to the background worker
    command_tx: Sender<Command>,

    /// Ordered listener set, shared with the worker for fan-out
    listeners: Arc<RwLock<Vec<Subscription<M>>>>,

    /// Support flag, probed once at construction
    supported: bool,

    /// Background worker handle (kept alive)
    _worker: JoinHandle<()>,
}

impl<M: Send + 'static> BatteryEventManager<M> {
    /// Create a manager over a host backend
    ///
    /// This is a synchronous operation - no `.await` required. The host's
    /// support flag is probed here, once; an unsupported host yields a
    /// manager that accepts subscription changes but never attaches and
    /// never delivers an event.
    pub fn new(host: Arc<dyn BatteryHost>) -> Self {
        let supported = host.is_supported();
        if !supported {
            tracing::info!(
                "Host battery facility unsupported; subscriptions will be accepted but never fire"
            );
        }

        let (command_tx, command_rx) = mpsc::channel();
        let listeners = Arc::new(RwLock::new(Vec::new()));
        let worker = spawn_event_worker(host, command_rx, Arc::clone(&listeners));

        Self {
            command_tx,
            listeners,
            supported,
            _worker: worker,
        }
    }

    /// Add or replace a subscription (sync)
    ///
    /// If the listener set was empty, the host change listener is
    /// attached. Re-subscribing under an existing id swaps the callback in
    /// place and keeps its fan-out position; the host is not touched.
    pub fn subscribe(&self, subscription: Subscription<M>) -> Result<()> {
        let was_empty = {
            let mut subscriptions = self
                .listeners
                .write()
                .map_err(|_| EventManagerError::LockPoisoned)?;
            let was_empty = subscriptions.is_empty();

            match subscriptions
                .iter_mut()
                .find(|existing| existing.id == subscription.id)
            {
                Some(existing) => {
                    tracing::debug!("Replacing subscription {}", subscription.id);
                    *existing = subscription;
                }
                None => {
                    tracing::debug!(
                        "Listener count: {} -> {}",
                        subscriptions.len(),
                        subscriptions.len() + 1
                    );
                    subscriptions.push(subscription);
                }
            }

            was_empty
        };

        if was_empty {
            self.send(Command::Attach)?;
        }

        Ok(())
    }

    /// Remove a subscription (sync)
    ///
    /// If this was the last listener, the host change listener is
    /// detached. Removing an id that was never registered is a no-op.
    pub fn unsubscribe(&self, id: &SubscriptionId) -> Result<()> {
        let now_empty = {
            let mut subscriptions = self
                .listeners
                .write()
                .map_err(|_| EventManagerError::LockPoisoned)?;
            let before = subscriptions.len();
            subscriptions.retain(|existing| existing.id != *id);

            if subscriptions.len() == before {
                tracing::warn!(
                    "Attempted to remove subscription {} but it was not registered",
                    id
                );
                return Ok(());
            }

            tracing::debug!("Listener count: {} -> {}", before, subscriptions.len());
            subscriptions.is_empty()
        };

        if now_empty {
            self.send(Command::Detach)?;
        }

        Ok(())
    }

    /// Replace the whole declared subscription set in one transition (sync)
    ///
    /// Entry point for a hosting framework that periodically re-evaluates
    /// the application's declared subscriptions. Only the empty/non-empty
    /// transition performs host I/O:
    ///
    /// | current | new | action |
    /// |---|---|---|
    /// | empty | empty | no-op |
    /// | empty | non-empty | attach |
    /// | non-empty | empty | detach |
    /// | non-empty | non-empty | record set, handle unchanged |
    pub fn set_subscriptions(&self, subscriptions: Vec<Subscription<M>>) -> Result<()> {
        let (was_empty, is_empty) = {
            let mut current = self
                .listeners
                .write()
                .map_err(|_| EventManagerError::LockPoisoned)?;
            let was_empty = current.is_empty();
            let is_empty = subscriptions.is_empty();
            *current = subscriptions;
            (was_empty, is_empty)
        };

        match (was_empty, is_empty) {
            (true, false) => self.send(Command::Attach),
            (false, true) => self.send(Command::Detach),
            _ => Ok(()),
        }
    }

    /// Number of currently registered listeners (sync)
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .map(|subscriptions| subscriptions.len())
            .unwrap_or(0)
    }

    /// Whether any listener is currently registered (sync)
    pub fn has_listeners(&self) -> bool {
        self.listener_count() > 0
    }

    /// Whether the host reported a battery facility at construction
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Shutdown the background worker
    ///
    /// Called automatically on drop, but can be called manually for
    /// graceful shutdown.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown);
    }

    fn send(&self, command: Command) -> Result<()> {
        if !self.supported {
            // Silent no-op path: the listener set is tracked but the host
            // is never touched.
            return Ok(());
        }
        self.command_tx
            .send(command)
            .map_err(|_| EventManagerError::WorkerDisconnected)
    }
}

impl<M: Send + 'static> Drop for BatteryEventManager<M> {
    fn drop(&mut self) {
        tracing::debug!(
            "BatteryEventManager dropping, {} active subscription(s)",
            self.listener_count()
        );
        let _ = self.command_tx.send(Command::Shutdown);
    }
}
