use thiserror::Error;

/// Errors that can occur in the battery event manager
#[derive(Error, Debug)]
pub enum EventManagerError {
    /// The background worker is no longer running
    #[error("Background event worker has disconnected")]
    WorkerDisconnected,

    /// Listener set lock was poisoned by a panicking thread
    #[error("Listener set lock poisoned")]
    LockPoisoned,
}

/// Result type for event manager operations
pub type Result<T> = std::result::Result<T, EventManagerError>;
