use thiserror::Error;

use crate::model::RegistrationId;

/// Errors surfaced by host battery backends
#[derive(Error, Debug)]
pub enum HostError {
    /// The host has no battery facility
    #[error("battery status reporting is not supported on this host")]
    Unsupported,

    /// Reading from the platform facility failed
    #[error("host battery read failed: {0}")]
    Io(#[from] std::io::Error),

    /// Unregister was called with a handle the backend does not know
    #[error("unknown registration handle {0}")]
    UnknownRegistration(RegistrationId),

    /// The event channel for a registration has been closed
    #[error("event channel has been closed")]
    ChannelClosed,
}

/// Result type for host backend operations
pub type Result<T> = std::result::Result<T, HostError>;
