use battery_host::HostError;
use thiserror::Error;

/// Errors surfaced by the query facade
#[derive(Error, Debug)]
pub enum BatteryError {
    /// The host has no battery facility
    #[error("battery status reporting is not supported on this host")]
    Unsupported,

    /// A host-level failure during a read; never retried internally
    #[error("host battery failure: {0}")]
    Host(#[source] HostError),
}

impl From<HostError> for BatteryError {
    fn from(err: HostError) -> Self {
        // The query surface exposes exactly one unavailability shape
        match err {
            HostError::Unsupported => BatteryError::Unsupported,
            other => BatteryError::Host(other),
        }
    }
}

/// Result type for query operations
pub type Result<T> = std::result::Result<T, BatteryError>;
