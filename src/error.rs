//! Error types for the TikTok Business core
//!
//! Errors never cross the exported module boundary: every exported operation
//! resolves to a plain `bool` and the facade maps `Err` values to `false`
//! after logging them. The variants exist so the facade can tell a
//! precondition violation (logged as a warning) apart from a real failure
//! (logged as an error).

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, TiktokError>;

#[derive(Error, Debug)]
pub enum TiktokError {
    /// A required id was missing or resolved to an empty string
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The vendor SDK binding reported a failure
    #[error("vendor SDK call failed: {0}")]
    Bridge(String),

    /// A tracking call was made before `initialize` succeeded
    #[error("SDK not initialized, call initialize() first")]
    NotInitialized,

    /// `initialize` was called on an already-initialized session
    #[error("SDK already initialized, re-initialization is not supported")]
    AlreadyInitialized,

    /// `track_route_change` was called with auto route tracking disabled
    #[error("route tracking disabled by configuration")]
    RouteTrackingDisabled,

    /// No vendor SDK exists for the current platform
    #[error("platform not supported: {0}")]
    PlatformUnsupported(String),

    /// Event parameters could not be serialized for the vendor boundary
    #[error("event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TiktokError {
    /// Whether this error is an expected precondition violation rather than
    /// an actual failure. Precondition violations are logged at warn level.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            TiktokError::NotInitialized
                | TiktokError::AlreadyInitialized
                | TiktokError::RouteTrackingDisabled
        )
    }
}
