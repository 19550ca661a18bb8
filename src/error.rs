//! Routing errors.

use thiserror::Error;

/// A single provider attempt failed. Always triggers fallback to the next
/// configured provider.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider error, code: {code}, message: {message}")]
    Provider { code: String, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A routing request failed for the caller.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("at least two waypoints are required, got {0}")]
    NotEnoughWaypoints(usize),

    #[error("no routing provider configured")]
    NoProviders,

    /// Every configured provider failed; no geometry is substituted.
    #[error("routing unavailable: all {attempted} providers failed")]
    Unavailable { attempted: usize },
}
