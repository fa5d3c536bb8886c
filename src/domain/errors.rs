//! Domain Errors
//!
//! Failures the outbound ports can report. None of these escape the
//! location resolver; they only decide which fallback path it takes.

use std::time::Duration;

/// Failure of a position request.
///
/// A missing geolocation capability is not an error value: it is modelled
/// as the absence of a `PositionProvider`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("permission to read the position was denied")]
    PermissionDenied,
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
    #[error("position request timed out")]
    Timeout,
}

/// Failure of a lookup against a remote collaborator
/// (city directory, reverse geocoder, location search).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure to persist the selected location.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("selection store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("selection store encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}
