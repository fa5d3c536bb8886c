//! Position Provider Port
//!
//! Defines the interface for reading the user's current position.

use crate::domain::entities::Coordinates;
use crate::domain::errors::PositionError;
use crate::domain::value_objects::PositionOptions;
use async_trait::async_trait;

/// Geolocation capability.
///
/// A single request yields exactly one outcome: a position or an error.
/// Callers that have no geolocation capability at all hold no provider
/// rather than one that always fails.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    /// Request the current position.
    ///
    /// Implementations should honour `options.maximum_age` when they cache
    /// fixes. The caller enforces `options.timeout` by dropping the future.
    async fn current_position(&self, options: &PositionOptions)
        -> Result<Coordinates, PositionError>;
}
