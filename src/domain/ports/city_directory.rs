//! City Directory Port
//!
//! Defines the interface for loading the list of known cities.

use crate::domain::entities::City;
use crate::domain::errors::LookupError;
use async_trait::async_trait;

/// Source of the full list of known cities.
///
/// This is an outbound port that abstracts the backend's city listing.
/// The list is read-only reference data; callers assume it is fully
/// loaded before resolution starts and there is no pagination.
#[async_trait]
pub trait CityDirectory: Send + Sync {
    /// Get every known city, in the backend's order.
    async fn list(&self) -> Result<Vec<City>, LookupError>;
}
