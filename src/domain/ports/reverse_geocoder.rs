//! Reverse Geocoder Port
//!
//! Defines the interface for turning coordinates into address names.

use crate::domain::entities::{AddressFields, Coordinates};
use crate::domain::errors::LookupError;
use async_trait::async_trait;

/// Reverse geocoding lookup.
///
/// Implementations may use Nominatim, a commercial geocoder, or a local
/// gazetteer. Results are best-effort: any address field may be missing.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolve coordinates to a partial address breakdown.
    async fn reverse(&self, coords: Coordinates) -> Result<AddressFields, LookupError>;
}
