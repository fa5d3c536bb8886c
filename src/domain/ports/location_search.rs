//! Location Search Port
//!
//! Defines the interface for free-text place search across countries,
//! regions and cities.

use crate::domain::entities::LocationSearchResults;
use crate::domain::errors::LookupError;
use async_trait::async_trait;

/// Unified free-text location search.
#[async_trait]
pub trait LocationSearch: Send + Sync {
    /// Search all location tiers for `term`.
    ///
    /// Returns empty lists (not an error) when nothing matches.
    async fn search(&self, term: &str) -> Result<LocationSearchResults, LookupError>;
}
