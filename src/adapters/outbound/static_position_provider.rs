//! Static Position Provider
//!
//! Implements PositionProvider with a fixed, configured position.

use crate::domain::entities::Coordinates;
use crate::domain::errors::PositionError;
use crate::domain::ports::PositionProvider;
use crate::domain::value_objects::PositionOptions;
use async_trait::async_trait;

/// Always reports the same coordinates.
///
/// Used when the deployment knows where it is (kiosks, regional
/// front-ends) or to pin a position in staging.
pub struct StaticPositionProvider {
    coords: Coordinates,
}

impl StaticPositionProvider {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl PositionProvider for StaticPositionProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, PositionError> {
        Ok(self.coords)
    }
}
