//! Selection Store Port
//!
//! Defines the interface for the session's selected location.

use crate::domain::entities::SelectedLocation;
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Holder of the one live `SelectedLocation`.
///
/// Single-writer discipline: only the location resolver and explicit user
/// actions call `set`. Everyone else only reads. Writes are last-write-wins.
#[async_trait]
pub trait SelectionStore: Send + Sync {
    /// Get the current selection, if any.
    async fn get(&self) -> Option<SelectedLocation>;

    /// Replace the current selection.
    async fn set(&self, location: SelectedLocation) -> Result<(), StoreError>;
}
