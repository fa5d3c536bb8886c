//! In-Memory Selection Store
//!
//! Implements SelectionStore with a lock-protected cell.

use crate::domain::entities::SelectedLocation;
use crate::domain::errors::StoreError;
use crate::domain::ports::SelectionStore;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Process-local selection store. Lives as long as the session does.
#[derive(Default)]
pub struct InMemorySelectionStore {
    current: RwLock<Option<SelectedLocation>>,
}

impl InMemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SelectionStore for InMemorySelectionStore {
    async fn get(&self) -> Option<SelectedLocation> {
        self.current.read().clone()
    }

    async fn set(&self, location: SelectedLocation) -> Result<(), StoreError> {
        *self.current.write() = Some(location);
        Ok(())
    }
}
