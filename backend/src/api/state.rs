//! Shared application state handed to HTTP handlers.

use std::sync::Arc;

use crate::domain::Storage;

/// Handler state: the storage façade behind a shared pointer so tests can
/// substitute a mock implementation.
#[derive(Clone)]
pub struct HttpState {
    storage: Arc<dyn Storage>,
}

impl HttpState {
    /// Build state around a storage implementation.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Access the storage façade.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}
