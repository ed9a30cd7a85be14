//! Application state for the time and leave engine API.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::store::MemStore;

/// Shared application state.
///
/// The store is behind a mutex: every operation on an employee's day or
/// balance reads and writes entity state, and the engine's contract is
/// that such operations are serialized.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<MemStore>>,
}

impl AppState {
    /// Creates application state owning the given store.
    pub fn new(store: MemStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Returns the shared store handle.
    pub fn store(&self) -> &Arc<Mutex<MemStore>> {
        &self.store
    }
}
