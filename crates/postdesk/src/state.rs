//! Shared application state.

use std::sync::Arc;

use postdesk_core::storage::RecordStore;

use crate::service::PostService;

/// Shared application state.
///
/// Cloned for each request handler. Holds the post service, which owns the
/// one store client built at startup.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Creates state over the given record store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            posts: PostService::new(store),
        }
    }

    /// State backed by an empty in-memory store.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(crate::storage::InMemoryRepository::new()))
    }
}
