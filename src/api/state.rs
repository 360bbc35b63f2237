//! Application state for the scheme engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::api::store::Store;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// currently the in-memory record store.
#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<Store>,
}

impl AppState {
    /// Creates a new application state with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the record store.
    pub fn store(&self) -> &Store {
        &self.store
    }
}
