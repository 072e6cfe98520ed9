//! Cart Items State Management
//!
//! This module holds the store handle injected into every handler.

use super::memory::InMemoryCartItemStore;
use super::store::CartItemStore;
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state: the backend every request talks to.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CartItemStore>,
}

impl Default for AppState {
    /// An empty in-memory store.
    fn default() -> Self {
        Self::new(InMemoryCartItemStore::new())
    }
}

impl AppState {
    pub fn new(store: impl CartItemStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
