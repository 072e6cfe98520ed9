//! Cart Items Domain Module
//!
//! This module contains everything behind the `/cart-items` resource:
//! - Wire models (CartItem, search parameters, error body)
//! - Query translation helpers (identifier parsing, search filter)
//! - Storage backends (MongoDB, in-memory)
//! - Error taxonomy and HTTP status mapping
//! - REST API handlers

pub mod error;
pub mod handlers;
pub mod helpers;
pub mod memory;
pub mod models;
pub mod state;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{ApiError, StoreError};
pub use handlers::routes;
pub use memory::InMemoryCartItemStore;
pub use state::{AppState, SharedState};
pub use store::{CartItemStore, MongoCartItemStore};
