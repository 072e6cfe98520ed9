//! Cart Items Library
//!
//! This library provides the `/cart-items` REST resource: CRUD handlers over a
//! document store collection, with MongoDB and in-memory backends.

// Domain modules
pub mod cart;

// Infrastructure
pub mod config;
pub mod logging;
pub mod router;
