//! Runtime configuration
//!
//! Every option can be given on the command line or through the environment;
//! `main` loads a `.env` file before parsing.

use std::net::SocketAddr;

use crate::cart::store::COLLECTION_NAME;

/// Which backend serves the cart items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreKind {
    /// MongoDB collection
    Mongo,
    /// Process-local map; contents are lost on exit
    Memory,
}

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Cart items REST service")]
pub struct Config {
    /// The address the HTTP server listens on
    #[arg(long, env = "CART_ITEMS_ADDR", default_value = "0.0.0.0:8000")]
    pub addr: SocketAddr,

    /// Storage backend
    #[arg(long, value_enum, env = "CART_ITEMS_STORE", default_value_t = StoreKind::Mongo)]
    pub store: StoreKind,

    /// MongoDB connection string
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// Database used when the connection string names none
    #[arg(long, env = "MONGODB_DATABASE", default_value = "cart")]
    pub database: String,

    /// Collection holding the cart items
    #[arg(long, env = "CART_ITEMS_COLLECTION", default_value = COLLECTION_NAME)]
    pub collection: String,
}

impl Config {
    pub fn from_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
