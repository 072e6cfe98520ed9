//! Cart Items Storage
//!
//! [`CartItemStore`] is the seam between the HTTP handlers and the document
//! store. Each method maps onto exactly one collection operation.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::{Client, Collection, Database};
use serde_json::Value;
use std::collections::HashMap;

use super::error::StoreError;
use super::helpers::SearchFilter;
use super::models::CartItem;

/// Default name of the collection holding cart items.
pub const COLLECTION_NAME: &str = "cartItems";

#[async_trait]
pub trait CartItemStore: Send + Sync {
    /// Every item, in the store's natural order.
    async fn list(&self) -> Result<Vec<CartItem>, StoreError>;

    /// Items matching all terms of `filter`.
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<CartItem>, StoreError>;

    async fn get(&self, id: ObjectId) -> Result<Option<CartItem>, StoreError>;

    /// Inserts `item` under a fresh identifier and returns it with that identifier.
    async fn create(&self, item: CartItem) -> Result<CartItem, StoreError>;

    /// Overwrites the whole document stored under `id`.
    ///
    /// Returns `None` without writing anything when no such document exists.
    async fn replace(&self, id: ObjectId, item: CartItem) -> Result<Option<CartItem>, StoreError>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError>;
}

// =============================================================================
// MongoDB
// =============================================================================

/// [`CartItemStore`] backed by a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoCartItemStore {
    collection: Collection<Document>,
}

impl MongoCartItemStore {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }

    /// Connects to `uri` and opens `collection`.
    ///
    /// The database named in the URI wins; `fallback_database` is used when the
    /// URI names none.
    pub async fn connect(
        uri: &str,
        fallback_database: &str,
        collection: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(fallback_database));

        tracing::info!(database = database.name(), collection, "Using MongoDB collection");

        Ok(Self::new(&database, collection))
    }

    async fn find(&self, filter: Document) -> Result<Vec<CartItem>, StoreError> {
        let cursor = self.collection.find(filter, None).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(from_document).collect())
    }
}

#[async_trait]
impl CartItemStore for MongoCartItemStore {
    async fn list(&self) -> Result<Vec<CartItem>, StoreError> {
        self.find(Document::new()).await
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<CartItem>, StoreError> {
        self.find(filter.to_document()).await
    }

    async fn get(&self, id: ObjectId) -> Result<Option<CartItem>, StoreError> {
        let document = self.collection.find_one(doc! { "_id": id }, None).await?;
        Ok(document.map(from_document))
    }

    async fn create(&self, item: CartItem) -> Result<CartItem, StoreError> {
        let result = self.collection.insert_one(to_document(&item)?, None).await?;
        let id = result.inserted_id.as_object_id().ok_or(StoreError::MissingId)?;

        Ok(item.with_id(id))
    }

    async fn replace(&self, id: ObjectId, item: CartItem) -> Result<Option<CartItem>, StoreError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": id }, to_document(&item)?, None)
            .await?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        Ok(Some(item.with_id(id)))
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }
}

/// Converts an item into the document written to the collection.
///
/// `_id` is never part of the written document; the store owns it.
pub fn to_document(item: &CartItem) -> Result<Document, StoreError> {
    let mut document = bson::to_document(item)?;
    document.remove("_id");
    Ok(document)
}

/// Converts a stored document back into an item.
///
/// Never fails: fields the item model does not expect, including a `_id`
/// that is not an ObjectId, are returned as they are stored.
pub fn from_document(mut document: Document) -> CartItem {
    let id = document.get_object_id("_id").ok();
    if id.is_some() {
        document.remove("_id");
    }

    let fields = match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(fields) => fields.into_iter().collect(),
        _ => HashMap::new(),
    };

    let item = CartItem::from_fields(fields);
    match id {
        Some(id) => item.with_id(id),
        None => item,
    }
}
