//! In-memory cart item store.

use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::oid::ObjectId;

use super::error::StoreError;
use super::helpers::SearchFilter;
use super::models::CartItem;
use super::store::CartItemStore;

/// [`CartItemStore`] holding items in process.
///
/// DashMap allows concurrent access without external Mutexes. Each operation
/// touches a single entry, matching the per-document atomicity of MongoDB.
#[derive(Debug, Default)]
pub struct InMemoryCartItemStore {
    items: DashMap<ObjectId, CartItem>,
}

impl InMemoryCartItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn collect(&self, filter: &SearchFilter) -> Vec<CartItem> {
        let mut items: Vec<CartItem> = self
            .items
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        // ObjectIds grow with creation time, which gives insertion order.
        items.sort_by_key(|item| item.id);
        items
    }
}

#[async_trait]
impl CartItemStore for InMemoryCartItemStore {
    async fn list(&self) -> Result<Vec<CartItem>, StoreError> {
        Ok(self.collect(&SearchFilter::default()))
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<CartItem>, StoreError> {
        Ok(self.collect(filter))
    }

    async fn get(&self, id: ObjectId) -> Result<Option<CartItem>, StoreError> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, item: CartItem) -> Result<CartItem, StoreError> {
        let id = ObjectId::new();
        let item = item.with_id(id);
        self.items.insert(id, item.clone());
        Ok(item)
    }

    async fn replace(&self, id: ObjectId, item: CartItem) -> Result<Option<CartItem>, StoreError> {
        let item = item.with_id(id);
        match self.items.get_mut(&id) {
            Some(mut entry) => {
                *entry = item.clone();
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        Ok(self.items.remove(&id).is_some())
    }
}
