//! Cart Items Wire Models
//!
//! This module contains the data structures exchanged over HTTP and persisted
//! in the `cartItems` collection.

use mongodb::bson::oid::ObjectId;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};
use std::collections::HashMap;

// =============================================================================
// Cart Item
// =============================================================================

/// A cart item as stored and returned.
///
/// Stored documents are a loosely-typed bag of fields: `product` and `price`
/// are only lifted out when they have the expected type, otherwise they stay
/// in `extra` with whatever value the collection holds.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartItem {
    /// Store-assigned identifier, rendered as a 24-hex string.
    #[serde(
        rename = "_id",
        serialize_with = "serialize_hex_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ObjectId>,

    /// Name of the product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    /// Unit price, kept in its JSON number form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,

    /// Captures any extra fields (e.g., quantity, description) dynamically
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl CartItem {
    /// Builds an item from the top-level fields of a stored record.
    pub fn from_fields(mut fields: HashMap<String, Value>) -> Self {
        let product = match fields.remove("product") {
            Some(Value::String(product)) => Some(product),
            Some(other) => {
                fields.insert("product".to_owned(), other);
                None
            }
            None => None,
        };

        let price = match fields.remove("price") {
            Some(Value::Number(price)) => Some(price),
            Some(other) => {
                fields.insert("price".to_owned(), other);
                None
            }
            None => None,
        };

        Self {
            id: None,
            product,
            price,
            extra: fields,
        }
    }

    /// Returns the item with its identifier set to `id`.
    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }
}

fn serialize_hex_id<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(id) => serializer.serialize_str(&id.to_hex()),
        None => serializer.serialize_none(),
    }
}

/// Body of `POST /` and `PUT /:id`.
///
/// `product` and `price` are required here. A client-supplied `_id` is read
/// and thrown away so it never reaches the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCartItem {
    #[serde(default, rename = "_id")]
    _client_id: IgnoredAny,

    pub product: String,

    pub price: Number,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl From<NewCartItem> for CartItem {
    fn from(item: NewCartItem) -> Self {
        Self {
            id: None,
            product: Some(item.product),
            price: Some(item.price),
            extra: item.extra,
        }
    }
}

// =============================================================================
// Request / Response Models
// =============================================================================

/// Query string of `GET /cart-items/search`.
///
/// Values are kept raw so that number coercion can follow the lenient rules in
/// [`super::helpers::parse_number`] instead of rejecting the request.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchParams {
    /// Exact product name to match
    pub product: Option<String>,

    /// Inclusive upper bound on `price`
    pub max_price: Option<String>,

    /// Lower bound on the `length` field
    pub page_size: Option<String>,
}

impl SearchParams {
    /// Collects the known keys of a decoded query string.
    ///
    /// A key given more than once keeps all its values, joined with `,`.
    /// Unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "product" => &mut params.product,
                "maxPrice" => &mut params.max_price,
                "pageSize" => &mut params.page_size,
                _ => continue,
            };

            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }

        params
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: &'static str,
}
