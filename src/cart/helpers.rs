//! Cart Items Query Helpers
//!
//! This module translates path and query parameters into store inputs:
//! identifier parsing and the search filter.

use mongodb::bson::{doc, oid::ObjectId, Document};
use serde_json::{Number, Value};

use super::error::ApiError;
use super::models::{CartItem, SearchParams};

/// Parses a path segment as a 24-hex ObjectId.
pub fn parse_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|source| ApiError::MalformedId {
        id: id.to_owned(),
        source,
    })
}

/// Coerces an optional query value into a number, the way JavaScript's
/// `Number(value)` does.
///
/// # Behaviour
///
/// * A missing value is not a number.
/// * An empty or all-whitespace value counts as `0`.
/// * `Infinity`, `+Infinity` and `-Infinity` are spelled exactly so.
/// * `0x`, `0o` and `0b` prefixes select an unsigned integer in that radix.
/// * Anything else must be a plain decimal literal (digits, `.`, sign,
///   exponent); words such as `inf` or `NaN` are not numbers.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return Some(0.0);
    }

    match raw {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match raw.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = raw.get(2..)?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return u128::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }

    let is_decimal = raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_decimal {
        return None;
    }

    raw.parse::<f64>().ok()
}

/// Conjunction of the optional search terms.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchFilter {
    /// `product == value`
    pub product: Option<String>,

    /// `price <= value`
    pub max_price: Option<f64>,

    /// `length >= value`, driven by the `pageSize` query parameter.
    pub min_length: Option<f64>,
}

impl SearchFilter {
    pub fn from_params(params: &SearchParams) -> Self {
        Self {
            product: params.product.clone().filter(|p| !p.is_empty()),
            max_price: parse_number(params.max_price.as_deref()),
            min_length: parse_number(params.page_size.as_deref()),
        }
    }

    /// Renders the filter as a MongoDB query document.
    pub fn to_document(&self) -> Document {
        let mut query = Document::new();

        if let Some(product) = &self.product {
            query.insert("product", product.as_str());
        }
        if let Some(max_price) = self.max_price {
            query.insert("price", doc! { "$lte": max_price });
        }
        if let Some(min_length) = self.min_length {
            query.insert("length", doc! { "$gte": min_length });
        }

        query
    }

    /// Evaluates the filter against an item held in process.
    pub fn matches(&self, item: &CartItem) -> bool {
        if let Some(product) = &self.product {
            if item.product.as_deref() != Some(product.as_str()) {
                return false;
            }
        }

        if let Some(max_price) = self.max_price {
            match item.price.as_ref().and_then(Number::as_f64) {
                Some(price) if price <= max_price => {}
                _ => return false,
            }
        }

        if let Some(min_length) = self.min_length {
            match item.extra.get("length").and_then(Value::as_f64) {
                Some(length) if length >= min_length => {}
                _ => return false,
            }
        }

        true
    }
}
