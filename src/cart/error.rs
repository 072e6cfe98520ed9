//! The errors that can occur while serving the cart items resource.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mongodb::bson;
use thiserror::Error;

use super::models::ErrorBody;

/// Failures reported by a [`super::store::CartItemStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The driver failed (connectivity, server-side query error, ...).
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A cart item could not be converted into a BSON document.
    #[error("failed to encode cart item: {0}")]
    Encode(#[from] bson::ser::Error),

    /// An insert result carried no ObjectId.
    #[error("inserted document has no ObjectId `_id`")]
    MissingId,
}

/// Everything a handler can fail with, mapped onto an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No document has the requested identifier.
    #[error("cart item not found")]
    NotFound,

    /// The path identifier is not a 24-hex ObjectId.
    #[error("malformed cart item id `{id}`: {source}")]
    MalformedId {
        id: String,
        source: bson::oid::Error,
    },

    /// The request body is not a valid cart item.
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    /// The query string could not be decoded.
    #[error("malformed query string: {0}")]
    MalformedQuery(#[from] QueryRejection),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// The status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MalformedId { .. }
            | ApiError::MalformedBody(_)
            | ApiError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::NotFound => "Not Found",
            ApiError::MalformedId { .. }
            | ApiError::MalformedBody(_)
            | ApiError::MalformedQuery(_) => "Bad Request",
            ApiError::Store(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if !matches!(self, ApiError::NotFound) {
            tracing::error!(error = %self, "FAIL");
        }

        (self.status(), Json(ErrorBody { message: self.message() })).into_response()
    }
}
