use bookshelf_http::error::AppError;
use thiserror::Error;

use super::models::BookId;

pub const INVALID_BOOK_ID: &str = "Invalid book ID";
pub const MALFORMED_BODY: &str = "Error parsing request body";
pub const BOOK_NOT_FOUND: &str = "Book not found";

/// Failures reported by the catalog store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The caller passed an id or body that could not be parsed.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("book {0} not found")]
    NotFound(BookId),
}

impl CatalogError {
    pub fn invalid_id() -> Self {
        Self::InvalidArgument(INVALID_BOOK_ID.to_string())
    }

    pub fn malformed_body() -> Self {
        Self::InvalidArgument(MALFORMED_BODY.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidArgument(message) => AppError::bad_request(message),
            CatalogError::NotFound(_) => AppError::not_found(BOOK_NOT_FOUND),
        }
    }
}
