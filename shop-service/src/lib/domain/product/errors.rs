use thiserror::Error;

use crate::domain::page::PageError;

/// Error for ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for ProductTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductTitleError {
    #[error("Product title must not be empty")]
    Empty,

    #[error("Product title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for ImageUrl validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageUrlError {
    #[error("Image reference too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Price validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price must not be negative")]
    Negative,

    #[error("Price has more than {max} decimal places")]
    TooPrecise { max: u32 },

    #[error("Price exceeds the maximum of {max}")]
    TooLarge { max: String },
}

/// Top-level error for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid product ID: {0}")]
    InvalidProductId(#[from] ProductIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] ProductTitleError),

    #[error("Invalid image reference: {0}")]
    InvalidImageUrl(#[from] ImageUrlError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("Invalid page: {0}")]
    InvalidPage(#[from] PageError),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
