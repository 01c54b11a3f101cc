use async_trait::async_trait;

use crate::domain::page::Page;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::NewProduct;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductDetails;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductUpdate;
use crate::domain::user::models::UserId;

/// Port for product domain service operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Create a product owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_product(
        &self,
        owner: UserId,
        details: ProductDetails,
    ) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    /// Replace the details of a product owned by `owner`.
    ///
    /// A missing or foreign product is left untouched and still reports success.
    async fn update_product(
        &self,
        owner: UserId,
        id: &ProductId,
        details: ProductDetails,
    ) -> Result<(), ProductError>;

    /// Delete a product owned by `owner`; same no-op rule as `update_product`.
    async fn delete_product(&self, owner: UserId, id: &ProductId) -> Result<(), ProductError>;

    async fn list_products(&self, page: Page) -> Result<Vec<Product>, ProductError>;
}

/// Persistence operations for products.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Persist a new product.
    ///
    /// # Returns
    /// Stored product with the store-assigned creation timestamp
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, product: NewProduct) -> Result<Product, ProductError>;

    /// # Returns
    /// Optional product (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed or the row is malformed
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    /// Apply an owner-scoped update. Zero affected rows is not an error.
    async fn update(&self, update: ProductUpdate) -> Result<(), ProductError>;

    /// Owner-scoped delete. Zero affected rows is not an error.
    async fn delete(&self, id: &ProductId, owner: &UserId) -> Result<(), ProductError>;

    /// Retrieve one page of products; undecodable rows are skipped.
    ///
    /// # Errors
    /// * `DatabaseError` - Query or transport failed
    async fn list(&self, page: Page) -> Result<Vec<Product>, ProductError>;
}
