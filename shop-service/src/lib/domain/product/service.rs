use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::page::Page;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::NewProduct;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductDetails;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductUpdate;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for product operations.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn create_product(
        &self,
        owner: UserId,
        details: ProductDetails,
    ) -> Result<Product, ProductError> {
        let product = self
            .repository
            .insert(NewProduct {
                id: ProductId::new(),
                details,
                owner,
            })
            .await?;

        tracing::info!(product_id = %product.id, owner = %owner, "Product created");

        Ok(product)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))
    }

    async fn update_product(
        &self,
        owner: UserId,
        id: &ProductId,
        details: ProductDetails,
    ) -> Result<(), ProductError> {
        self.repository
            .update(ProductUpdate {
                id: *id,
                owner,
                details,
            })
            .await
    }

    async fn delete_product(&self, owner: UserId, id: &ProductId) -> Result<(), ProductError> {
        self.repository.delete(id, &owner).await
    }

    async fn list_products(&self, page: Page) -> Result<Vec<Product>, ProductError> {
        self.repository.list(page).await
    }
}
