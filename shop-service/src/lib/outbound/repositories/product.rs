use async_trait::async_trait;
use futures::TryStreamExt;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::page::Page;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::ImageUrl;
use crate::domain::product::models::NewProduct;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductDetails;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductTitle;
use crate::domain::product::models::ProductUpdate;
use crate::domain::product::ports::ProductRepository;
use crate::domain::user::models::UserId;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: &PgRow) -> Result<Product, ProductError> {
        let decode = |e: sqlx::Error| ProductError::DatabaseError(e.to_string());
        let price: Decimal = row.try_get("price").map_err(decode)?;
        let corrupt = |field: &str, e: &dyn std::fmt::Display| {
            ProductError::DatabaseError(format!("stored product {}: {}", field, e))
        };

        Ok(Product {
            id: ProductId(row.try_get("id").map_err(decode)?),
            details: ProductDetails {
                title: ProductTitle::new(row.try_get("title").map_err(decode)?)
                    .map_err(|e| corrupt("title", &e))?,
                description: row.try_get("description").map_err(decode)?,
                image_url: ImageUrl::new(row.try_get("image_url").map_err(decode)?)
                    .map_err(|e| corrupt("image_url", &e))?,
                price: Price::new(price).map_err(|e| corrupt("price", &e))?,
            },
            owner: UserId(row.try_get("user_id").map_err(decode)?),
            created_at: row.try_get("created_at").map_err(decode)?,
        })
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: NewProduct) -> Result<Product, ProductError> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (id, title, description, image_url, price, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING created_at
            "#,
        )
        .bind(product.id.0)
        .bind(product.details.title.as_str())
        .bind(&product.details.description)
        .bind(product.details.image_url.as_str())
        .bind(product.details.price.amount())
        .bind(product.owner.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        let created_at = row
            .try_get("created_at")
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(Product {
            id: product.id,
            details: product.details,
            owner: product.owner,
            created_at,
        })
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, image_url, price, user_id, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn update(&self, update: ProductUpdate) -> Result<(), ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET title = $3, description = $4, image_url = $5, price = $6
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(update.id.0)
        .bind(update.owner.0)
        .bind(update.details.title.as_str())
        .bind(&update.details.description)
        .bind(update.details.image_url.as_str())
        .bind(update.details.price.amount())
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        tracing::debug!(
            product_id = %update.id,
            owner = %update.owner,
            rows_affected = result.rows_affected(),
            "Product update applied"
        );

        Ok(())
    }

    async fn delete(&self, id: &ProductId, owner: &UserId) -> Result<(), ProductError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        tracing::debug!(
            product_id = %id,
            owner = %owner,
            rows_affected = result.rows_affected(),
            "Product delete applied"
        );

        Ok(())
    }

    async fn list(&self, page: Page) -> Result<Vec<Product>, ProductError> {
        let mut rows = sqlx::query(
            r#"
            SELECT id, title, description, image_url, price, user_id, created_at
            FROM products
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch(&self.pool);

        let mut products = Vec::new();
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?
        {
            match Self::row_to_product(&row) {
                Ok(product) => products.push(product),
                Err(e) => {
                    tracing::warn!(error = %e, page = page.number(), "Skipping unreadable product row")
                }
            }
        }

        Ok(products)
    }
}
