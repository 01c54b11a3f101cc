use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use super::PageQuery;
use crate::domain::page::Page;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::ImageUrl;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductDetails;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductTitle;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Json(body): Json<ProductRequestBody>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let details = body.try_into_details()?;

    state
        .product_service
        .create_product(identity.user_id, details)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id = parse_product_id(&product_id)?;

    state
        .product_service
        .get_product(&product_id)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}

pub async fn update_product(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
    Json(body): Json<ProductRequestBody>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let product_id = parse_product_id(&product_id)?;
    let details = body.try_into_details()?;

    state
        .product_service
        .update_product(identity.user_id, &product_id, details)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Product updated")))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let product_id = parse_product_id(&product_id)?;

    state
        .product_service
        .delete_product(identity.user_id, &product_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Product deleted")))
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<ProductData>>, ApiError> {
    let page = Page::parse(query.page.as_deref())?;

    state
        .product_service
        .list_products(page)
        .await
        .map_err(ApiError::from)
        .map(|products| {
            ApiSuccess::new(
                StatusCode::OK,
                products.iter().map(ProductData::from).collect(),
            )
        })
}

fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    ProductId::from_string(raw).map_err(|e| ApiError::from(ProductError::from(e)))
}

/// HTTP request body for creating or replacing a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductRequestBody {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image_url: String,
    price: Decimal,
}

impl ProductRequestBody {
    fn try_into_details(self) -> Result<ProductDetails, ProductError> {
        Ok(ProductDetails {
            title: ProductTitle::new(self.title)?,
            description: self.description,
            image_url: ImageUrl::new(self.image_url)?,
            price: Price::new(self.price)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price: Decimal,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.details.title.as_str().to_string(),
            description: product.details.description.clone(),
            image_url: product.details.image_url.as_str().to_string(),
            price: product.details.price.amount(),
            user_id: product.owner.to_string(),
            created_at: product.created_at,
        }
    }
}
