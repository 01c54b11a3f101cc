use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::product::errors::ImageUrlError;
use crate::domain::product::errors::PriceError;
use crate::domain::product::errors::ProductIdError;
use crate::domain::product::errors::ProductTitleError;
use crate::domain::user::models::UserId;

/// Product entity: a priced listing owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub details: ProductDetails,
    pub owner: UserId,
    /// Assigned by the store on insert, never changed afterwards.
    pub created_at: DateTime<Utc>,
}

/// The mutable part of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub title: ProductTitle,
    pub description: String,
    pub image_url: ImageUrl,
    pub price: Price,
}

/// Product unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a product ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product title, 1 to `MAX_LENGTH` characters with some non-whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTitle(String);

impl ProductTitle {
    pub const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, ProductTitleError> {
        if title.trim().is_empty() {
            return Err(ProductTitleError::Empty);
        }

        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ProductTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Image reference, stored verbatim. May be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub const MAX_LENGTH: usize = 2048;

    pub fn new(url: String) -> Result<Self, ImageUrlError> {
        let length = url.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ImageUrlError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-negative price that fits the store's `NUMERIC(12, 2)` column exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    pub const MAX_SCALE: u32 = 2;

    /// Largest storable price, 9 999 999 999.99
    pub fn max() -> Decimal {
        Decimal::new(999_999_999_999, Self::MAX_SCALE)
    }

    /// # Errors
    /// * `Negative` - Below zero
    /// * `TooPrecise` - More than two significant decimal places
    /// * `TooLarge` - Above `Price::max()`
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative);
        }
        if amount.normalize().scale() > Self::MAX_SCALE {
            return Err(PriceError::TooPrecise {
                max: Self::MAX_SCALE,
            });
        }
        if amount > Self::max() {
            return Err(PriceError::TooLarge {
                max: Self::max().to_string(),
            });
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

/// Product about to be inserted; the store fills in `created_at`.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: ProductId,
    pub details: ProductDetails,
    pub owner: UserId,
}

/// Owner-scoped replacement of a product's details.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub id: ProductId,
    pub owner: UserId,
    pub details: ProductDetails,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn decimal(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_price_accepts_zero_and_cents() {
        assert!(Price::new(Decimal::ZERO).is_ok());
        assert_eq!(Price::new(decimal("9.99")).unwrap().amount(), decimal("9.99"));
        // Trailing zeros are not extra precision.
        assert!(Price::new(decimal("1.500")).is_ok());
    }

    #[test]
    fn test_price_rejections() {
        assert_eq!(Price::new(decimal("-0.01")), Err(PriceError::Negative));
        assert_eq!(
            Price::new(decimal("0.001")),
            Err(PriceError::TooPrecise { max: 2 })
        );
        assert!(Price::new(Price::max()).is_ok());
        assert!(matches!(
            Price::new(decimal("10000000000")),
            Err(PriceError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_title_validation() {
        assert!(ProductTitle::new("Lamp".to_string()).is_ok());
        assert_eq!(ProductTitle::new(" ".to_string()), Err(ProductTitleError::Empty));
        assert!(matches!(
            ProductTitle::new("x".repeat(201)),
            Err(ProductTitleError::TooLong { max: 200, actual: 201 })
        ));
    }

    #[test]
    fn test_image_url_may_be_empty() {
        assert_eq!(ImageUrl::new(String::new()).unwrap().as_str(), "");
        assert!(ImageUrl::new("x".repeat(2049)).is_err());
    }
}
