use thiserror::Error;

/// Number of records returned per page of a listing.
pub const PAGE_SIZE: u64 = 5;

/// Error for page number validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Page must be a non-negative integer, got {0:?}")]
    InvalidNumber(String),

    #[error("Page {0} is out of range")]
    OutOfRange(u64),
}

/// Zero-based page of a listing.
///
/// Page `n` covers rows `n * PAGE_SIZE .. (n + 1) * PAGE_SIZE` in store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page(u64);

impl Page {
    /// Create a page whose offset fits the store's signed 64-bit range.
    ///
    /// # Errors
    /// * `OutOfRange` - `number * PAGE_SIZE` overflows `i64`
    pub fn new(number: u64) -> Result<Self, PageError> {
        number
            .checked_mul(PAGE_SIZE)
            .filter(|offset| i64::try_from(*offset).is_ok())
            .map(|_| Self(number))
            .ok_or(PageError::OutOfRange(number))
    }

    /// Parse an optional query value; absent means the first page.
    ///
    /// # Errors
    /// * `InvalidNumber` - Value is not an unsigned integer
    /// * `OutOfRange` - Offset would overflow
    pub fn parse(raw: Option<&str>) -> Result<Self, PageError> {
        match raw {
            None => Ok(Self::default()),
            Some(value) => {
                let number = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| PageError::InvalidNumber(value.to_string()))?;
                Self::new(number)
            }
        }
    }

    pub fn number(&self) -> u64 {
        self.0
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE as i64
    }

    /// Row offset; cannot overflow because `new` checked it.
    pub fn offset(&self) -> i64 {
        (self.0 * PAGE_SIZE) as i64
    }
}
