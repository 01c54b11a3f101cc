use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Lifetime of an identity token when none is configured.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 48;

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Identity claims carried inside a signed token.
///
/// `exp` is mandatory: a token without an expiry is rejected on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (owner user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a user that expire `ttl_hours` from now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `ttl_hours` - Hours until the token expires
    ///
    /// # Returns
    /// Claims with sub, exp and iat set
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl_hours` is not in `1..=MAX_TOKEN_TTL_HOURS`
    pub fn for_user(user_id: impl ToString, ttl_hours: i64) -> Result<Self, JwtError> {
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&ttl_hours) {
            return Err(JwtError::InvalidLifetime(ttl_hours));
        }

        let now = Utc::now();
        let expiration = Duration::try_hours(ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(JwtError::InvalidLifetime(ttl_hours))?;

        Ok(Self {
            sub: user_id.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Expiry as a UTC instant.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// A token is only valid strictly before `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
