use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::post::errors::PostContentError;
use crate::domain::post::errors::PostIdError;
use crate::domain::user::models::UserId;

/// Post entity: a short text owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub content: PostContent,
    pub owner: UserId,
    /// Assigned by the store on insert, never changed afterwards.
    pub created_at: DateTime<Utc>,
}

/// Post unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a post ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(s)
            .map(PostId)
            .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post body text.
///
/// Must contain at least one non-whitespace character and at most
/// `MAX_LENGTH` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    pub const MAX_LENGTH: usize = 10_000;

    /// # Errors
    /// * `Empty` - Content is empty or whitespace only
    /// * `TooLong` - Content exceeds `MAX_LENGTH` characters
    pub fn new(content: String) -> Result<Self, PostContentError> {
        if content.trim().is_empty() {
            return Err(PostContentError::Empty);
        }

        let length = content.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(PostContentError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post about to be inserted; the store fills in `created_at`.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub id: PostId,
    pub content: PostContent,
    pub owner: UserId,
}

/// Owner-scoped content change.
///
/// Applies only when the stored post has `id` and belongs to `owner`.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: PostId,
    pub owner: UserId,
    pub content: PostContent,
}

/// Command to create a post with validated content
#[derive(Debug)]
pub struct CreatePostCommand {
    pub content: PostContent,
}

/// Command to replace a post's content
#[derive(Debug)]
pub struct UpdatePostCommand {
    pub content: PostContent,
}
