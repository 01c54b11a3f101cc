use async_trait::async_trait;

use crate::domain::page::Page;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostUpdate;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post owned by `owner`.
    ///
    /// # Returns
    /// Stored post including its creation timestamp
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, owner: UserId, command: CreatePostCommand)
        -> Result<Post, PostError>;

    /// Retrieve post by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: &PostId) -> Result<Post, PostError>;

    /// Replace the content of a post owned by `owner`.
    ///
    /// A missing or foreign post is left untouched and still reports success.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        owner: UserId,
        id: &PostId,
        command: UpdatePostCommand,
    ) -> Result<(), PostError>;

    /// Delete a post owned by `owner`; same no-op rule as `update_post`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, owner: UserId, id: &PostId) -> Result<(), PostError>;

    /// One page of posts in store order.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self, page: Page) -> Result<Vec<Post>, PostError>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post.
    ///
    /// # Returns
    /// Stored post with the store-assigned creation timestamp
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed (including an unknown owner)
    async fn insert(&self, post: NewPost) -> Result<Post, PostError>;

    /// Retrieve post by identifier.
    ///
    /// # Returns
    /// Optional post (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed or the row is malformed
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;

    /// Apply an owner-scoped update.
    ///
    /// Zero affected rows is not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, update: PostUpdate) -> Result<(), PostError>;

    /// Delete a post if it has `id` and belongs to `owner`.
    ///
    /// Zero affected rows is not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &PostId, owner: &UserId) -> Result<(), PostError>;

    /// Retrieve one page of posts.
    ///
    /// # Returns
    /// At most `PAGE_SIZE` posts; rows that fail to decode are skipped
    ///
    /// # Errors
    /// * `DatabaseError` - Query or transport failed
    async fn list(&self, page: Page) -> Result<Vec<Post>, PostError>;
}
