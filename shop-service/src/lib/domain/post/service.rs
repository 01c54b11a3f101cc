use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::page::Page;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostUpdate;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        owner: UserId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let post = self
            .repository
            .insert(NewPost {
                id: PostId::new(),
                content: command.content,
                owner,
            })
            .await?;

        tracing::info!(post_id = %post.id, owner = %owner, "Post created");

        Ok(post)
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))
    }

    async fn update_post(
        &self,
        owner: UserId,
        id: &PostId,
        command: UpdatePostCommand,
    ) -> Result<(), PostError> {
        self.repository
            .update(PostUpdate {
                id: *id,
                owner,
                content: command.content,
            })
            .await
    }

    async fn delete_post(&self, owner: UserId, id: &PostId) -> Result<(), PostError> {
        self.repository.delete(id, &owner).await
    }

    async fn list_posts(&self, page: Page) -> Result<Vec<Post>, PostError> {
        self.repository.list(page).await
    }
}
