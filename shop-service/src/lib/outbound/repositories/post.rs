use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::page::Page;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostUpdate;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_post(row: &PgRow) -> Result<Post, PostError> {
        let decode = |e: sqlx::Error| PostError::DatabaseError(e.to_string());

        Ok(Post {
            id: PostId(row.try_get("id").map_err(decode)?),
            content: PostContent::new(row.try_get("post_content").map_err(decode)?)
                .map_err(|e| PostError::DatabaseError(format!("stored post content: {}", e)))?,
            owner: UserId(row.try_get("user_id").map_err(decode)?),
            created_at: row.try_get("created_at").map_err(decode)?,
        })
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, PostError> {
        let row = sqlx::query(
            r#"
            INSERT INTO posts (id, post_content, user_id)
            VALUES ($1, $2, $3)
            RETURNING created_at
            "#,
        )
        .bind(post.id.0)
        .bind(post.content.as_str())
        .bind(post.owner.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let created_at = row
            .try_get("created_at")
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(Post {
            id: post.id,
            content: post.content,
            owner: post.owner,
            created_at,
        })
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query(
            r#"
            SELECT id, post_content, user_id, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_post).transpose()
    }

    async fn update(&self, update: PostUpdate) -> Result<(), PostError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET post_content = $3
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(update.id.0)
        .bind(update.owner.0)
        .bind(update.content.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        tracing::debug!(
            post_id = %update.id,
            owner = %update.owner,
            rows_affected = result.rows_affected(),
            "Post update applied"
        );

        Ok(())
    }

    async fn delete(&self, id: &PostId, owner: &UserId) -> Result<(), PostError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        tracing::debug!(
            post_id = %id,
            owner = %owner,
            rows_affected = result.rows_affected(),
            "Post delete applied"
        );

        Ok(())
    }

    async fn list(&self, page: Page) -> Result<Vec<Post>, PostError> {
        let mut rows = sqlx::query(
            r#"
            SELECT id, post_content, user_id, created_at
            FROM posts
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch(&self.pool);

        let mut posts = Vec::new();
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?
        {
            match Self::row_to_post(&row) {
                Ok(post) => posts.push(post),
                Err(e) => tracing::warn!(error = %e, page = page.number(), "Skipping unreadable post row"),
            }
        }

        Ok(posts)
    }
}
