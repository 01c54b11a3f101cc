use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use super::PageQuery;
use crate::domain::page::Page;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Json(body): Json<PostRequestBody>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let command = CreatePostCommand {
        content: body.content()?,
    };

    state
        .post_service
        .create_post(identity.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id = parse_post_id(&post_id)?;

    state
        .post_service
        .get_post(&post_id)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}

/// Owner-scoped; a post that is missing or not the caller's stays as it was.
pub async fn update_post(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    Json(body): Json<PostRequestBody>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let post_id = parse_post_id(&post_id)?;
    let command = UpdatePostCommand {
        content: body.content()?,
    };

    state
        .post_service
        .update_post(identity.user_id, &post_id, command)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Post updated")))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let post_id = parse_post_id(&post_id)?;

    state
        .post_service
        .delete_post(identity.user_id, &post_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Post deleted")))
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    let page = Page::parse(query.page.as_deref())?;

    state
        .post_service
        .list_posts(page)
        .await
        .map_err(ApiError::from)
        .map(|posts| ApiSuccess::new(StatusCode::OK, posts.iter().map(PostData::from).collect()))
}

fn parse_post_id(raw: &str) -> Result<PostId, ApiError> {
    PostId::from_string(raw).map_err(|e| ApiError::from(PostError::from(e)))
}

/// HTTP request body for creating or editing a post
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRequestBody {
    post_content: String,
}

impl PostRequestBody {
    fn content(self) -> Result<PostContent, ApiError> {
        PostContent::new(self.post_content).map_err(|e| ApiError::from(PostError::from(e)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    pub id: String,
    pub post_content: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            post_content: post.content.as_str().to_string(),
            user_id: post.owner.to_string(),
            created_at: post.created_at,
        }
    }
}
