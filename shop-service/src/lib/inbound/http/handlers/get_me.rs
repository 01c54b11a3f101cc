use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Account behind the presented token.
pub async fn get_me(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<GetMeResponseData>, ApiError> {
    state
        .user_service
        .get_user(&identity.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::OK,
                GetMeResponseData::new(user, identity.expires_at),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetMeResponseData {
    pub id: String,
    pub email: String,
    pub token_expires_at: DateTime<Utc>,
}

impl GetMeResponseData {
    fn new(user: &User, token_expires_at: DateTime<Utc>) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            token_expires_at,
        }
    }
}
