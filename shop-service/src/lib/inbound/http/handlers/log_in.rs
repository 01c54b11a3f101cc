use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LogInCommand;
use crate::domain::user::models::Session;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn log_in(
    State(state): State<AppState>,
    Json(body): Json<LogInRequestBody>,
) -> Result<ApiSuccess<LogInResponseData>, ApiError> {
    // A malformed email cannot belong to an account.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    state
        .user_service
        .log_in(LogInCommand {
            email,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogInRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogInResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
}

impl From<Session> for LogInResponseData {
    fn from(session: Session) -> Self {
        Self {
            token: session.access_token,
            expires_at: session.expires_at,
            user: UserData {
                id: session.user.id.to_string(),
                email: session.user.email.as_str().to_string(),
            },
        }
    }
}
