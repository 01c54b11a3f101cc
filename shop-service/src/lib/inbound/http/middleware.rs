use std::sync::Arc;

use auth::Authenticator;
use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Identity attached to request extensions once the gate lets a request through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

/// A path pattern that bypasses token validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExemptRoute {
    /// Only this exact path.
    Exact(&'static str),
    /// This path and anything below it (`/docs` covers `/docs/a`, not `/docsx`).
    Prefix(&'static str),
}

impl ExemptRoute {
    fn matches(&self, path: &str) -> bool {
        match self {
            ExemptRoute::Exact(exact) => path == *exact,
            ExemptRoute::Prefix(prefix) => {
                path == *prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Table of routes reachable without a token.
#[derive(Debug, Clone)]
pub struct ExemptRoutes(Vec<ExemptRoute>);

impl ExemptRoutes {
    pub fn new(routes: Vec<ExemptRoute>) -> Self {
        Self(routes)
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.0.iter().any(|route| route.matches(path))
    }
}

impl Default for ExemptRoutes {
    /// Home, login and signup.
    fn default() -> Self {
        Self(vec![
            ExemptRoute::Exact("/"),
            ExemptRoute::Exact("/login"),
            ExemptRoute::Exact("/signup"),
        ])
    }
}

/// Outcome of a gate check that lets the request proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Exempt,
    Authenticated(AuthenticatedUser),
}

/// Reasons a protected request is rejected.
#[derive(Debug, Clone, Error)]
pub enum GateError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedHeader,

    #[error("Token is expired")]
    Expired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl From<JwtError> for GateError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => GateError::Expired,
            other => GateError::InvalidToken(other.to_string()),
        }
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// Request-level authentication policy.
///
/// Exempt paths pass untouched. Every other path needs a valid bearer token;
/// anything else ends the request with 401 before a handler runs.
pub struct AuthGate {
    authenticator: Arc<Authenticator>,
    exempt: ExemptRoutes,
}

impl AuthGate {
    pub fn new(authenticator: Arc<Authenticator>, exempt: ExemptRoutes) -> Self {
        Self {
            authenticator,
            exempt,
        }
    }

    /// Decide whether a request for `path` with `headers` may proceed.
    ///
    /// # Errors
    /// * `MissingHeader` / `MalformedHeader` - No usable bearer token
    /// * `Expired` - Token is past its expiry
    /// * `InvalidToken` - Bad signature, malformed token or subject
    pub fn authorize(&self, path: &str, headers: &HeaderMap) -> Result<GateDecision, GateError> {
        if self.exempt.is_exempt(path) {
            return Ok(GateDecision::Exempt);
        }

        let token = bearer_token(headers)?;
        let claims = self.authenticator.validate_token(token)?;

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| GateError::InvalidToken(e.to_string()))?;
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| GateError::InvalidToken("expiry out of range".to_string()))?;

        Ok(GateDecision::Authenticated(AuthenticatedUser {
            user_id,
            expires_at,
        }))
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, GateError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(GateError::MissingHeader)?
        .to_str()
        .map_err(|_| GateError::MalformedHeader)?;

    match value.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(GateError::MalformedHeader),
    }
}

/// Middleware that applies the [`AuthGate`] and adds the identity to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let decision = state
        .auth_gate
        .authorize(req.uri().path(), req.headers())
        .map_err(|e| {
            tracing::warn!(path = %req.uri().path(), error = %e, "Request rejected by auth gate");
            ApiError::from(e)
        })?;

    if let GateDecision::Authenticated(user) = decision {
        req.extensions_mut().insert(user);
    }

    Ok(next.run(req).await)
}
