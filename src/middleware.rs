//! Bearer-token authentication for protected routes.
//! Used by: server, handlers::category.

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::{Error, Result};
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity taken from a verified access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
}

fn bearer_token(request: &Request) -> Result<&str> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(Error::MissingAuthorization)?;
    let value = header
        .to_str()
        .map_err(|e| Error::MalformedToken(e.to_string()))?;
    if value.is_empty() {
        return Err(Error::MissingAuthorization);
    }
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::MalformedToken("expected bearer scheme".into()))
}

pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(&request)?;
    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::warn!(reason = %e, "access token rejected");
        e
    })?;
    request.extensions_mut().insert(CurrentUser {
        user_id: claims.user_id,
    });
    Ok(next.run(request).await)
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or(Error::Unauthorized)?;
        if user.user_id == 0 {
            tracing::warn!("token carries no identity");
            return Err(Error::Unauthorized);
        }
        Ok(user)
    }
}
