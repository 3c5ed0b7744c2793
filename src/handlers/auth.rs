//! Login endpoint exchanging credentials for an access token.
//! Used by: server.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use email_address::EmailAddress;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::response::{LoginResponse, Meta};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn validate_request(req: &LoginRequest) -> Result<()> {
    let mut problems = Vec::new();
    if req.email.is_empty() {
        problems.push("Field email is required");
    } else if !EmailAddress::is_valid(&req.email) {
        problems.push("Invalid email format");
    }
    if req.password.is_empty() {
        problems.push("Field password is required");
    } else if req.password.chars().count() < MIN_PASSWORD_LEN {
        problems.push("Password must be at least 8 characters");
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(problems.join(", ")))
    }
}

pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(req) = payload.map_err(|e| Error::Validation(e.body_text()))?;
    validate_request(&req)?;

    let Some(user) = state.db.find_user_by_email(&req.email)? else {
        tracing::warn!("login for unknown email");
        return Err(Error::InvalidCredentials);
    };
    if let Err(e) = password_auth::verify_password(&req.password, &user.password_hash) {
        tracing::warn!(user_id = user.id, error = ?e, "password check failed");
        return Err(Error::InvalidCredentials);
    }

    let issued = state.tokens.issue(user.id)?;
    tracing::info!(user_id = user.id, expires_at = issued.expires_at, "login success");
    Ok(Json(LoginResponse {
        meta: Meta {
            status: true,
            message: "Login success".into(),
        },
        access_token: issued.token,
        expired_at: issued.expires_at,
    }))
}
