//! HS256 token signing.
//! Used by: token::authority.

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::error::{Error, Result};
use crate::token::claims::Claims;

/// A freshly signed token and its expiry as Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: i64,
}

pub fn issue_token(user_id: i64, secret: &str, issuer: &str) -> Result<AccessToken> {
    issue_token_at(user_id, secret, issuer, Utc::now())
}

pub fn issue_token_at(
    user_id: i64,
    secret: &str,
    issuer: &str,
    now: DateTime<Utc>,
) -> Result<AccessToken> {
    if secret.is_empty() {
        return Err(Error::Signing("signing secret is empty".into()));
    }
    let claims = Claims::new(user_id, issuer, now);
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Signing(e.to_string()))?;
    Ok(AccessToken {
        token,
        expires_at: claims.exp,
    })
}
