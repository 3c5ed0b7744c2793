//! Claims carried by news portal access tokens.
//! Used by: token::sign, token::verify, middleware.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime of every issued access token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub user_id: i64,
    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn new(user_id: i64, issuer: &str, now: DateTime<Utc>) -> Self {
        let issued_at = now.timestamp();
        Self {
            user_id,
            iss: issuer.to_owned(),
            iat: issued_at,
            nbf: issued_at,
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            jti: user_id.to_string(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.nbf
    }
}
