//! Process-wide signer/verifier bound to the configured secret and issuer.
//! Used by: state, handlers::auth, middleware.

use std::fmt;

use crate::error::Result;
use crate::token::claims::Claims;
use crate::token::sign::{issue_token, AccessToken};
use crate::token::verify::verify_token;

#[derive(Clone)]
pub struct TokenAuthority {
    secret: String,
    issuer: String,
}

impl TokenAuthority {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
        }
    }

    pub fn issue(&self, user_id: i64) -> Result<AccessToken> {
        issue_token(user_id, &self.secret, &self.issuer)
    }

    /// The issuer claim is not compared; any token signed with our secret
    /// and still inside its validity window is accepted.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        verify_token(token, &self.secret)
    }
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .finish()
    }
}
