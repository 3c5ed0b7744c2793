//! HMAC token verification.
//! Used by: token::authority.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::token::claims::Claims;

/// Only the HMAC family is accepted; anything else in the header is a
/// substitution attempt.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Just enough of the header to read `alg` as written, including values
/// `jsonwebtoken` has no variant for, such as `none`.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Rejects any declared algorithm outside the HMAC family. Headers that do not
/// decode at all are left for `decode` to report as malformed.
fn check_algorithm(token: &str) -> Result<()> {
    let Some((encoded, _)) = token.split_once('.') else {
        return Ok(());
    };
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(encoded) else {
        return Ok(());
    };
    let Ok(header) = serde_json::from_slice::<RawHeader>(&bytes) else {
        return Ok(());
    };
    match header.alg.parse::<Algorithm>() {
        Ok(alg) if HMAC_ALGORITHMS.contains(&alg) => Ok(()),
        _ => Err(Error::AlgorithmMismatch),
    }
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    verify_token_at(token, secret, Utc::now())
}

pub fn verify_token_at(token: &str, secret: &str, now: DateTime<Utc>) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = HMAC_ALGORITHMS.to_vec();
    // exp and nbf are checked against `now` below.
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.leeway = 0;

    check_algorithm(token)?;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => Error::InvalidSignature,
        ErrorKind::InvalidAlgorithm => Error::AlgorithmMismatch,
        ErrorKind::ExpiredSignature => Error::TokenExpired,
        _ => Error::MalformedToken(e.to_string()),
    })?;
    let claims = data.claims;

    if claims.is_expired_at(now) {
        return Err(Error::TokenExpired);
    }
    if !claims.is_active_at(now) {
        return Err(Error::TokenNotYetValid);
    }

    Ok(claims)
}
