//! JWT issuance for authenticated users.
//!
//! Tokens are signed with HMAC-SHA256 and carry exactly two claims: the
//! user id and an absolute expiry. The service keeps no record of issued
//! tokens and cannot revoke them before they expire on their own.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// Sign a token for a verified user.
///
/// Fails closed when the secret is empty rather than producing a token
/// anyone could forge.
pub fn issue(secret: &str, ttl_secs: i64, user_id: i64) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let exp = (Utc::now() + Duration::seconds(ttl_secs)).timestamp();
    let claims = Claims { user_id, exp };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Decode and verify a token, checking the signature and expiry.
///
/// No route calls this today; it exists for token consumers and tests.
pub fn verify(secret: &str, token: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(data.claims)
}
