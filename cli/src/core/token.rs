//! # projgit Bearer Tokens
//!
//! File: cli/src/core/token.rs
//!
//! ## Overview
//!
//! HS256 JSON Web Tokens carrying an `identifier` claim.
//!
//! - **Issuing** (`issue_token`) checks the identifier against the configured
//!   allow-list. This only happens offline, in `projgit token`.
//! - **Validating** (`validate_token`) checks the signature and, when the token
//!   has one, the `exp` claim. The identifier is not re-checked against the
//!   allow-list.
//!
use crate::core::config::AuthConfig;
use crate::core::error::ProjgitError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

/// Token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub identifier: String,
    /// Issued-at, seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiry, seconds since the epoch. Tokens without it never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Why a bearer token was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Bearer token required.")]
    MissingToken,
    #[error("Token has expired.")]
    Expired,
    #[error("Invalid token.")]
    Invalid,
}

/// # Issue Token (`issue_token`)
///
/// Issues a token for `identifier` if it is on the allow-list.
///
/// ## Arguments
///
/// * `auth` - Signing key, allow-list and default lifetime.
/// * `identifier` - Caller name embedded in the claims. Surrounding whitespace is ignored.
/// * `ttl_hours` - Overrides `auth.token_ttl_hours`. `None` in both yields a token without `exp`.
///
/// ## Returns
///
/// * `Result<String, ProjgitError>` - The encoded JWT.
///
/// ## Errors
///
/// * `ProjgitError::InvalidIdentifier` if the identifier is not allow-listed.
/// * `ProjgitError::Config` if the lifetime is above `MAX_TTL_HOURS`.
/// * `ProjgitError::Token` if encoding fails.
pub fn issue_token(
    auth: &AuthConfig,
    identifier: &str,
    ttl_hours: Option<u64>,
) -> Result<String, ProjgitError> {
    let identifier = identifier.trim();
    // Exact match against the allow-list; no pattern matching.
    if !auth.valid_identifiers.iter().any(|valid| valid == identifier) {
        return Err(ProjgitError::InvalidIdentifier(identifier.to_string()));
    }

    let now = Utc::now();
    let exp = match ttl_hours.or(auth.token_ttl_hours) {
        Some(hours) => Some(expiry_after(now, hours)?),
        None => None,
    };
    let claims = Claims {
        identifier: identifier.to_string(),
        iat: Some(now.timestamp()),
        exp,
    };

    let token = encode_claims(&claims, &auth.app_key)?;
    info!("Issued token for identifier '{}' (exp: {:?})", identifier, exp);
    Ok(token)
}

/// Largest accepted token lifetime (100 years).
pub const MAX_TTL_HOURS: u64 = 100 * 365 * 24;

/// Expiry timestamp `hours` after `now`.
///
/// ## Errors
///
/// Returns `ProjgitError::Config` when `hours` exceeds `MAX_TTL_HOURS` or the
/// resulting time cannot be represented.
fn expiry_after(now: DateTime<Utc>, hours: u64) -> Result<i64, ProjgitError> {
    let out_of_range = || {
        ProjgitError::Config(format!(
            "Token lifetime of {} hours is out of range (maximum {}).",
            hours, MAX_TTL_HOURS
        ))
    };
    if hours > MAX_TTL_HOURS {
        return Err(out_of_range());
    }
    let hours = i64::try_from(hours).map_err(|_| out_of_range())?;
    let lifetime = Duration::try_hours(hours).ok_or_else(out_of_range)?;
    now.checked_add_signed(lifetime)
        .map(|exp| exp.timestamp())
        .ok_or_else(out_of_range)
}

/// Signs `claims` with HS256.
pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, ProjgitError> {
    Ok(encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Verifies signature and expiry of `token`.
///
/// ## Errors
///
/// * `AuthError::Expired` if `exp` is present and in the past (no leeway).
/// * `AuthError::Invalid` for a bad signature, a different algorithm or a malformed token.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // `exp` is optional; when present it is still enforced.
    validation.required_spec_claims = HashSet::new();
    validation.validate_exp = true;
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            debug!("Token rejected: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid,
            }
        })
}

/// Extracts the token from an `Authorization` header value.
///
/// Only the exact `Bearer ` scheme prefix is accepted. A missing header and
/// an empty token both yield `AuthError::MissingToken`.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}
