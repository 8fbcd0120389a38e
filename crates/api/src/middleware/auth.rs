//! # Authentication Module
//!
//! Password hashing, access tokens and the [`AuthUser`] extractor.
//!
//! Passwords are hashed with Argon2 and stored in PHC string format. Access
//! tokens are HS256 JWTs carrying the user id and role. The role claim is
//! informational only: [`AuthUser`] reloads the user on every request and
//! authorizes with the stored role.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use chrono::{TimeDelta, Utc};
use courtbook_core::{errors::CourtbookError, models::user::Role, policy::Principal};
use courtbook_db::repositories::UserRepository;
use eyre::{eyre, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated for each call and the result is
/// returned in PHC string format (algorithm, version, parameters, salt
/// and hash).
///
/// # Example
///
/// ```
/// use courtbook_api::middleware::auth::{hash_password, verify_password};
///
/// let hashed = hash_password("secret123").unwrap();
/// assert!(verify_password("secret123", &hashed));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks a plain text password against a stored PHC hash.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

/// [`hash_password`] on the blocking thread pool.
pub async fn hash_password_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

/// [`verify_password`] on the blocking thread pool.
pub async fn verify_password_blocking(password: String, password_hash: String) -> Result<bool> {
    Ok(tokio::task::spawn_blocking(move || verify_password(&password, &password_hash)).await?)
}

/// JWT payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Signs an access token for `user_id` valid for `ttl_hours`.
pub fn issue_token(user_id: Uuid, role: Role, secret: &str, ttl_hours: i64) -> Result<String> {
    let now = Utc::now();
    let expiration = TimeDelta::try_hours(ttl_hours)
        .filter(|ttl| *ttl > TimeDelta::zero())
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| eyre!("Token lifetime of {} hours is out of range", ttl_hours))?;

    let claims = Claims {
        sub: user_id,
        role,
        iat: now.timestamp(),
        exp: expiration.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verifies signature and expiry and returns the claims.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The authenticated caller, extracted from the `Authorization: Bearer` header.
///
/// - no token: 401
/// - token fails verification: 403
/// - token is valid but the user no longer exists: 401
///
/// Use `Option<AuthUser>` on routes where authentication is optional.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Principal);

#[axum::async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| CourtbookError::Authentication("Access token required".into()))?;

        let claims = decode_token(token, &state.auth.jwt_secret).map_err(|e| {
            warn!("Rejected access token: {}", e);
            CourtbookError::Authorization("Invalid or expired token".into())
        })?;

        let user = state
            .store
            .get_user_by_id(claims.sub)
            .await?
            .ok_or_else(|| CourtbookError::Authentication("User no longer exists".into()))?;

        Ok(AuthUser(Principal {
            user_id: user.id,
            role: user.role,
        }))
    }
}
