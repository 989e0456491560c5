/// JWT validation for tokens issued by the external identity provider
///
/// The service never mints tokens for clients; it validates HS256 tokens
/// signed with the shared SECRET_KEY and extracts the subject (user id).
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

// Thread-safe storage for the shared secret loaded at startup
lazy_static! {
    static ref JWT_SECRET: RwLock<Option<String>> = RwLock::new(None);
}

/// Initialize the shared secret.
/// Must be called during application startup before any JWT operations.
pub fn initialize_secret(secret: &str) -> Result<()> {
    let mut guard = JWT_SECRET
        .write()
        .map_err(|e| anyhow!("Failed to acquire write lock on JWT secret: {}", e))?;
    *guard = Some(secret.to_string());
    Ok(())
}

fn get_secret() -> Result<String> {
    let guard = JWT_SECRET
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on JWT secret: {}", e))?;
    guard
        .clone()
        .ok_or_else(|| anyhow!("JWT secret not initialized. Call initialize_secret() during startup"))
}

/// Validate a token and return its claims
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let secret = get_secret()?;
    let validation = Validation::default();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| anyhow!("Token validation failed: {}", e))
}

/// Generate a token for the given user, valid for `ttl_hours` hours.
/// Used by integration tests and local tooling; production tokens come
/// from the identity provider with the same secret.
pub fn generate_token(user_id: Uuid, ttl_hours: i64) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };

    let secret = get_secret()?;
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| anyhow!("Token generation failed: {}", e))
}
