//! JWT Authentication Service
//!
//! Issues and verifies the HS256 session tokens carried in the
//! `Authorization: Bearer` header.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::{User, UserRole};
use crate::utils::error::{AppError, AppResult};

/// Compact claim set signed into every session token.
///
/// Tokens deliberately carry no `exp` claim; sessions end through the
/// logout endpoint, not token expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub display_name: String,
    pub email: String,
    pub id: i64,
    pub role: UserRole,
}

impl Claims {
    pub fn for_user(user: &User) -> Self {
        Self {
            display_name: user.display_name(),
            email: user.email.clone(),
            id: user.id,
            role: user.role,
        }
    }
}

/// HS256 token issue/verify with a server secret
#[derive(Clone)]
pub struct JwtService {
    secret: String,
}

impl JwtService {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Sign a claim set into a compact token
    pub fn issue_token(&self, claims: &Claims) -> AppResult<String> {
        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        encode(&header, claims, &encoding_key)
            .map_err(|e| AppError::Internal(format!("token generation failed: {}", e)))
    }

    /// Decode and verify a token's signature, returning its claims.
    ///
    /// Fails with `Forbidden` on a bad signature or malformed token; the
    /// middleware maps a *missing* token to `Authentication` before this
    /// is ever called.
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No exp claim is issued, so none is required or validated.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());

        decode::<Claims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Forbidden("Invalid token".to_string()))
    }
}
