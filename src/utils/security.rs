//! Security Utilities
//!
//! Password hashing and one-time passcode generation.

use bcrypt::{hash, verify, DEFAULT_COST};
use rand::Rng;

/// Default bcrypt cost for password hashing
pub const DEFAULT_BCRYPT_COST: u32 = DEFAULT_COST;

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash_password_with_cost(password, DEFAULT_BCRYPT_COST)
}

/// Hash a password with custom bcrypt cost
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

/// Generate a uniformly random 4-digit OTP pin, zero-padded ("0000"-"9999")
pub fn generate_otp_pin() -> String {
    format!("{:04}", rand::thread_rng().gen_range(0..=9999))
}
