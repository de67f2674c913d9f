//! OTP Service
//!
//! Issues and validates the 4-digit one-time passcodes used for email
//! verification and password reset.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::session::OtpCode;
use crate::utils::error::AppResult;
use crate::utils::security::generate_otp_pin;

/// Outcome of validating a submitted code against the stored state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpOutcome {
    Valid,
    NotFound,
    Mismatch,
}

/// Issues, stores, and validates one-time passcodes tied to an email.
///
/// Rows are never deleted or expired; multiple codes may exist per email and
/// only the newest is authoritative. Validation is stateless and retryable.
#[derive(Clone)]
pub struct OtpService {
    pool: SqlitePool,
}

impl OtpService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Generate and persist a fresh code for `email`, returning it for
    /// delivery. Previous codes are left in place.
    pub async fn issue(&self, email: &str) -> AppResult<String> {
        let pin = generate_otp_pin();
        sqlx::query("INSERT INTO otp_codes (email, code, created_at) VALUES (?, ?, ?)")
            .bind(email)
            .bind(&pin)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        log::info!("issued OTP for {}", email);
        Ok(pin)
    }

    /// Check `code` against the newest stored row for `email`
    pub async fn validate(&self, email: &str, code: &str) -> AppResult<OtpOutcome> {
        let newest = sqlx::query_as::<_, OtpCode>(
            "SELECT id, email, code, created_at FROM otp_codes
             WHERE email = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let outcome = match newest {
            None => OtpOutcome::NotFound,
            Some(row) if row.code == code => OtpOutcome::Valid,
            Some(_) => OtpOutcome::Mismatch,
        };
        Ok(outcome)
    }
}
