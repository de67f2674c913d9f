//! Session and OTP row models

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A login session row. At most one live row per email; prior rows are
/// deleted before a fresh login row is inserted.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub email: String,
    pub token: String,
    pub logged_in_at: DateTime<Utc>,
    pub logged_out_at: Option<DateTime<Utc>>,
}

/// A stored one-time passcode. Rows accumulate per email; only the newest
/// is authoritative.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OtpCode {
    pub id: i64,
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}
