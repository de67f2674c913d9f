//! Course catalog model

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A catalog course. Never hard-deleted through the API; the public read
/// path filters on `active`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact course reference embedded in profile responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CourseRef {
    pub course_id: i64,
    pub course_name: String,
}
