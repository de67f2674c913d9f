//! Tutor request models

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A student's request to a tutor. `hidden` suppresses display without
/// deleting history.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TutorRequest {
    pub id: i64,
    pub tutor_id: i64,
    pub student_id: i64,
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
}

/// A tutor entry in a student's discovery list, annotated with whether a
/// request for the pair already exists.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TutorSummary {
    pub tutor_id: i64,
    pub tutor_name: String,
    pub bio: String,
    pub websites: String,
    pub courses: String,
    pub already_requested: bool,
}

/// A pending request as shown to the tutor, joined with requester profile
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub tutor_id: i64,
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub mobile_no: String,
    pub interests: String,
    pub hidden: bool,
}
