//! Cross-entity search models

use serde::Serialize;

/// Which table a search hit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SearchOrigin {
    Tutor,
    Student,
    Feed,
}

/// One row of the unioned search result
///
/// The three fields carry origin-dependent content: name/email/interests for
/// tutors and students, content/author/date for feeds.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub origin: SearchOrigin,
    pub field1: String,
    pub field2: String,
    pub field3: String,
}
