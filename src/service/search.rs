//! Search Service
//!
//! Naive cross-entity substring search over tutors, students and feeds.
//! One `LIKE %value%` pass per table, always via bound parameters.

use sqlx::SqlitePool;

use crate::models::search::SearchHit;
use crate::utils::error::AppResult;

pub struct SearchService {
    pool: SqlitePool,
}

impl SearchService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Hits across tutors (name, email, courses), students (name, email,
    /// interests) and feeds (content, author), each tagged with its origin.
    /// Feed hits carry their posted date ("12 Jan") as the third field.
    pub async fn search(&self, value: &str) -> AppResult<Vec<SearchHit>> {
        let pattern = format!("%{}%", value);
        let mut hits = Vec::new();

        hits.extend(
            sqlx::query_as::<_, SearchHit>(
                "SELECT 'tutor' AS origin,
                        u.first_name || ' ' || u.last_name AS field1,
                        u.email AS field2,
                        COALESCE(GROUP_CONCAT(c.name), '') AS field3
                 FROM users u
                 LEFT JOIN tutor_courses tc ON tc.tutor_id = u.id
                 LEFT JOIN courses c ON c.id = tc.course_id
                 WHERE u.role = 'tutor' AND u.active = TRUE
                 GROUP BY u.id
                 HAVING field1 LIKE ? OR field2 LIKE ? OR field3 LIKE ?
                 ORDER BY u.id",
            )
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?,
        );

        hits.extend(
            sqlx::query_as::<_, SearchHit>(
                "SELECT 'student' AS origin,
                        u.first_name || ' ' || u.last_name AS field1,
                        u.email AS field2,
                        COALESCE(GROUP_CONCAT(c.name), '') AS field3
                 FROM users u
                 LEFT JOIN student_interests si ON si.student_id = u.id
                 LEFT JOIN courses c ON c.id = si.course_id
                 WHERE u.role = 'student' AND u.active = TRUE
                 GROUP BY u.id
                 HAVING field1 LIKE ? OR field2 LIKE ? OR field3 LIKE ?
                 ORDER BY u.id",
            )
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?,
        );

        hits.extend(
            sqlx::query_as::<_, SearchHit>(
                "SELECT 'feed' AS origin,
                        content AS field1,
                        author_name AS field2,
                        STRFTIME('%d', created_at) || ' ' ||
                            SUBSTR('JanFebMarAprMayJunJulAugSepOctNovDec',
                                   1 + 3 * STRFTIME('%m', created_at), -3) AS field3
                 FROM feeds
                 WHERE content LIKE ? OR author_name LIKE ?
                 ORDER BY id",
            )
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?,
        );

        Ok(hits)
    }
}
