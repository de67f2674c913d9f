//! Feeds Service
//!
//! The social wall: append, list with sort and pagination, delete.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::Pagination;
use crate::models::feed::Feed;
use crate::utils::error::{AppError, AppResult};

/// Sort direction for the feed wall, by insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedSort {
    Asc,
    #[default]
    Desc,
}

impl FeedSort {
    /// Lenient parse: anything other than "asc" means newest-first.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("asc") => FeedSort::Asc,
            _ => FeedSort::Desc,
        }
    }

    fn sql(&self) -> &'static str {
        match self {
            FeedSort::Asc => "ASC",
            FeedSort::Desc => "DESC",
        }
    }
}

pub struct FeedService {
    pool: SqlitePool,
}

impl FeedService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a feed entry, stamped with the server clock.
    pub async fn create_feed(
        &self,
        content: &str,
        author_id: i64,
        author_name: &str,
    ) -> AppResult<Feed> {
        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO feeds (content, author_id, author_name, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(content)
        .bind(author_id)
        .bind(author_name)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Feed {
            id,
            content: content.to_string(),
            author_id,
            author_name: author_name.to_string(),
            created_at: now,
        })
    }

    pub async fn list_feeds(&self, sort: FeedSort, pagination: Pagination) -> AppResult<Vec<Feed>> {
        let sql = format!(
            "SELECT * FROM feeds ORDER BY id {}{}",
            sort.sql(),
            pagination.sql_suffix()
        );
        let feeds = sqlx::query_as::<_, Feed>(&sql).fetch_all(&self.pool).await?;
        Ok(feeds)
    }

    /// Delete by id. Any authenticated caller may delete any entry.
    pub async fn delete_feed(&self, feed_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM feeds WHERE id = ?")
            .bind(feed_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Feed not found".into()));
        }
        Ok(())
    }
}
