//! Policy Service
//!
//! Administrative policy documents. Creation is admin-only; the role check
//! lives in the handler layer.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::feed::Policy;
use crate::utils::error::{AppError, AppResult};

pub struct PolicyService {
    pool: SqlitePool,
}

impl PolicyService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_policy(
        &self,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> AppResult<Policy> {
        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO policies (title, content, author_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        log::info!("created policy {} ({})", id, title);
        Ok(Policy {
            id,
            title: title.to_string(),
            content: content.to_string(),
            author_id,
            created_at: now,
        })
    }

    pub async fn list_policies(&self) -> AppResult<Vec<Policy>> {
        let policies = sqlx::query_as::<_, Policy>("SELECT * FROM policies ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(policies)
    }

    pub async fn delete_policy(&self, policy_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM policies WHERE id = ?")
            .bind(policy_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Policy not found".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn test_policy_lifecycle(pool: SqlitePool) {
        let service = PolicyService::new(pool);

        let policy = service
            .create_policy("Code of conduct", "Be kind.", 1)
            .await
            .unwrap();
        service
            .create_policy("Refunds", "Within 14 days.", 1)
            .await
            .unwrap();

        let policies = service.list_policies().await.unwrap();
        assert_eq!(policies.len(), 2);
        assert_eq!(policies[0].title, "Refunds");

        service.delete_policy(policy.id).await.unwrap();
        let err = service.delete_policy(policy.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
