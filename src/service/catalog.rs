//! Course Catalog Service

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::course::Course;
use crate::utils::error::{AppError, AppResult};

pub struct CatalogService {
    pool: SqlitePool,
}

impl CatalogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new active course. Course names are unique.
    pub async fn create_course(&self, name: &str) -> AppResult<Course> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO courses (name, active, created_at, updated_at) VALUES (?, TRUE, ?, ?)",
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(AppError::Conflict("Course already exists".into()));
            }
            Err(e) => return Err(e.into()),
        };

        log::info!("created course {} ({})", id, name);
        Ok(Course {
            id,
            name: name.to_string(),
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Active courses, ordered by name. The public read path.
    pub async fn list_active_courses(&self) -> AppResult<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT * FROM courses WHERE active = TRUE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn test_create_and_list_courses(pool: SqlitePool) {
        let service = CatalogService::new(pool.clone());
        service.create_course("Physics").await.unwrap();
        service.create_course("Art").await.unwrap();

        let courses = service.list_active_courses().await.unwrap();
        let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Art", "Physics"]);
    }

    #[sqlx::test]
    async fn test_duplicate_course_conflicts(pool: SqlitePool) {
        let service = CatalogService::new(pool);
        service.create_course("Physics").await.unwrap();
        let err = service.create_course("Physics").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test]
    async fn test_inactive_courses_hidden(pool: SqlitePool) {
        let service = CatalogService::new(pool.clone());
        let course = service.create_course("Physics").await.unwrap();

        sqlx::query("UPDATE courses SET active = FALSE WHERE id = ?")
            .bind(course.id)
            .execute(&pool)
            .await
            .unwrap();

        assert!(service.list_active_courses().await.unwrap().is_empty());
    }
}
