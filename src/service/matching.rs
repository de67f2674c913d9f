//! Matching Service
//!
//! Student interests, tutor profiles and the student-to-tutor request
//! workflow.

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::course::CourseRef;
use crate::models::feed::Feed;
use crate::models::profile::{Profile, StudentProfile, TutorProfile};
use crate::models::request::{RequestSummary, TutorSummary};
use crate::models::user::{User, UserRole};
use crate::service::email::EmailService;
use crate::utils::error::{AppError, AppResult};

/// Interests, profiles and the request workflow
pub struct MatchingService {
    pool: SqlitePool,
    mailer: Option<Arc<EmailService>>,
}

impl MatchingService {
    pub fn new(pool: SqlitePool, mailer: Option<Arc<EmailService>>) -> Self {
        Self { pool, mailer }
    }

    /// Replace the student's interest set wholesale.
    pub async fn set_student_interests(
        &self,
        student_id: i64,
        course_ids: &[i64],
    ) -> AppResult<()> {
        self.require_active(student_id, UserRole::Student).await?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM student_interests WHERE student_id = ?")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;
        for course_id in course_ids {
            sqlx::query(
                "INSERT INTO student_interests (student_id, course_id, created_at)
                 VALUES (?, ?, ?)",
            )
            .bind(student_id)
            .bind(course_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Replace the tutor's header attributes and course set wholesale.
    pub async fn set_tutor_profile(
        &self,
        tutor_id: i64,
        course_ids: &[i64],
        bio: &str,
        websites: &str,
        mail_subscription: bool,
    ) -> AppResult<()> {
        self.require_active(tutor_id, UserRole::Tutor).await?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO tutor_profiles
                (tutor_id, bio, websites, mail_subscription, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (tutor_id) DO UPDATE SET
                bio = excluded.bio,
                websites = excluded.websites,
                mail_subscription = excluded.mail_subscription,
                updated_at = excluded.updated_at",
        )
        .bind(tutor_id)
        .bind(bio)
        .bind(websites)
        .bind(mail_subscription)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM tutor_courses WHERE tutor_id = ?")
            .bind(tutor_id)
            .execute(&mut *tx)
            .await?;
        for course_id in course_ids {
            sqlx::query(
                "INSERT INTO tutor_courses (tutor_id, course_id, created_at) VALUES (?, ?, ?)",
            )
            .bind(tutor_id)
            .bind(course_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Ordered {courseId, courseName} list for a student.
    pub async fn list_student_interests(&self, student_id: i64) -> AppResult<Vec<CourseRef>> {
        self.require_active(student_id, UserRole::Student).await?;

        let interests = sqlx::query_as::<_, CourseRef>(
            "SELECT c.id AS course_id, c.name AS course_name
             FROM student_interests si JOIN courses c ON c.id = si.course_id
             WHERE si.student_id = ? ORDER BY c.name",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(interests)
    }

    /// Joined profile for a user id: identity, ordered course list, feed
    /// history and, for tutors, the header attributes.
    pub async fn get_profile(&self, user_id: i64) -> AppResult<Profile> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, mobile_no, role,
                    email_verified, mobile_verified, active, created_at, updated_at
             FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".into()))?;

        let interests_table = match user.role {
            UserRole::Student => "student_interests",
            UserRole::Tutor => "tutor_courses",
            UserRole::Admin => {
                return Err(AppError::NotFound("Profile not found".into()));
            }
        };
        let id_column = match user.role {
            UserRole::Student => "student_id",
            _ => "tutor_id",
        };
        let sql = format!(
            "SELECT c.id AS course_id, c.name AS course_name
             FROM {table} x JOIN courses c ON c.id = x.course_id
             WHERE x.{id_column} = ? ORDER BY c.name",
            table = interests_table,
            id_column = id_column,
        );
        let interests = sqlx::query_as::<_, CourseRef>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let feeds = sqlx::query_as::<_, Feed>(
            "SELECT * FROM feeds WHERE author_id = ? ORDER BY id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        match user.role {
            UserRole::Student => Ok(Profile::Student(StudentProfile {
                student_id: user.id,
                name: user.display_name(),
                email: user.email,
                mobile_number: user.mobile_no,
                interests,
                feeds,
            })),
            UserRole::Tutor => {
                let header = sqlx::query_as::<_, (String, String, bool)>(
                    "SELECT bio, websites, mail_subscription FROM tutor_profiles
                     WHERE tutor_id = ?",
                )
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
                .unwrap_or_default();

                Ok(Profile::Tutor(TutorProfile {
                    tutor_id: user.id,
                    name: user.display_name(),
                    email: user.email,
                    mobile_number: user.mobile_no,
                    bio: header.0,
                    websites: header.1,
                    mail_subscription: header.2,
                    interests,
                    feeds,
                }))
            }
            UserRole::Admin => unreachable!("admin profiles rejected above"),
        }
    }

    /// Tutors sharing at least one course with the student, deduplicated and
    /// annotated with whether a request already exists for the pair.
    pub async fn list_tutors_for_student(&self, student_id: i64) -> AppResult<Vec<TutorSummary>> {
        self.require_active(student_id, UserRole::Student).await?;

        let tutors = sqlx::query_as::<_, TutorSummary>(
            "SELECT u.id AS tutor_id,
                    u.first_name || ' ' || u.last_name AS tutor_name,
                    COALESCE(tp.bio, '') AS bio,
                    COALESCE(tp.websites, '') AS websites,
                    GROUP_CONCAT(DISTINCT c.name) AS courses,
                    EXISTS (SELECT 1 FROM tutor_requests tr
                            WHERE tr.tutor_id = u.id AND tr.student_id = ?)
                        AS already_requested
             FROM tutor_courses tc
             JOIN users u ON u.id = tc.tutor_id AND u.active = TRUE
             LEFT JOIN tutor_profiles tp ON tp.tutor_id = u.id
             JOIN courses c ON c.id = tc.course_id
             WHERE tc.course_id IN
                (SELECT course_id FROM student_interests WHERE student_id = ?)
             GROUP BY u.id
             ORDER BY u.id",
        )
        .bind(student_id)
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tutors)
    }

    /// Record a student's request toward a tutor. At most one request per
    /// pair, hidden rows included in the dedup check.
    pub async fn send_request(&self, student_id: i64, tutor_id: i64) -> AppResult<()> {
        let student = self.require_active(student_id, UserRole::Student).await?;
        let tutor = self.require_active(tutor_id, UserRole::Tutor).await?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM tutor_requests WHERE tutor_id = ? AND student_id = ?",
        )
        .bind(tutor_id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Request already sent".into()));
        }

        sqlx::query(
            "INSERT INTO tutor_requests (tutor_id, student_id, hidden, created_at)
             VALUES (?, ?, FALSE, ?)",
        )
        .bind(tutor_id)
        .bind(student_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        log::info!("request sent: student {} -> tutor {}", student_id, tutor_id);
        // The request row is already committed; a notification hiccup must
        // not turn the response into an error.
        if let Err(e) = self.notify_tutor(&student, &tutor).await {
            log::warn!("failed to queue request email to tutor {}: {}", tutor_id, e);
        }
        Ok(())
    }

    /// Every request row for the tutor, hidden flag included, joined with the
    /// requesting student's identity and interests.
    pub async fn list_requests_for_tutor(&self, tutor_id: i64) -> AppResult<Vec<RequestSummary>> {
        self.require_active(tutor_id, UserRole::Tutor).await?;

        let requests = sqlx::query_as::<_, RequestSummary>(
            "SELECT tr.tutor_id,
                    tr.student_id,
                    u.first_name || ' ' || u.last_name AS name,
                    u.email,
                    u.mobile_no,
                    COALESCE((SELECT GROUP_CONCAT(c.name)
                              FROM student_interests si
                              JOIN courses c ON c.id = si.course_id
                              WHERE si.student_id = u.id), '') AS interests,
                    tr.hidden
             FROM tutor_requests tr
             JOIN users u ON u.id = tr.student_id
             WHERE tr.tutor_id = ?
             ORDER BY tr.id DESC",
        )
        .bind(tutor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Suppress a request from display without deleting it.
    pub async fn hide_request(&self, tutor_id: i64, student_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE tutor_requests SET hidden = TRUE WHERE tutor_id = ? AND student_id = ?",
        )
        .bind(tutor_id)
        .bind(student_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Request not found".into()));
        }
        Ok(())
    }

    async fn require_active(&self, user_id: i64, role: UserRole) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, mobile_no, role,
                    email_verified, mobile_verified, active, created_at, updated_at
             FROM users WHERE id = ? AND role = ? AND active = TRUE",
        )
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No active {} with this id", role)))
    }

    /// Best-effort mail to a subscribed tutor. Failures never surface.
    async fn notify_tutor(&self, student: &User, tutor: &User) -> AppResult<()> {
        let Some(mailer) = &self.mailer else {
            return Ok(());
        };

        let subscribed = sqlx::query_scalar::<_, bool>(
            "SELECT mail_subscription FROM tutor_profiles WHERE tutor_id = ?",
        )
        .bind(tutor.id)
        .fetch_optional(&self.pool)
        .await?
        .unwrap_or(false);
        if !subscribed {
            return Ok(());
        }

        let interests = sqlx::query_scalar::<_, Option<String>>(
            "SELECT GROUP_CONCAT(c.name)
             FROM student_interests si JOIN courses c ON c.id = si.course_id
             WHERE si.student_id = ?",
        )
        .bind(student.id)
        .fetch_one(&self.pool)
        .await?
        .unwrap_or_default();

        let mailer = mailer.clone();
        let tutor_email = tutor.email.clone();
        let student_name = student.display_name();
        let student_mail = student.email.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer
                .send_tutor_request(&tutor_email, &student_name, &student_mail, &interests)
                .await
            {
                log::warn!("failed to send request email to {}: {}", tutor_email, e);
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_user(pool: &SqlitePool, email: &str, role: UserRole, active: bool) -> i64 {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO users
                (first_name, last_name, email, password, mobile_no, role,
                 email_verified, mobile_verified, active, created_at, updated_at)
             VALUES (?, ?, ?, 'x', '9876543210', ?, ?, FALSE, ?, ?, ?)",
        )
        .bind(email.split('@').next().unwrap_or("user"))
        .bind("Test")
        .bind(email)
        .bind(role)
        .bind(active)
        .bind(active)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    async fn seed_course(pool: &SqlitePool, name: &str) -> i64 {
        let now = Utc::now();
        sqlx::query("INSERT INTO courses (name, active, created_at, updated_at) VALUES (?, TRUE, ?, ?)")
            .bind(name)
            .bind(now)
            .bind(now)
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    async fn interest_ids(pool: &SqlitePool, student_id: i64) -> Vec<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT course_id FROM student_interests WHERE student_id = ? ORDER BY course_id",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[sqlx::test]
    async fn test_interests_replace_wholesale(pool: SqlitePool) {
        let service = MatchingService::new(pool.clone(), None);
        let student = seed_user(&pool, "asha@example.com", UserRole::Student, true).await;
        let maths = seed_course(&pool, "Maths").await;
        let physics = seed_course(&pool, "Physics").await;
        let art = seed_course(&pool, "Art").await;

        service
            .set_student_interests(student, &[maths, physics])
            .await
            .unwrap();
        assert_eq!(interest_ids(&pool, student).await, vec![maths, physics]);

        service.set_student_interests(student, &[art]).await.unwrap();
        assert_eq!(interest_ids(&pool, student).await, vec![art]);
    }

    #[sqlx::test]
    async fn test_interests_reject_inactive_student(pool: SqlitePool) {
        let service = MatchingService::new(pool.clone(), None);
        let student = seed_user(&pool, "asha@example.com", UserRole::Student, false).await;
        let maths = seed_course(&pool, "Maths").await;

        let err = service
            .set_student_interests(student, &[maths])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[sqlx::test]
    async fn test_tutor_profile_replace_wholesale(pool: SqlitePool) {
        let service = MatchingService::new(pool.clone(), None);
        let tutor = seed_user(&pool, "ravi@example.com", UserRole::Tutor, true).await;
        let maths = seed_course(&pool, "Maths").await;
        let physics = seed_course(&pool, "Physics").await;

        service
            .set_tutor_profile(tutor, &[maths, physics], "bio one", "", false)
            .await
            .unwrap();
        service
            .set_tutor_profile(tutor, &[physics], "bio two", "https://ravi.example", true)
            .await
            .unwrap();

        let courses = sqlx::query_scalar::<_, i64>(
            "SELECT course_id FROM tutor_courses WHERE tutor_id = ?",
        )
        .bind(tutor)
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(courses, vec![physics]);

        let profile = service.get_profile(tutor).await.unwrap();
        match profile {
            Profile::Tutor(p) => {
                assert_eq!(p.bio, "bio two");
                assert!(p.mail_subscription);
                assert_eq!(p.interests.len(), 1);
                assert_eq!(p.interests[0].course_name, "Physics");
            }
            Profile::Student(_) => panic!("expected tutor profile"),
        }
    }

    #[sqlx::test]
    async fn test_student_profile_includes_interests_and_feeds(pool: SqlitePool) {
        let service = MatchingService::new(pool.clone(), None);
        let student = seed_user(&pool, "asha@example.com", UserRole::Student, true).await;
        let maths = seed_course(&pool, "Maths").await;
        service.set_student_interests(student, &[maths]).await.unwrap();

        sqlx::query(
            "INSERT INTO feeds (content, author_id, author_name, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind("hello wall")
        .bind(student)
        .bind("asha Test")
        .bind(Utc::now())
        .execute(&pool)
        .await
        .unwrap();

        match service.get_profile(student).await.unwrap() {
            Profile::Student(p) => {
                assert_eq!(p.interests.len(), 1);
                assert_eq!(p.feeds.len(), 1);
                assert_eq!(p.feeds[0].content, "hello wall");
            }
            Profile::Tutor(_) => panic!("expected student profile"),
        }
    }

    #[sqlx::test]
    async fn test_tutor_list_matches_shared_courses(pool: SqlitePool) {
        let service = MatchingService::new(pool.clone(), None);
        let student = seed_user(&pool, "asha@example.com", UserRole::Student, true).await;
        let maths_tutor = seed_user(&pool, "ravi@example.com", UserRole::Tutor, true).await;
        let art_tutor = seed_user(&pool, "mira@example.com", UserRole::Tutor, true).await;
        let maths = seed_course(&pool, "Maths").await;
        let art = seed_course(&pool, "Art").await;

        service.set_student_interests(student, &[maths]).await.unwrap();
        service
            .set_tutor_profile(maths_tutor, &[maths], "maths bio", "", false)
            .await
            .unwrap();
        service
            .set_tutor_profile(art_tutor, &[art], "art bio", "", false)
            .await
            .unwrap();

        let tutors = service.list_tutors_for_student(student).await.unwrap();
        assert_eq!(tutors.len(), 1);
        assert_eq!(tutors[0].tutor_id, maths_tutor);
        assert!(!tutors[0].already_requested);

        service.send_request(student, maths_tutor).await.unwrap();
        let tutors = service.list_tutors_for_student(student).await.unwrap();
        assert!(tutors[0].already_requested);
    }

    #[sqlx::test]
    async fn test_duplicate_request_conflicts_even_after_hide(pool: SqlitePool) {
        let service = MatchingService::new(pool.clone(), None);
        let student = seed_user(&pool, "asha@example.com", UserRole::Student, true).await;
        let tutor = seed_user(&pool, "ravi@example.com", UserRole::Tutor, true).await;

        service.send_request(student, tutor).await.unwrap();
        let err = service.send_request(student, tutor).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        service.hide_request(tutor, student).await.unwrap();
        let err = service.send_request(student, tutor).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // The hidden row is still reported to the tutor, flagged as hidden.
        let requests = service.list_requests_for_tutor(tutor).await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].hidden);

        // Hiding never deletes the underlying row.
        let row = sqlx::query_as::<_, crate::models::request::TutorRequest>(
            "SELECT * FROM tutor_requests WHERE tutor_id = ? AND student_id = ?",
        )
        .bind(tutor)
        .bind(student)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(row.hidden);
    }

    #[sqlx::test]
    async fn test_send_request_succeeds_when_notification_lookup_fails(pool: SqlitePool) {
        use crate::service::email::{EmailConfig, EmailService};
        use std::sync::Arc;

        let mailer = EmailService::new(EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: "test@example.com".to_string(),
            smtp_password: "password".to_string(),
            from_email: "noreply@example.com".to_string(),
            from_name: "Tutor Match".to_string(),
        })
        .unwrap();
        let service = MatchingService::new(pool.clone(), Some(Arc::new(mailer)));
        let student = seed_user(&pool, "asha@example.com", UserRole::Student, true).await;
        let tutor = seed_user(&pool, "ravi@example.com", UserRole::Tutor, true).await;

        // Break the subscription lookup after the request itself is safe.
        sqlx::query("DROP TABLE tutor_profiles")
            .execute(&pool)
            .await
            .unwrap();

        service.send_request(student, tutor).await.unwrap();

        let rows = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tutor_requests WHERE tutor_id = ? AND student_id = ?",
        )
        .bind(tutor)
        .bind(student)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(rows, 1);
    }

    #[sqlx::test]
    async fn test_hide_missing_request_not_found(pool: SqlitePool) {
        let service = MatchingService::new(pool.clone(), None);
        let err = service.hide_request(7, 9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[sqlx::test]
    async fn test_request_list_empty_is_valid(pool: SqlitePool) {
        let service = MatchingService::new(pool.clone(), None);
        let tutor = seed_user(&pool, "ravi@example.com", UserRole::Tutor, true).await;
        let requests = service.list_requests_for_tutor(tutor).await.unwrap();
        assert!(requests.is_empty());
    }
}
