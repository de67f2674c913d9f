//! User Lifecycle Service
//!
//! Registration, OTP confirmation, login sessions, password reset and
//! account deactivation.

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::database::Pagination;
use crate::models::requests::{LoginRequest, LoginResponse, RegisterUserRequest};
use crate::models::user::{User, UserRole, UserSummary, UserWithPassword};
use crate::service::email::EmailService;
use crate::service::jwt::{Claims, JwtService};
use crate::service::otp::{OtpOutcome, OtpService};
use crate::utils::error::AppError;
use crate::utils::security::{generate_otp_pin, hash_password, verify_password};
use crate::utils::validation::normalize_email;

/// Errors the user lifecycle can produce, mapped onto the wire taxonomy
/// by the `From<UserServiceError> for AppError` impl below.
#[derive(Error, Debug)]
pub enum UserServiceError {
    #[error("User already exists")]
    AlreadyExists,

    #[error("User not registered")]
    NotRegistered,

    #[error("User not found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidOtp(String),

    #[error("No active session found")]
    NoActiveSession,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Hashing(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<UserServiceError> for AppError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::AlreadyExists => AppError::Conflict("User already exists".into()),
            UserServiceError::NotRegistered => AppError::NotFound("User not registered".into()),
            UserServiceError::NotFound => AppError::NotFound("User not found".into()),
            UserServiceError::InvalidCredentials => {
                AppError::Authentication("Invalid credentials".into())
            }
            UserServiceError::InvalidOtp(msg) => AppError::Validation(msg),
            UserServiceError::NoActiveSession => {
                AppError::NotFound("No active session found".into())
            }
            UserServiceError::Database(e) => AppError::Database(e),
            UserServiceError::Hashing(e) => AppError::HashingError(e),
            UserServiceError::App(e) => e,
        }
    }
}

type UserResult<T> = Result<T, UserServiceError>;

/// Registration, authentication and account management
pub struct UserService {
    pool: SqlitePool,
    jwt: JwtService,
    otp: OtpService,
    mailer: Option<Arc<EmailService>>,
}

impl UserService {
    pub fn new(pool: SqlitePool, jwt: JwtService, mailer: Option<Arc<EmailService>>) -> Self {
        let otp = OtpService::new(pool.clone());
        Self {
            pool,
            jwt,
            otp,
            mailer,
        }
    }

    /// Create an unverified, inactive account and issue its first OTP.
    ///
    /// The user row and the OTP row land in one transaction; the mail is
    /// dispatched best-effort afterwards.
    pub async fn register(&self, request: RegisterUserRequest) -> UserResult<User> {
        let email = normalize_email(&request.email);

        let password_hash = hash_password(&request.password)?;
        let now = Utc::now();
        let pin = generate_otp_pin();

        let mut tx = self.pool.begin().await?;

        // The email unique constraint is the single dedup authority; a
        // pre-check SELECT would still race with concurrent registrations.
        let inserted = sqlx::query(
            "INSERT INTO users
                (first_name, last_name, email, password, mobile_no, role,
                 email_verified, mobile_verified, active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, FALSE, FALSE, FALSE, ?, ?)",
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&email)
        .bind(&password_hash)
        .bind(&request.mobile_no)
        .bind(request.role)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await;

        let user_id = match inserted {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(UserServiceError::AlreadyExists);
            }
            Err(e) => return Err(e.into()),
        };

        sqlx::query("INSERT INTO otp_codes (email, code, created_at) VALUES (?, ?, ?)")
            .bind(&email)
            .bind(&pin)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        log::info!("registered user {} ({})", user_id, email);
        self.notify_otp(&email, &pin, false);

        Ok(User {
            id: user_id,
            first_name: request.first_name,
            last_name: request.last_name,
            email,
            mobile_no: request.mobile_no,
            role: request.role,
            email_verified: false,
            mobile_verified: false,
            active: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Verify the newest OTP for the email; success activates the account.
    pub async fn confirm_otp(&self, email: &str, pin: &str) -> UserResult<()> {
        let email = normalize_email(email);
        self.require_user(&email).await?;

        match self.otp.validate(&email, pin).await? {
            OtpOutcome::Valid => {}
            OtpOutcome::NotFound => {
                return Err(UserServiceError::InvalidOtp(
                    "No OTP issued for this email".into(),
                ))
            }
            OtpOutcome::Mismatch => {
                return Err(UserServiceError::InvalidOtp("Incorrect OTP".into()))
            }
        }

        sqlx::query(
            "UPDATE users SET email_verified = TRUE, active = TRUE, updated_at = ?
             WHERE email = ?",
        )
        .bind(Utc::now())
        .bind(&email)
        .execute(&self.pool)
        .await?;

        log::info!("email verified for {}", email);
        Ok(())
    }

    /// Authenticate and open a fresh session, replacing any prior one.
    pub async fn login(&self, request: LoginRequest) -> UserResult<LoginResponse> {
        let email = normalize_email(&request.email);

        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT * FROM users WHERE email = ? AND active = TRUE",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(UserServiceError::NotRegistered)?;

        if !verify_password(&request.password, &user.password)? {
            return Err(UserServiceError::InvalidCredentials);
        }

        let user: User = user.into();
        let token = self.jwt.issue_token(&Claims::for_user(&user))?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM sessions WHERE email = ?")
            .bind(&email)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO sessions (email, token, logged_in_at) VALUES (?, ?, ?)")
            .bind(&email)
            .bind(&token)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        log::info!("login for {}", email);
        Ok(LoginResponse { token })
    }

    /// Overwrite the password after checking the newest OTP for the email.
    pub async fn reset_password(&self, email: &str, pin: &str, password: &str) -> UserResult<()> {
        let email = normalize_email(email);
        self.require_user(&email).await?;

        match self.otp.validate(&email, pin).await? {
            OtpOutcome::Valid => {}
            OtpOutcome::NotFound => {
                return Err(UserServiceError::InvalidOtp(
                    "No OTP issued for this email".into(),
                ))
            }
            OtpOutcome::Mismatch => {
                return Err(UserServiceError::InvalidOtp("Incorrect OTP".into()))
            }
        }

        let password_hash = hash_password(password)?;
        sqlx::query("UPDATE users SET password = ?, updated_at = ? WHERE email = ?")
            .bind(&password_hash)
            .bind(Utc::now())
            .bind(&email)
            .execute(&self.pool)
            .await?;

        log::info!("password reset for {}", email);
        Ok(())
    }

    /// Issue a fresh OTP and re-send the verification mail.
    pub async fn resend_otp(&self, email: &str) -> UserResult<()> {
        let email = normalize_email(email);
        self.require_user(&email).await?;

        let pin = self.otp.issue(&email).await?;
        self.notify_otp(&email, &pin, true);
        Ok(())
    }

    /// Stamp the live session as logged out.
    pub async fn logout(&self, email: &str) -> UserResult<()> {
        let email = normalize_email(email);

        let result = sqlx::query(
            "UPDATE sessions SET logged_out_at = ?
             WHERE email = ? AND logged_out_at IS NULL",
        )
        .bind(Utc::now())
        .bind(&email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(UserServiceError::NoActiveSession);
        }
        Ok(())
    }

    /// Archive the account into `deactivated_users`, then purge its rows.
    ///
    /// The snapshot, the role-specific purges and the user delete all land
    /// in one transaction.
    pub async fn deactivate(&self, email: &str) -> UserResult<()> {
        let email = normalize_email(email);
        let user = self.require_user(&email).await?;

        let now = Utc::now();
        let usage_days = (now - user.created_at).num_days();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO deactivated_users
                (user_id, first_name, last_name, email, mobile_no, role,
                 created_at, deactivated_on, usage_days)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.mobile_no)
        .bind(user.role)
        .bind(user.created_at)
        .bind(now)
        .bind(usage_days)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM feeds WHERE author_id = ?")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM otp_codes WHERE email = ?")
            .bind(&email)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM sessions WHERE email = ?")
            .bind(&email)
            .execute(&mut *tx)
            .await?;

        match user.role {
            UserRole::Student => {
                sqlx::query("DELETE FROM student_interests WHERE student_id = ?")
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await?;
                sqlx::query("DELETE FROM tutor_requests WHERE student_id = ?")
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await?;
            }
            UserRole::Tutor => {
                sqlx::query("DELETE FROM tutor_courses WHERE tutor_id = ?")
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await?;
                sqlx::query("DELETE FROM tutor_profiles WHERE tutor_id = ?")
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await?;
                sqlx::query("DELETE FROM tutor_requests WHERE tutor_id = ?")
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await?;
            }
            UserRole::Admin => {}
        }

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        log::info!(
            "deactivated user {} ({}) after {} days",
            user.id,
            email,
            usage_days
        );
        Ok(())
    }

    /// Admin listing of users filtered by the active flag.
    pub async fn list_users(
        &self,
        active: bool,
        pagination: Pagination,
    ) -> UserResult<Vec<UserSummary>> {
        let sql = format!(
            "SELECT id, first_name, last_name, email, mobile_no, role, active, created_at
             FROM users WHERE active = ? ORDER BY id{}",
            pagination.sql_suffix()
        );
        let users = sqlx::query_as::<_, UserSummary>(&sql)
            .bind(active)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn require_user(&self, email: &str) -> UserResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, mobile_no, role,
                    email_verified, mobile_verified, active, created_at, updated_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(UserServiceError::NotFound)
    }

    /// Fire-and-forget OTP mail; failures are logged, never surfaced.
    fn notify_otp(&self, email: &str, pin: &str, resend: bool) {
        if let Some(mailer) = &self.mailer {
            let mailer = mailer.clone();
            let email = email.to_string();
            let pin = pin.to_string();
            tokio::spawn(async move {
                if let Err(e) = mailer.send_registration_otp(&email, &pin, resend).await {
                    log::warn!("failed to send OTP email to {}: {}", email, e);
                }
            });
        }
    }
}
