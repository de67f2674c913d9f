//! Database Seeder
//!
//! Populates the course catalog and creates the admin account from the
//! ADMIN_EMAIL / ADMIN_PASSWORD environment variables. Safe to re-run.

use chrono::Utc;
use dotenv::dotenv;

use tutor_match::database::DatabaseConfig;
use tutor_match::models::user::UserRole;
use tutor_match::utils::security::hash_password;
use tutor_match::utils::validation::normalize_email;
use tutor_match::AppError;

const COURSES: &[&str] = &[
    "Programming Language-Java",
    "Programming Language-Python",
    "Programming Language-C/C++",
    "Programming Language-Javascript",
    "Fullstack Web Development",
    "Fullstack Mobile Development",
    "Database-Postgresql",
    "Database-MySQL",
    "Database-Oracle PL/SQL",
    "NoSQL-MongoDB",
    "MERN stack",
    "MEAN stack",
    "Data Structures and Algorithms",
    "Mathematics-Statitics and Probability",
    "Data Science with Python",
    "Data Science with R",
    "Data Analysis",
    "Big Data",
    "Mechanical Engineering",
    "Chemical Engineering",
    "Electrical and Electronics Engineering",
    "Electronics and Communication Engineering",
    "Biotechnology",
    "Bioengineering",
    "Physics",
    "Chemistry",
    "Mathematics",
    "Biology",
    "English-Grammar and Vocabulary",
    "English",
    "Tamil",
    "Hindi",
    "Sanskrit",
    "History",
    "Geography",
    "Politics",
    "Ethics",
    "Moral Science",
    "General Knowledge",
    "Physical Training",
    "Yoga and Meditation",
    "Spiritual session",
    "Civil Service",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let admin_email = std::env::var("ADMIN_EMAIL")
        .map_err(|_| AppError::Configuration("ADMIN_EMAIL environment variable is required".into()))?;
    let admin_password = std::env::var("ADMIN_PASSWORD").map_err(|_| {
        AppError::Configuration("ADMIN_PASSWORD environment variable is required".into())
    })?;

    let pool = DatabaseConfig::from_env()?.create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let now = Utc::now();
    let mut inserted = 0;
    for name in COURSES {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO courses (name, active, created_at, updated_at)
             VALUES (?, TRUE, ?, ?)",
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(&pool)
        .await?;
        inserted += result.rows_affected();
    }
    log::info!("seeded {} of {} courses", inserted, COURSES.len());

    let admin_email = normalize_email(&admin_email);
    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
        .bind(&admin_email)
        .fetch_optional(&pool)
        .await?;
    if existing.is_some() {
        log::info!("admin user already present, skipping");
        return Ok(());
    }

    let password_hash = hash_password(&admin_password)?;
    sqlx::query(
        "INSERT INTO users
            (first_name, last_name, email, password, mobile_no, role,
             email_verified, mobile_verified, active, created_at, updated_at)
         VALUES ('admin', '001', ?, ?, '0000000000', ?, TRUE, TRUE, TRUE, ?, ?)",
    )
    .bind(&admin_email)
    .bind(&password_hash)
    .bind(UserRole::Admin)
    .bind(now)
    .bind(now)
    .execute(&pool)
    .await?;

    log::info!("admin user created: {}", admin_email);
    Ok(())
}
