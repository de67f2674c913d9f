//! Tutor Match Library
//!
//! A tutor/student matchmaking backend: registration with OTP email
//! verification, login sessions, student interests, tutor profiles, a
//! request workflow between students and tutors, a social feed wall,
//! course catalog and policy management, and a naive cross-entity search.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tutor_match::{
//!     api::{AppState, RouterBuilder},
//!     database::DatabaseConfig,
//!     service::{
//!         CatalogService, FeedService, JwtService, MatchingService, PolicyService,
//!         SearchService, UserService,
//!     },
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = DatabaseConfig::from_env()?.create_pool().await?;
//!     sqlx::migrate!("./migrations").run(&pool).await?;
//!
//!     let jwt_service = Arc::new(JwtService::new("access_secret".to_string()));
//!     let state = AppState {
//!         user_service: Arc::new(UserService::new(pool.clone(), (*jwt_service).clone(), None)),
//!         matching_service: Arc::new(MatchingService::new(pool.clone(), None)),
//!         catalog_service: Arc::new(CatalogService::new(pool.clone())),
//!         feed_service: Arc::new(FeedService::new(pool.clone())),
//!         policy_service: Arc::new(PolicyService::new(pool.clone())),
//!         search_service: Arc::new(SearchService::new(pool)),
//!         jwt_service,
//!     };
//!
//!     let app = RouterBuilder::with_all_routes().build(state);
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **API Layer**: HTTP handlers, bearer-token middleware and configurable
//!   route groups
//! - **Service Layer**: user lifecycle, matching, catalog, feeds, policies,
//!   search, OTP and mail dispatch
//! - **Models**: data structures and request/response payloads
//! - **Database**: SQLite pooling, migrations and pagination helpers
//! - **Utils**: errors, the response envelope, password hashing, validation

/// HTTP API layer with handlers and configurable routing
pub mod api;

/// Configuration management for all service settings
pub mod config;

/// Database connection management and configuration
pub mod database;

/// Data models and request/response structures
pub mod models;

/// Business logic services
pub mod service;

/// Shared utilities for security, validation, and error handling
pub mod utils;

// Re-export commonly used types for convenient access
pub use api::{AppState, AuthUser, RouterBuilder};
pub use models::{
    course::{Course, CourseRef},
    feed::{Feed, Policy},
    profile::{Profile, StudentProfile, TutorProfile},
    request::{RequestSummary, TutorRequest, TutorSummary},
    requests::{
        CreateCourseRequest, CreateFeedRequest, CreatePolicyRequest, EmailRequest,
        HideRequestRequest, LoginRequest, LoginResponse, RegisterUserRequest,
        ResetPasswordRequest, SendRequestRequest, StudentInterestRequest, TutorProfileRequest,
        ValidateOtpRequest,
    },
    search::{SearchHit, SearchOrigin},
    user::{User, UserRole},
};
pub use service::{
    CatalogService, Claims, EmailConfig, EmailService, FeedService, JwtService, MatchingService,
    OtpService, PolicyService, SearchService, UserService,
};
pub use utils::error::{AppError, AppResult, Envelope};

pub use database::{DatabaseConfig, DatabasePool, Pagination};

pub use config::{env, AppConfig, JwtConfig, ServerConfig};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
