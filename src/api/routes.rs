//! API Route Definitions
//!
//! All HTTP routes, assembled through a builder so deployments can enable
//! endpoint groups selectively.

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};

use super::content_handlers::*;
use super::handlers::*;
use super::matching_handlers::*;
use super::middleware::auth_middleware;

/// Builder for creating API routes with configurable endpoint groups
///
/// Groups map to the feature areas of the service: the public auth flow,
/// the student and tutor workflows, the content surfaces and the admin
/// listing. Disabling a group drops its routes entirely.
#[derive(Default)]
pub struct RouterBuilder {
    /// Health check endpoint (GET /api/health)
    health_check: bool,
    /// Public user lifecycle: register, OTP, login, logout, deactivate
    auth: bool,
    /// Student workflow: interests, tutor list, requests
    student: bool,
    /// Tutor workflow: profile, incoming requests
    tutor: bool,
    /// Course catalog: public listing plus authenticated creation
    courses: bool,
    /// Feed wall endpoints
    feeds: bool,
    /// Policy document endpoints
    policies: bool,
    /// Cross-entity search endpoint
    search: bool,
    /// Admin user listing
    admin: bool,
}

impl RouterBuilder {
    /// Creates a builder with all groups disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with every endpoint group enabled
    pub fn with_all_routes() -> Self {
        Self {
            health_check: true,
            auth: true,
            student: true,
            tutor: true,
            courses: true,
            feeds: true,
            policies: true,
            search: true,
            admin: true,
        }
    }

    /// Creates a builder with only the public auth flow and course listing
    ///
    /// Suitable for a standalone registration/login service.
    pub fn with_auth_routes() -> Self {
        Self {
            health_check: true,
            auth: true,
            courses: true,
            ..Self::default()
        }
    }

    /// Creates a builder with only the health check enabled
    pub fn with_minimal_routes() -> Self {
        Self {
            health_check: true,
            ..Self::default()
        }
    }

    pub fn health_check(mut self, enabled: bool) -> Self {
        self.health_check = enabled;
        self
    }

    pub fn auth(mut self, enabled: bool) -> Self {
        self.auth = enabled;
        self
    }

    pub fn student(mut self, enabled: bool) -> Self {
        self.student = enabled;
        self
    }

    pub fn tutor(mut self, enabled: bool) -> Self {
        self.tutor = enabled;
        self
    }

    pub fn courses(mut self, enabled: bool) -> Self {
        self.courses = enabled;
        self
    }

    pub fn feeds(mut self, enabled: bool) -> Self {
        self.feeds = enabled;
        self
    }

    pub fn policies(mut self, enabled: bool) -> Self {
        self.policies = enabled;
        self
    }

    pub fn search(mut self, enabled: bool) -> Self {
        self.search = enabled;
        self
    }

    pub fn admin(mut self, enabled: bool) -> Self {
        self.admin = enabled;
        self
    }

    /// Builds the router, nesting everything under `/api`.
    ///
    /// Public routes are served as-is; the remaining groups sit behind the
    /// bearer-token middleware.
    pub fn build(self, state: AppState) -> Router {
        let mut public = Router::new();

        if self.health_check {
            public = public.route("/health", get(health_check));
        }

        if self.auth {
            public = public
                .route("/users", post(register_user))
                .route("/validate-otp", post(validate_otp))
                .route("/login", post(login))
                .route("/reset-password", post(reset_password))
                .route("/resend-otp", post(resend_otp))
                .route("/logout", post(logout))
                .route("/deactivate", post(deactivate_user));
        }

        if self.courses {
            public = public.route("/all-courses", get(list_courses));
        }

        let mut protected = Router::new();

        if self.student {
            protected = protected
                .route("/student/interest", post(set_student_interests))
                .route("/student/interest/{id}", get(get_student_interests))
                .route("/student/tutor-list/{id}", get(list_tutors_for_student))
                .route("/student/request", post(send_request));
        }

        if self.tutor {
            protected = protected
                .route("/tutor/profile", post(set_tutor_profile))
                .route("/tutor/profile/{id}", get(get_profile))
                .route("/tutor/request/{id}", get(list_requests_for_tutor))
                .route("/tutor/request-hide", post(hide_request));
        }

        if self.courses {
            protected = protected.route("/course", post(create_course));
        }

        if self.feeds {
            protected = protected
                .route("/feed", post(create_feed))
                .route("/feed", get(list_feeds))
                .route("/feed/{id}", delete(delete_feed))
                .route("/feed-user/{id}", get(get_feed_user));
        }

        if self.policies {
            protected = protected
                .route("/policy", post(create_policy))
                .route("/policy", get(list_policies))
                .route("/policy/{id}", delete(delete_policy));
        }

        if self.search {
            protected = protected.route("/search", get(search));
        }

        if self.admin {
            protected = protected.route("/internal/get-users/{type}", get(list_users));
        }

        let protected = protected.layer(from_fn_with_state(
            state.jwt_service.clone(),
            auth_middleware,
        ));

        Router::new()
            .nest("/api", public.merge(protected))
            .with_state(state)
    }
}


#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header::AUTHORIZATION, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use sqlx::SqlitePool;
    use tower::util::ServiceExt;

    use super::*;
    use crate::service::{
        CatalogService, FeedService, JwtService, MatchingService, PolicyService, SearchService,
        UserService,
    };

    fn app(pool: SqlitePool) -> Router {
        let jwt_service = Arc::new(JwtService::new("router-test-secret-123".to_string()));
        let state = AppState {
            user_service: Arc::new(UserService::new(
                pool.clone(),
                (*jwt_service).clone(),
                None,
            )),
            matching_service: Arc::new(MatchingService::new(pool.clone(), None)),
            catalog_service: Arc::new(CatalogService::new(pool.clone())),
            feed_service: Arc::new(FeedService::new(pool.clone())),
            policy_service: Arc::new(PolicyService::new(pool.clone())),
            search_service: Arc::new(SearchService::new(pool)),
            jwt_service,
        };
        RouterBuilder::with_all_routes().build(state)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn register_body(email: &str) -> serde_json::Value {
        serde_json::json!({
            "firstName": "Asha",
            "lastName": "Iyer",
            "email": email,
            "password": "secret1",
            "mobileNo": "9876543210",
            "type": "student"
        })
    }

    #[sqlx::test]
    async fn test_register_validate_login_over_http(pool: SqlitePool) {
        let app = app(pool.clone());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            None,
            Some(register_body("asha@example.com")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["statusCode"], 200);

        let pin = sqlx::query_scalar::<_, String>(
            "SELECT code FROM otp_codes WHERE email = ? ORDER BY id DESC LIMIT 1",
        )
        .bind("asha@example.com")
        .fetch_one(&pool)
        .await
        .unwrap();

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/validate-otp",
            None,
            Some(serde_json::json!({"email": "asha@example.com", "pin": pin})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(serde_json::json!({"email": "asha@example.com", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["token"].as_str().unwrap().to_string();
        assert!(!token.is_empty());

        // The token opens the protected surface.
        let (status, body) = send(&app, Method::GET, "/api/feed", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["statusCode"], 200);
    }

    #[sqlx::test]
    async fn test_duplicate_registration_conflict_envelope(pool: SqlitePool) {
        let app = app(pool);

        send(
            &app,
            Method::POST,
            "/api/users",
            None,
            Some(register_body("asha@example.com")),
        )
        .await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            None,
            Some(register_body("asha@example.com")),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["statusCode"], 409);
        assert_eq!(body["message"], "User already exists");
    }

    #[sqlx::test]
    async fn test_short_password_is_bad_request(pool: SqlitePool) {
        let app = app(pool);
        let mut body = register_body("asha@example.com");
        body["password"] = serde_json::json!("short");

        let (status, envelope) =
            send(&app, Method::POST, "/api/users", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope["statusCode"], 400);
    }

    #[sqlx::test]
    async fn test_missing_token_is_unauthorized(pool: SqlitePool) {
        let app = app(pool);
        let (status, body) = send(&app, Method::GET, "/api/feed", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["statusCode"], 401);
    }

    #[sqlx::test]
    async fn test_garbage_token_is_forbidden(pool: SqlitePool) {
        let app = app(pool);
        let (status, body) =
            send(&app, Method::GET, "/api/feed", Some("not-a-token"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["statusCode"], 403);
    }

    #[sqlx::test]
    async fn test_course_listing_is_public(pool: SqlitePool) {
        let app = app(pool);
        let (status, body) = send(&app, Method::GET, "/api/all-courses", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());
    }
}
