//! Authentication Middleware
//!
//! Bearer token validation for the protected endpoint groups.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::service::{Claims, JwtService};
use crate::utils::error::AppError;

/// Extension type carrying the verified claims of the caller
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

/// Validates the `Authorization: Bearer` header and stores the claims in
/// request extensions.
///
/// A missing or malformed header is a 401; a token that fails signature
/// verification is a 403.
pub async fn auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing authorization token".into()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Authentication("Invalid authorization header format".into()))?;

    let claims = jwt_service.verify_token(token)?;
    request.extensions_mut().insert(AuthUser(claims));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use axum::{
        body::Body,
        http::{Method, Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    fn test_jwt_service() -> Arc<JwtService> {
        Arc::new(JwtService::new("middleware-test-secret-123".to_string()))
    }

    fn test_router(jwt_service: Arc<JwtService>) -> Router {
        Router::new()
            .route("/test", get(|| async { "OK" }))
            .layer(from_fn_with_state(jwt_service, auth_middleware))
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let app = test_router(test_jwt_service());
        let request = HttpRequest::builder()
            .method(Method::GET)
            .uri("/test")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_header_is_unauthorized() {
        let app = test_router(test_jwt_service());
        let request = HttpRequest::builder()
            .method(Method::GET)
            .uri("/test")
            .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_signature_is_forbidden() {
        let app = test_router(test_jwt_service());
        let other = JwtService::new("a-different-secret-456".to_string());
        let token = other
            .issue_token(&Claims {
                display_name: "Asha Iyer".to_string(),
                email: "asha@example.com".to_string(),
                id: 1,
                role: UserRole::Student,
            })
            .unwrap();

        let request = HttpRequest::builder()
            .method(Method::GET)
            .uri("/test")
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let jwt_service = test_jwt_service();
        let app = test_router(jwt_service.clone());
        let token = jwt_service
            .issue_token(&Claims {
                display_name: "Asha Iyer".to_string(),
                email: "asha@example.com".to_string(),
                id: 1,
                role: UserRole::Student,
            })
            .unwrap();

        let request = HttpRequest::builder()
            .method(Method::GET)
            .uri("/test")
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
