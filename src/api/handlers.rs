//! HTTP Request Handlers
//!
//! Axum handlers for the user lifecycle and the shared application state.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    database::Pagination,
    models::requests::*,
    models::user::{User, UserRole, UserSummary},
    service::{
        CatalogService, FeedService, JwtService, MatchingService, PolicyService, SearchService,
        UserService,
    },
    utils::error::{handle_validation_error, AppError, AppResult, Envelope},
    VERSION,
};

use super::middleware::AuthUser;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub matching_service: Arc<MatchingService>,
    pub catalog_service: Arc<CatalogService>,
    pub feed_service: Arc<FeedService>,
    pub policy_service: Arc<PolicyService>,
    pub search_service: Arc<SearchService>,
    pub jwt_service: Arc<JwtService>,
}

/// Register a new student or tutor account
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> AppResult<Json<Envelope<User>>> {
    request.validate().map_err(handle_validation_error)?;

    let user = state.user_service.register(request).await?;
    Ok(Envelope::ok(
        "User registered. An OTP has been sent to the email address",
        user,
    ))
}

/// Verify the emailed OTP and activate the account
pub async fn validate_otp(
    State(state): State<AppState>,
    Json(request): Json<ValidateOtpRequest>,
) -> AppResult<Json<Envelope<()>>> {
    request.validate().map_err(handle_validation_error)?;

    state
        .user_service
        .confirm_otp(&request.email, &request.pin)
        .await?;
    Ok(Envelope::message("Email verified successfully"))
}

/// Authenticate and open a session
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<Envelope<LoginResponse>>> {
    request.validate().map_err(handle_validation_error)?;

    let response = state.user_service.login(request).await?;
    Ok(Envelope::ok("Login successful", response))
}

/// Overwrite the password after OTP verification
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> AppResult<Json<Envelope<()>>> {
    request.validate().map_err(handle_validation_error)?;

    state
        .user_service
        .reset_password(&request.email, &request.pin, &request.password)
        .await?;
    Ok(Envelope::message("Password reset successfully"))
}

/// Issue and mail a fresh OTP
pub async fn resend_otp(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> AppResult<Json<Envelope<()>>> {
    request.validate().map_err(handle_validation_error)?;

    state.user_service.resend_otp(&request.email).await?;
    Ok(Envelope::message("OTP sent to the email address"))
}

/// Close the live session for the email
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> AppResult<Json<Envelope<()>>> {
    request.validate().map_err(handle_validation_error)?;

    state.user_service.logout(&request.email).await?;
    Ok(Envelope::message("Logged out successfully"))
}

/// Archive and purge the account
pub async fn deactivate_user(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> AppResult<Json<Envelope<()>>> {
    request.validate().map_err(handle_validation_error)?;

    state.user_service.deactivate(&request.email).await?;
    Ok(Envelope::message("Account deactivated"))
}

/// Admin listing of users by activity state
pub async fn list_users(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(user_type): Path<String>,
    axum::extract::Query(query): axum::extract::Query<UserListQuery>,
) -> AppResult<Json<Envelope<Vec<UserSummary>>>> {
    require_admin(&claims)?;

    let active = match user_type.as_str() {
        "active" => true,
        "inactive" => false,
        other => {
            return Err(AppError::Validation(format!(
                "Unknown user type '{}'",
                other
            )))
        }
    };

    let users = state
        .user_service
        .list_users(active, Pagination::new(query.limit, query.offset))
        .await?;
    Ok(Envelope::ok("Users fetched", users))
}

/// Health check endpoint
pub async fn health_check() -> AppResult<Json<Envelope<HealthCheckResponse>>> {
    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: VERSION.to_string(),
    };
    Ok(Envelope::ok("OK", response))
}

/// Role gate for admin-only endpoints
pub fn require_admin(claims: &crate::service::Claims) -> AppResult<()> {
    match claims.role {
        UserRole::Admin => Ok(()),
        UserRole::Student | UserRole::Tutor => {
            Err(AppError::Forbidden("Admin access required".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Claims;

    fn claims_for(role: UserRole) -> Claims {
        Claims {
            display_name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            id: 1,
            role,
        }
    }

    #[test]
    fn test_require_admin_gates_by_role() {
        assert!(require_admin(&claims_for(UserRole::Admin)).is_ok());
        assert!(require_admin(&claims_for(UserRole::Student)).is_err());
        assert!(require_admin(&claims_for(UserRole::Tutor)).is_err());
    }

    #[tokio::test]
    async fn test_health_check_reports_version() {
        let Json(envelope) = health_check().await.unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.status, "healthy");
        assert_eq!(data.version, VERSION);
    }
}
