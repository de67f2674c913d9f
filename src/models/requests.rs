//! Request and Response Models
//!
//! Data structures for API request and response payloads with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserRole;
use crate::utils::validation::{email_validator, mobile_validator, pin_validator};

/// Request payload for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, message = "firstName is mandatory"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "lastName is mandatory"))]
    pub last_name: String,

    #[validate(custom(function = "email_validator"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(custom(function = "mobile_validator"))]
    pub mobile_no: String,

    /// Role of the account being created
    #[serde(rename = "type")]
    pub role: UserRole,
}

/// Request payload for OTP validation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ValidateOtpRequest {
    #[validate(custom(function = "email_validator"))]
    pub email: String,

    #[validate(custom(function = "pin_validator"))]
    pub pin: String,
}

/// Request payload for login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "email_validator"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Request payload for password reset; requires a previously issued OTP
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(custom(function = "email_validator"))]
    pub email: String,

    #[validate(custom(function = "pin_validator"))]
    pub pin: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Request payload carrying only an email address (resend-otp, logout,
/// deactivate)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(custom(function = "email_validator"))]
    pub email: String,
}

/// Request payload for replacing a student's interest set
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentInterestRequest {
    pub student_id: i64,

    #[validate(length(min = 1, message = "courseIds must not be empty"))]
    pub course_ids: Vec<i64>,
}

/// Request payload for replacing a tutor's profile
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TutorProfileRequest {
    pub tutor_id: i64,

    #[validate(length(min = 1, message = "courseIds must not be empty"))]
    pub course_ids: Vec<i64>,

    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub websites: String,

    #[serde(default)]
    pub mail_subscription: bool,
}

/// Request payload for sending a tutor request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestRequest {
    pub student_id: i64,
    pub tutor_id: i64,
}

/// Request payload for hiding a tutor request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HideRequestRequest {
    pub tutor_id: i64,
    pub student_id: i64,
}

/// Request payload for posting a feed
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedRequest {
    #[validate(length(min = 1, message = "content is mandatory"))]
    pub content: String,

    pub author_id: i64,

    #[validate(length(min = 1, message = "authorName is mandatory"))]
    pub author_name: String,
}

/// Request payload for creating a course
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "course is mandatory"))]
    pub course: String,
}

/// Request payload for creating a policy (admin only)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePolicyRequest {
    #[validate(length(min = 1, message = "title is mandatory"))]
    pub title: String,

    #[validate(length(min = 1, message = "content is mandatory"))]
    pub content: String,
}

/// Query parameters for feed listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedListQuery {
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the admin user listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for global search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub value: String,
}

/// Response payload for a successful login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
}

/// Response payload for health checks
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}
