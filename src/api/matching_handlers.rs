//! Matching Handlers
//!
//! Student interest, tutor profile and request-workflow endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::{
    models::course::CourseRef,
    models::profile::Profile,
    models::request::{RequestSummary, TutorSummary},
    models::requests::*,
    utils::error::{handle_validation_error, AppResult, Envelope},
};

use super::handlers::AppState;

/// Replace a student's interest set
pub async fn set_student_interests(
    State(state): State<AppState>,
    Json(request): Json<StudentInterestRequest>,
) -> AppResult<Json<Envelope<()>>> {
    request.validate().map_err(handle_validation_error)?;

    state
        .matching_service
        .set_student_interests(request.student_id, &request.course_ids)
        .await?;
    Ok(Envelope::message("Interests updated"))
}

/// List a student's interests
pub async fn get_student_interests(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> AppResult<Json<Envelope<Vec<CourseRef>>>> {
    let interests = state
        .matching_service
        .list_student_interests(student_id)
        .await?;
    Ok(Envelope::ok("Interests fetched", interests))
}

/// Tutors sharing at least one course with the student
pub async fn list_tutors_for_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> AppResult<Json<Envelope<Vec<TutorSummary>>>> {
    let tutors = state
        .matching_service
        .list_tutors_for_student(student_id)
        .await?;
    Ok(Envelope::ok("Tutors fetched", tutors))
}

/// Send a request from a student to a tutor
pub async fn send_request(
    State(state): State<AppState>,
    Json(request): Json<SendRequestRequest>,
) -> AppResult<Json<Envelope<()>>> {
    request.validate().map_err(handle_validation_error)?;

    state
        .matching_service
        .send_request(request.student_id, request.tutor_id)
        .await?;
    Ok(Envelope::message("Request sent"))
}

/// Replace a tutor's profile and course set
pub async fn set_tutor_profile(
    State(state): State<AppState>,
    Json(request): Json<TutorProfileRequest>,
) -> AppResult<Json<Envelope<()>>> {
    request.validate().map_err(handle_validation_error)?;

    state
        .matching_service
        .set_tutor_profile(
            request.tutor_id,
            &request.course_ids,
            &request.bio,
            &request.websites,
            request.mail_subscription,
        )
        .await?;
    Ok(Envelope::message("Profile updated"))
}

/// Joined profile for any student or tutor id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Envelope<Profile>>> {
    let profile = state.matching_service.get_profile(user_id).await?;
    Ok(Envelope::ok("Profile fetched", profile))
}

/// All requests addressed to a tutor, hidden rows included
pub async fn list_requests_for_tutor(
    State(state): State<AppState>,
    Path(tutor_id): Path<i64>,
) -> AppResult<Json<Envelope<Vec<RequestSummary>>>> {
    let requests = state
        .matching_service
        .list_requests_for_tutor(tutor_id)
        .await?;
    Ok(Envelope::ok("Requests fetched", requests))
}

/// Suppress a request from the tutor's list
pub async fn hide_request(
    State(state): State<AppState>,
    Json(request): Json<HideRequestRequest>,
) -> AppResult<Json<Envelope<()>>> {
    request.validate().map_err(handle_validation_error)?;

    state
        .matching_service
        .hide_request(request.tutor_id, request.student_id)
        .await?;
    Ok(Envelope::message("Request hidden"))
}
