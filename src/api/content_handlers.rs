//! Content Handlers
//!
//! Feeds, courses, policies and search endpoints.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use validator::Validate;

use crate::{
    database::Pagination,
    models::course::Course,
    models::feed::{Feed, Policy},
    models::profile::Profile,
    models::requests::*,
    models::search::SearchHit,
    service::FeedSort,
    utils::error::{handle_validation_error, AppResult, Envelope},
};

use super::handlers::{require_admin, AppState};
use super::middleware::AuthUser;

/// Post a feed entry to the wall
pub async fn create_feed(
    State(state): State<AppState>,
    Json(request): Json<CreateFeedRequest>,
) -> AppResult<Json<Envelope<Feed>>> {
    request.validate().map_err(handle_validation_error)?;

    let feed = state
        .feed_service
        .create_feed(&request.content, request.author_id, &request.author_name)
        .await?;
    Ok(Envelope::ok("Feed posted", feed))
}

/// List the wall with optional sort direction and pagination
pub async fn list_feeds(
    State(state): State<AppState>,
    Query(query): Query<FeedListQuery>,
) -> AppResult<Json<Envelope<Vec<Feed>>>> {
    let sort = FeedSort::parse(query.sort.as_deref());
    let feeds = state
        .feed_service
        .list_feeds(sort, Pagination::new(query.limit, query.offset))
        .await?;
    Ok(Envelope::ok("Feeds fetched", feeds))
}

/// Delete a feed entry by id
pub async fn delete_feed(
    State(state): State<AppState>,
    Path(feed_id): Path<i64>,
) -> AppResult<Json<Envelope<()>>> {
    state.feed_service.delete_feed(feed_id).await?;
    Ok(Envelope::message("Feed deleted"))
}

/// Role-shaped profile of a feed author
pub async fn get_feed_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Envelope<Profile>>> {
    let profile = state.matching_service.get_profile(user_id).await?;
    Ok(Envelope::ok("Author fetched", profile))
}

/// Add a course to the catalog
pub async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CreateCourseRequest>,
) -> AppResult<Json<Envelope<Course>>> {
    request.validate().map_err(handle_validation_error)?;

    let course = state.catalog_service.create_course(&request.course).await?;
    Ok(Envelope::ok("Course created", course))
}

/// Public list of active courses
pub async fn list_courses(
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<Vec<Course>>>> {
    let courses = state.catalog_service.list_active_courses().await?;
    Ok(Envelope::ok("Courses fetched", courses))
}

/// Admin-only policy creation
pub async fn create_policy(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(request): Json<CreatePolicyRequest>,
) -> AppResult<Json<Envelope<Policy>>> {
    require_admin(&claims)?;
    request.validate().map_err(handle_validation_error)?;

    let policy = state
        .policy_service
        .create_policy(&request.title, &request.content, claims.id)
        .await?;
    Ok(Envelope::ok("Policy created", policy))
}

pub async fn list_policies(
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<Vec<Policy>>>> {
    let policies = state.policy_service.list_policies().await?;
    Ok(Envelope::ok("Policies fetched", policies))
}

pub async fn delete_policy(
    State(state): State<AppState>,
    Path(policy_id): Path<i64>,
) -> AppResult<Json<Envelope<()>>> {
    state.policy_service.delete_policy(policy_id).await?;
    Ok(Envelope::message("Policy deleted"))
}

/// Cross-entity substring search
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Envelope<Vec<SearchHit>>>> {
    let hits = state.search_service.search(&query.value).await?;
    Ok(Envelope::ok("Search results", hits))
}
