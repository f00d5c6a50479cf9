/// Project endpoints
///
/// CRUD over projects, every operation scoped to the authenticated owner.
/// A project that exists but belongs to someone else is reported exactly
/// like one that doesn't exist (404).
///
/// # Endpoints
///
/// - `GET /api/projects` - List projects owned by the caller
/// - `POST /api/projects` - Create a project (caller becomes owner)
/// - `GET /api/projects/:id` - Fetch one owned project
/// - `PUT /api/projects/:id` - Replace name/description (full replace)
/// - `DELETE /api/projects/:id` - Delete the project and all of its issues

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, AppJson},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{identity::CurrentUser, policy},
    models::project::{CreateProject, Project, UpdateProject},
};
use validator::Validate;

/// Create/update request body for a project
///
/// PUT uses full-replace semantics, so the same shape serves both: an
/// omitted description on update clears the stored one.
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

/// Project response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectBody {
    /// Project ID
    pub id: i64,

    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning user ID
    pub owner_id: i64,
}

impl From<Project> for ProjectBody {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            owner_id: project.owner_id,
        }
    }
}

/// Message-only response for deletions
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Create a new project
///
/// The authenticated caller becomes the owner.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Missing or invalid token
pub async fn create_project(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    AppJson(req): AppJson<ProjectRequest>,
) -> ApiResult<Json<ProjectBody>> {
    req.validate()?;

    let project = Project::create(
        &state.db,
        CreateProject {
            name: req.name,
            description: req.description,
            owner_id: user.id,
        },
    )
    .await?;

    Ok(Json(project.into()))
}

/// List all projects owned by the caller
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<ProjectBody>>> {
    let projects = Project::list_by_owner(&state.db, user.id).await?;

    Ok(Json(projects.into_iter().map(ProjectBody::from).collect()))
}

/// Fetch a single project
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Absent, or owned by another user
pub async fn get_project(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ProjectBody>> {
    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    policy::authorize_project(&user, &project)?;

    Ok(Json(project.into()))
}

/// Replace a project's name and description
///
/// Full-replace semantics: both mutable fields are overwritten atomically.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Absent, or owned by another user
pub async fn update_project(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<ProjectRequest>,
) -> ApiResult<Json<ProjectBody>> {
    req.validate()?;

    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    policy::authorize_project(&user, &project)?;

    let updated = Project::update(
        &state.db,
        id,
        UpdateProject {
            name: req.name,
            description: req.description,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// Delete a project
///
/// All issues belonging to the project are removed in the same atomic
/// operation; a project can never be deleted leaving orphaned issues.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Absent, or owned by another user
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    policy::authorize_project(&user, &project)?;

    Project::delete(&state.db, id).await?;

    Ok(Json(MessageResponse {
        message: "Project deleted successfully".to_string(),
    }))
}
