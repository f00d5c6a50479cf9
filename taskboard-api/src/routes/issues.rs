/// Issue endpoints
///
/// CRUD and status transitions for issues. Access is always scoped through
/// the parent project's owner: creating an issue requires owning the target
/// project, and reading/updating/deleting one requires owning its parent.
/// Non-owned and nonexistent issues are indistinguishable on the wire (404).
///
/// Status and priority arrive as strings and are checked against the fixed
/// vocabularies ("To Do"/"In Progress"/"Done", "Low"/"Medium"/"High"); an
/// unknown value is a field-level validation error.
///
/// # Endpoints
///
/// - `POST /api/issues` - Create an issue under an owned project
/// - `GET /api/issues/project/:project_id` - List a project's issues
/// - `GET /api/issues/:id` - Fetch one issue
/// - `PUT /api/issues/:id` - Replace all mutable fields (full replace)
/// - `PATCH /api/issues/:id/status` - Update only the status (drag-and-drop)
/// - `DELETE /api/issues/:id` - Delete an issue

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, AppJson, ValidationErrorDetail},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{identity::CurrentUser, policy},
    models::{
        issue::{CreateIssue, Issue, IssuePriority, IssueStatus, UpdateIssue},
        project::Project,
    },
};
use validator::Validate;

use super::projects::MessageResponse;

/// Create/update request body for an issue
///
/// PUT uses full-replace semantics over all mutable fields; `project_id` is
/// only meaningful on create and immutable afterwards.
#[derive(Debug, Deserialize, Validate)]
pub struct IssueRequest {
    /// Issue title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Status ("To Do", "In Progress", "Done")
    pub status: String,

    /// Priority ("Low", "Medium", "High")
    pub priority: String,

    /// Optional assignee (any registered user)
    pub assignee_id: Option<i64>,

    /// Parent project (create only)
    pub project_id: i64,
}

/// Status-only patch body
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    /// New status ("To Do", "In Progress", "Done")
    pub status: String,
}

/// Issue response body
#[derive(Debug, Serialize, Deserialize)]
pub struct IssueBody {
    /// Issue ID
    pub id: i64,

    /// Issue title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Workflow status
    pub status: IssueStatus,

    /// Priority level
    pub priority: IssuePriority,

    /// Optional assignee ID
    pub assignee_id: Option<i64>,

    /// Parent project ID
    pub project_id: i64,
}

impl From<Issue> for IssueBody {
    fn from(issue: Issue) -> Self {
        Self {
            id: issue.id,
            title: issue.title,
            description: issue.description,
            status: issue.status,
            priority: issue.priority,
            assignee_id: issue.assignee_id,
            project_id: issue.project_id,
        }
    }
}

/// Parses a status string, reporting failures as field-level validation errors
fn parse_status(value: &str) -> Result<IssueStatus, ApiError> {
    value.parse().map_err(|message| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "status".to_string(),
            message,
        }])
    })
}

/// Parses a priority string, reporting failures as field-level validation errors
fn parse_priority(value: &str) -> Result<IssuePriority, ApiError> {
    value.parse().map_err(|message| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "priority".to_string(),
            message,
        }])
    })
}

/// Create a new issue
///
/// The declared `project_id` must resolve to a project owned by the caller
/// before anything is persisted; an issue can never be attached to someone
/// else's project.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Project absent, or owned by another user
pub async fn create_issue(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    AppJson(req): AppJson<IssueRequest>,
) -> ApiResult<Json<IssueBody>> {
    req.validate()?;
    let status = parse_status(&req.status)?;
    let priority = parse_priority(&req.priority)?;

    let project = Project::find_by_id(&state.db, req.project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    policy::authorize_project(&user, &project)?;

    let issue = Issue::create(
        &state.db,
        CreateIssue {
            title: req.title,
            description: req.description,
            status,
            priority,
            assignee_id: req.assignee_id,
            project_id: req.project_id,
        },
    )
    .await?;

    Ok(Json(issue.into()))
}

/// List all issues of a project
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Project absent, or owned by another user
pub async fn list_issues_by_project(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<Vec<IssueBody>>> {
    let project = Project::find_by_id(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    policy::authorize_project(&user, &project)?;

    let issues = Issue::list_by_project(&state.db, project_id).await?;

    Ok(Json(issues.into_iter().map(IssueBody::from).collect()))
}

/// Fetch a single issue
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Absent, or parent project owned by another user
pub async fn get_issue(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<IssueBody>> {
    let issue = Issue::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Issue not found".to_string()))?;

    policy::authorize_issue(&state.db, &user, &issue).await?;

    Ok(Json(issue.into()))
}

/// Replace an issue's mutable fields
///
/// Full-replace semantics: title, description, status, priority, and
/// assignee are all overwritten atomically. `project_id` cannot be changed.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Absent, or parent project owned by another user
pub async fn update_issue(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<IssueRequest>,
) -> ApiResult<Json<IssueBody>> {
    req.validate()?;
    let status = parse_status(&req.status)?;
    let priority = parse_priority(&req.priority)?;

    let issue = Issue::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Issue not found".to_string()))?;

    policy::authorize_issue(&state.db, &user, &issue).await?;

    let updated = Issue::update(
        &state.db,
        id,
        UpdateIssue {
            title: req.title,
            description: req.description,
            status,
            priority,
            assignee_id: req.assignee_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Issue not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// Update only the status of an issue
///
/// Narrow merge used for drag-and-drop style Kanban transitions; all other
/// fields are left untouched.
///
/// # Errors
///
/// - `400 Bad Request`: Unknown status value
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Absent, or parent project owned by another user
pub async fn update_issue_status(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<StatusRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let status = parse_status(&req.status)?;

    let issue = Issue::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Issue not found".to_string()))?;

    policy::authorize_issue(&state.db, &user, &issue).await?;

    Issue::update_status(&state.db, id, status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Issue not found".to_string()))?;

    Ok(Json(MessageResponse {
        message: "Issue status updated successfully".to_string(),
    }))
}

/// Delete an issue
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Absent, or parent project owned by another user
pub async fn delete_issue(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let issue = Issue::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Issue not found".to_string()))?;

    policy::authorize_issue(&state.db, &user, &issue).await?;

    Issue::delete(&state.db, id).await?;

    Ok(Json(MessageResponse {
        message: "Issue deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_known_values() {
        assert_eq!(parse_status("To Do").unwrap(), IssueStatus::ToDo);
        assert_eq!(parse_status("In Progress").unwrap(), IssueStatus::InProgress);
        assert_eq!(parse_status("Done").unwrap(), IssueStatus::Done);
    }

    #[test]
    fn test_parse_status_unknown_value_is_field_error() {
        let err = parse_status("Blocked").unwrap_err();
        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "status");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_priority_known_values() {
        assert_eq!(parse_priority("Low").unwrap(), IssuePriority::Low);
        assert_eq!(parse_priority("Medium").unwrap(), IssuePriority::Medium);
        assert_eq!(parse_priority("High").unwrap(), IssuePriority::High);
    }

    #[test]
    fn test_parse_priority_unknown_value_is_field_error() {
        let err = parse_priority("Urgent").unwrap_err();
        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(details[0].field, "priority");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
