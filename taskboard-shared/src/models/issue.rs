/// Issue model and database operations
///
/// Issues are the Kanban cards of a project board, tracked by status and
/// priority. An issue belongs to exactly one project (immutable after
/// creation) and is removed when its project is deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE issue_status AS ENUM ('To Do', 'In Progress', 'Done');
/// CREATE TYPE issue_priority AS ENUM ('Low', 'Medium', 'High');
///
/// CREATE TABLE issues (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status issue_status NOT NULL DEFAULT 'To Do',
///     priority issue_priority NOT NULL DEFAULT 'Medium',
///     assignee_id BIGINT REFERENCES users(id) ON DELETE SET NULL,
///     project_id BIGINT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::issue::{CreateIssue, Issue, IssuePriority, IssueStatus};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let issue = Issue::create(&pool, CreateIssue {
///     title: "Fix login bug".to_string(),
///     description: None,
///     status: IssueStatus::ToDo,
///     priority: IssuePriority::High,
///     assignee_id: None,
///     project_id: 1,
/// }).await?;
///
/// // Drag-and-drop style transition
/// Issue::update_status(&pool, issue.id, IssueStatus::InProgress).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;

/// Issue workflow status (Kanban column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "issue_status")]
pub enum IssueStatus {
    /// Not started
    #[sqlx(rename = "To Do")]
    #[serde(rename = "To Do")]
    ToDo,

    /// Being worked on
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,

    /// Finished
    #[sqlx(rename = "Done")]
    #[serde(rename = "Done")]
    Done,
}

impl IssueStatus {
    /// Gets status as its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::ToDo => "To Do",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Done => "Done",
        }
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Do" => Ok(IssueStatus::ToDo),
            "In Progress" => Ok(IssueStatus::InProgress),
            "Done" => Ok(IssueStatus::Done),
            other => Err(format!(
                "invalid status '{}': expected one of 'To Do', 'In Progress', 'Done'",
                other
            )),
        }
    }
}

/// Issue priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "issue_priority")]
pub enum IssuePriority {
    #[sqlx(rename = "Low")]
    Low,

    #[sqlx(rename = "Medium")]
    Medium,

    #[sqlx(rename = "High")]
    High,
}

impl IssuePriority {
    /// Gets priority as its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuePriority::Low => "Low",
            IssuePriority::Medium => "Medium",
            IssuePriority::High => "High",
        }
    }
}

impl FromStr for IssuePriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(IssuePriority::Low),
            "Medium" => Ok(IssuePriority::Medium),
            "High" => Ok(IssuePriority::High),
            other => Err(format!(
                "invalid priority '{}': expected one of 'Low', 'Medium', 'High'",
                other
            )),
        }
    }
}

/// Issue model representing a Kanban card
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Issue {
    /// Unique issue ID, assigned by the database on creation
    pub id: i64,

    /// Issue title (non-empty)
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Workflow status
    pub status: IssueStatus,

    /// Priority level
    pub priority: IssuePriority,

    /// Optional assignee; any registered user, not necessarily the owner
    pub assignee_id: Option<i64>,

    /// Parent project; immutable after creation
    pub project_id: i64,

    /// When the issue was created
    pub created_at: DateTime<Utc>,

    /// When the issue was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIssue {
    /// Issue title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status
    pub status: IssueStatus,

    /// Priority
    pub priority: IssuePriority,

    /// Optional assignee
    pub assignee_id: Option<i64>,

    /// Parent project (must be owned by the creator; checked by the caller
    /// before this runs)
    pub project_id: i64,
}

/// Input for updating an issue
///
/// Full-replace semantics over all mutable fields; `project_id` cannot be
/// changed after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateIssue {
    /// New title
    pub title: String,

    /// New description (None clears it)
    pub description: Option<String>,

    /// New status
    pub status: IssueStatus,

    /// New priority
    pub priority: IssuePriority,

    /// New assignee (None unassigns)
    pub assignee_id: Option<i64>,
}

impl Issue {
    /// Creates a new issue under a project
    ///
    /// # Errors
    ///
    /// Returns an error if the project or assignee does not exist (foreign
    /// key violation) or the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateIssue) -> Result<Self, sqlx::Error> {
        let issue = sqlx::query_as::<_, Issue>(
            r#"
            INSERT INTO issues (title, description, status, priority, assignee_id, project_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, status, priority, assignee_id, project_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.assignee_id)
        .bind(data.project_id)
        .fetch_one(pool)
        .await?;

        Ok(issue)
    }

    /// Finds an issue by ID
    ///
    /// Returns the issue if found, None otherwise. Ownership is NOT checked
    /// here; callers apply the access policy on the loaded row.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let issue = sqlx::query_as::<_, Issue>(
            r#"
            SELECT id, title, description, status, priority, assignee_id, project_id,
                   created_at, updated_at
            FROM issues
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(issue)
    }

    /// Lists all issues belonging to a project
    ///
    /// Ordered by creation date (oldest first) for stable board rendering.
    pub async fn list_by_project(pool: &PgPool, project_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let issues = sqlx::query_as::<_, Issue>(
            r#"
            SELECT id, title, description, status, priority, assignee_id, project_id,
                   created_at, updated_at
            FROM issues
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(issues)
    }

    /// Replaces an issue's mutable fields
    ///
    /// Full-replace semantics in a single statement; `project_id` is left
    /// untouched. Returns the updated issue if found, None if it doesn't
    /// exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateIssue,
    ) -> Result<Option<Self>, sqlx::Error> {
        let issue = sqlx::query_as::<_, Issue>(
            r#"
            UPDATE issues
            SET title = $2, description = $3, status = $4, priority = $5,
                assignee_id = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, priority, assignee_id, project_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.assignee_id)
        .fetch_optional(pool)
        .await?;

        Ok(issue)
    }

    /// Updates only the status of an issue
    ///
    /// Narrow merge used for drag-and-drop style transitions; every other
    /// field is left untouched. Returns the updated issue if found, None if
    /// it doesn't exist.
    pub async fn update_status(
        pool: &PgPool,
        id: i64,
        status: IssueStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let issue = sqlx::query_as::<_, Issue>(
            r#"
            UPDATE issues
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, priority, assignee_id, project_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(issue)
    }

    /// Deletes an issue by ID
    ///
    /// Returns true if an issue was deleted, false if it didn't exist.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(IssueStatus::ToDo.as_str(), "To Do");
        assert_eq!(IssueStatus::InProgress.as_str(), "In Progress");
        assert_eq!(IssueStatus::Done.as_str(), "Done");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("To Do".parse::<IssueStatus>().unwrap(), IssueStatus::ToDo);
        assert_eq!(
            "In Progress".parse::<IssueStatus>().unwrap(),
            IssueStatus::InProgress
        );
        assert_eq!("Done".parse::<IssueStatus>().unwrap(), IssueStatus::Done);
    }

    #[test]
    fn test_status_from_str_rejects_unknown() {
        let err = "done".parse::<IssueStatus>().unwrap_err();
        assert!(err.contains("invalid status"));

        assert!("".parse::<IssueStatus>().is_err());
        assert!("Blocked".parse::<IssueStatus>().is_err());
    }

    #[test]
    fn test_priority_as_str() {
        assert_eq!(IssuePriority::Low.as_str(), "Low");
        assert_eq!(IssuePriority::Medium.as_str(), "Medium");
        assert_eq!(IssuePriority::High.as_str(), "High");
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("Low".parse::<IssuePriority>().unwrap(), IssuePriority::Low);
        assert_eq!(
            "Medium".parse::<IssuePriority>().unwrap(),
            IssuePriority::Medium
        );
        assert_eq!(
            "High".parse::<IssuePriority>().unwrap(),
            IssuePriority::High
        );
        assert!("Urgent".parse::<IssuePriority>().is_err());
    }

    #[test]
    fn test_status_serde_wire_format() {
        let json = serde_json::to_string(&IssueStatus::InProgress).unwrap();
        assert_eq!(json, r#""In Progress""#);

        let parsed: IssueStatus = serde_json::from_str(r#""To Do""#).unwrap();
        assert_eq!(parsed, IssueStatus::ToDo);
    }

    // Integration tests for database operations are in taskboard-api/tests/
}
