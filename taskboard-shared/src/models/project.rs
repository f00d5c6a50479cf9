/// Project model and database operations
///
/// Projects are owner-scoped containers for issues. Every project has exactly
/// one owner; all reads and mutations are gated on ownership by the access
/// policy before these operations run.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     description TEXT,
///     owner_id BIGINT NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::project::{Project, CreateProject};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let project = Project::create(&pool, CreateProject {
///     name: "Website".to_string(),
///     description: Some("Marketing site relaunch".to_string()),
///     owner_id: 1,
/// }).await?;
///
/// let owned = Project::list_by_owner(&pool, 1).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID, assigned by the database on creation
    pub id: i64,

    /// Project name (non-empty)
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Owning user; exactly one owner per project
    pub owner_id: i64,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning user ID (the authenticated creator)
    pub owner_id: i64,
}

/// Input for updating a project
///
/// Updates replace all mutable fields atomically (full-replace semantics):
/// an omitted description clears the stored one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New project name
    pub name: String,

    /// New description (None clears it)
    pub description: Option<String>,
}

impl Project {
    /// Creates a new project owned by the given user
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist (foreign key violation)
    /// or the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.owner_id)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    ///
    /// Returns the project if found, None otherwise. Ownership is NOT checked
    /// here; callers apply the access policy on the loaded row.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects owned by a user
    ///
    /// Ordered by creation date (newest first).
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, created_at, updated_at
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Replaces a project's mutable fields (name, description)
    ///
    /// Full-replace semantics in a single statement; `owner_id` is immutable.
    /// Returns the updated project if found, None if it doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.description)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project by ID
    ///
    /// Child issues are removed in the same statement via the
    /// `ON DELETE CASCADE` foreign key, so the deletion is atomic: either the
    /// project and all of its issues are gone, or nothing is.
    ///
    /// Returns true if a project was deleted, false if it didn't exist.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
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
    fn test_create_project_struct() {
        let create = CreateProject {
            name: "Website".to_string(),
            description: None,
            owner_id: 7,
        };

        assert_eq!(create.name, "Website");
        assert!(create.description.is_none());
        assert_eq!(create.owner_id, 7);
    }

    #[test]
    fn test_update_project_clears_description() {
        // Full-replace semantics: None is a value, not "leave unchanged"
        let update = UpdateProject {
            name: "Website v2".to_string(),
            description: None,
        };

        assert!(update.description.is_none());
    }

    // Integration tests for database operations are in taskboard-api/tests/
}
