/// Ownership-scoped access policy
///
/// Every read, update, delete, and status-patch on a project or issue passes
/// through this module before the operation runs. The rule is single-owner:
/// a user may act on a project iff they are its recorded owner, and on an
/// issue iff they own its parent project.
///
/// `Forbidden` is deliberately rendered as 404 at the API boundary so that a
/// non-owner cannot learn whether a resource exists.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::policy::{authorize_issue, authorize_project};
/// use taskboard_shared::models::{issue::Issue, project::Project, user::User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, user: User, project: Project, issue: Issue)
/// #     -> Result<(), Box<dyn std::error::Error>> {
/// authorize_project(&user, &project)?;
/// authorize_issue(&pool, &user, &issue).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;

use crate::models::{issue::Issue, project::Project, user::User};

/// Error type for access policy decisions
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Authenticated but not the owner of the target resource
    #[error("Not authorized to access this resource")]
    Forbidden,

    /// An issue references a project that no longer exists; a referential
    /// integrity break, never an authorization failure
    #[error("Issue {issue_id} references missing project {project_id}")]
    MissingParent { issue_id: i64, project_id: i64 },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Authorizes a user against a project
///
/// Succeeds iff the user is the project's recorded owner.
///
/// # Errors
///
/// Returns `PolicyError::Forbidden` for any non-owner
pub fn authorize_project(user: &User, project: &Project) -> Result<(), PolicyError> {
    if project.owner_id != user.id {
        return Err(PolicyError::Forbidden);
    }

    Ok(())
}

/// Authorizes a user against an issue
///
/// Loads the issue's parent project and delegates to [`authorize_project`].
///
/// # Errors
///
/// - `PolicyError::Forbidden` if the user does not own the parent project
/// - `PolicyError::MissingParent` if the parent project cannot be loaded;
///   a consistency fault that the caller must surface as a fatal internal
///   error, not a 404
pub async fn authorize_issue(
    pool: &PgPool,
    user: &User,
    issue: &Issue,
) -> Result<(), PolicyError> {
    let project = Project::find_by_id(pool, issue.project_id)
        .await?
        .ok_or(PolicyError::MissingParent {
            issue_id: issue.id,
            project_id: issue.project_id,
        })?;

    authorize_project(user, &project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: i64) -> User {
        User {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        }
    }

    fn project(id: i64, owner_id: i64) -> Project {
        Project {
            id,
            name: "Website".to_string(),
            description: None,
            owner_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_is_authorized() {
        let owner = user(1);
        let p = project(10, 1);

        assert!(authorize_project(&owner, &p).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let stranger = user(2);
        let p = project(10, 1);

        let result = authorize_project(&stranger, &p);
        assert!(matches!(result, Err(PolicyError::Forbidden)));
    }

    #[test]
    fn test_policy_error_display() {
        let err = PolicyError::Forbidden;
        assert!(err.to_string().contains("Not authorized"));

        let err = PolicyError::MissingParent {
            issue_id: 3,
            project_id: 9,
        };
        assert!(err.to_string().contains("missing project 9"));
    }

    // authorize_issue against a live database is covered by the integration
    // suite in taskboard-api/tests/
}
