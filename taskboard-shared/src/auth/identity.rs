/// Identity resolution: bearer token → user record
///
/// This module turns a request's bearer credential into a concrete [`User`]
/// row. Token verification failures and tokens whose subject no longer exists
/// both collapse into a single `Unauthenticated` error: a structurally valid
/// token for a deleted user must not be treated as authenticated, and callers
/// must not be able to tell the two cases apart.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::identity::{bearer_token, resolve};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, auth_header: &str) -> Result<(), Box<dyn std::error::Error>> {
/// let token = bearer_token(auth_header).ok_or("expected Bearer scheme")?;
/// let user = resolve(&pool, "jwt-secret", token).await?;
/// println!("request from {}", user.username);
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;

use super::token::verify_token;
use crate::models::user::User;

/// Error type for identity resolution
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing, malformed, expired, or forged token, or a token whose
    /// subject no longer exists
    #[error("Authentication required")]
    Unauthenticated,

    /// Storage failure during user lookup; an internal error, not an
    /// authentication failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Authenticated user attached to a request
///
/// Inserted into request extensions by the API layer's auth middleware after
/// successful resolution; handlers extract it to know who is calling.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Extracts the token from an `Authorization` header value
///
/// Returns the token portion of `Bearer <token>`, or None if the value does
/// not use the Bearer scheme.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}

/// Resolves a bearer token to a user record
///
/// Verifies the token, then loads the subject user from storage.
///
/// # Errors
///
/// - `AuthError::Unauthenticated` if the token fails verification for any
///   reason, or if no user exists with the embedded id
/// - `AuthError::Database` if the user lookup itself fails
pub async fn resolve(pool: &PgPool, secret: &str, token: &str) -> Result<User, AuthError> {
    let user_id = verify_token(token, secret).map_err(|_| AuthError::Unauthenticated)?;

    User::find_by_id(pool, user_id)
        .await?
        .ok_or(AuthError::Unauthenticated)
}

/// Resolves an optional bearer token
///
/// A request that carries no credential at all resolves to `Ok(None)`
/// (anonymous). A credential that is present but invalid still fails hard:
/// a malformed or expired token is always an error, never silently treated
/// as anonymous.
pub async fn resolve_optional(
    pool: &PgPool,
    secret: &str,
    token: Option<&str>,
) -> Result<Option<User>, AuthError> {
    match token {
        None => Ok(None),
        Some(token) => resolve(pool, secret, token).await.map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), None);
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token(""), None);
    }

    #[test]
    fn test_bearer_token_keeps_remainder_verbatim() {
        // Only the scheme prefix is stripped; the token is passed through untouched
        assert_eq!(bearer_token("Bearer  padded"), Some(" padded"));
    }

    // resolve/resolve_optional against a live database are covered by the
    // integration suite in taskboard-api/tests/
}
