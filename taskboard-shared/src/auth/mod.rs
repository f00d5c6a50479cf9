/// Authentication and authorization core
///
/// This module provides the security primitives for Taskboard:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: Signed, time-bounded identity tokens (HS256)
/// - [`identity`]: Resolves a bearer token to a concrete user record
/// - [`policy`]: Ownership-scoped access decisions for projects and issues
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Tokens**: HS256 signing with a pinned algorithm and configurable TTL
/// - **Constant-time Comparison**: Password verification uses constant-time
///   operations
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::password::{hash_password, verify_password};
/// use taskboard_shared::auth::token::{issue_token, verify_token};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash));
///
/// // Token issuance
/// let token = issue_token(42, "secret-key-at-least-32-bytes-long!!", Duration::minutes(60))?;
/// assert_eq!(verify_token(&token, "secret-key-at-least-32-bytes-long!!")?, 42);
/// # Ok(())
/// # }
/// ```

pub mod identity;
pub mod password;
pub mod policy;
pub mod token;
