/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Signup (register a new account)
/// - Login
/// - Current user lookup
///
/// # Endpoints
///
/// - `POST /api/auth/signup` - Register new user, returns token + user
/// - `POST /api/auth/login` - Login, returns token + user
/// - `GET /api/auth/me` - Current authenticated user
///
/// Login failures are a single uniform 401 for both unknown usernames and
/// wrong passwords, so the endpoint cannot be used to enumerate accounts.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, AppJson},
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{
        identity::CurrentUser,
        password, token,
    },
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Username (unique, case-sensitive)
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,

    /// Email address (unique)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username
    pub username: String,

    /// Password
    pub password: String,
}

/// Public view of a user
///
/// The password hash never leaves the server.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserBody {
    /// User ID
    pub id: i64,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Token + user response returned by signup and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token asserting the user's identity
    pub access_token: String,

    /// Token type for the Authorization header
    pub token_type: String,

    /// The authenticated user
    pub user: UserBody,
}

/// Register a new user
///
/// Creates the account, then immediately issues a token so the client is
/// logged in after signup.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/signup
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "correct-horse"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, or username/email already taken
/// - `500 Internal Server Error`: Server error
pub async fn signup(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignupRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    // Reject duplicates up front for a clean message; the unique constraints
    // still catch a racing signup, surfacing as the same 400 conflict.
    if User::username_or_email_taken(&state.db, &req.username, &req.email).await? {
        return Err(ApiError::Conflict(
            "Username or email already registered".to_string(),
        ));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let access_token = token::issue_token(user.id, state.jwt_secret(), state.token_ttl())?;

    Ok(Json(AuthResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: user.into(),
    }))
}

/// Login endpoint
///
/// Authenticates a user by username and password and returns a fresh token.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "correct-horse"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials (unknown username and wrong
///   password are deliberately indistinguishable)
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let access_token = token::issue_token(user.id, state.jwt_secret(), state.token_ttl())?;

    Ok(Json(AuthResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: user.into(),
    }))
}

/// Current user endpoint
///
/// Returns the user resolved from the request's bearer token.
///
/// # Endpoint
///
/// ```text
/// GET /api/auth/me
/// Authorization: Bearer <token>
/// ```
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> ApiResult<Json<UserBody>> {
    Ok(Json(user.into()))
}
