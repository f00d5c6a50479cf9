/// User listing endpoint
///
/// Exposes the registered users so clients can populate assignee pickers;
/// an issue's assignee may be any registered user, not just the project
/// owner.
///
/// # Endpoints
///
/// - `GET /api/users` - List all users (authenticated)

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use taskboard_shared::models::user::User;

use super::auth::UserBody;

/// List all registered users
///
/// # Endpoint
///
/// ```text
/// GET /api/users
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserBody>>> {
    let users = User::list(&state.db).await?;

    Ok(Json(users.into_iter().map(UserBody::from).collect()))
}
