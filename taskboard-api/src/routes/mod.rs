/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (signup, login, me)
/// - `users`: User listing (assignee selection)
/// - `projects`: Project CRUD
/// - `issues`: Issue CRUD and status transitions

pub mod auth;
pub mod health;
pub mod issues;
pub mod projects;
pub mod users;
