/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `sessions`: Login and logout
/// - `users`: Sign-up, profile ("Mypage"), and account editing
/// - `tasks`: Task CRUD

pub mod health;
pub mod sessions;
pub mod tasks;
pub mod users;
