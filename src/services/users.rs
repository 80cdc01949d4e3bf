use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::{session::SessionToken, user::User},
    repositories::user as user_repo,
    state::AppState,
};

/// Registers a new user bound to the caller's session token.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `token` - The caller's resolved session token.
/// * `name` - The user's display name.
/// * `email` - The user's email address.
///
/// # Returns
///
/// A `Result` containing the created `User`. Fails with `Duplicate`
/// when the email is already registered; no write is performed.
pub async fn register_user(
    state: &AppState,
    token: SessionToken,
    name: &str,
    email: &str,
) -> Result<User> {
    if user_repo::find_by_email(&state.db, email).await?.is_some() {
        return Err(AppError::Duplicate("User already exists".to_string()));
    }

    let user_id = Uuid::new_v4();
    user_repo::create_user(&state.db, user_id, token.0, name, email).await
}

/// Lists all registered users.
pub async fn list_users(state: &AppState) -> Result<Vec<User>> {
    user_repo::list_users(&state.db).await
}
