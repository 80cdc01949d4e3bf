use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use garde::Validate;
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    models::session::SessionToken,
    services::users as user_service,
    state::AppState,
};

/// The request payload for user registration.
#[derive(Deserialize, Validate, Debug)]
pub struct CreateUserRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
}

/// Registers a new user bound to the caller's session token.
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Response> {
    payload.validate()?;
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }

    let user = user_service::register_user(&state, token, &payload.name, &payload.email).await?;
    tracing::info!("✅ User registered: {}", user.id);

    Ok(StatusCode::CREATED.into_response())
}

/// Lists all registered users.
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<Response> {
    let users = user_service::list_users(&state).await?;

    let users_json: Vec<_> = users
        .into_iter()
        .map(|u| {
            sonic_rs::json!({
                "id": u.id.to_string(),
                "name": u.name,
                "email": u.email
            })
        })
        .collect();

    let body = sonic_rs::to_string(&sonic_rs::json!({
        "users": users_json
    }))
    .map_err(|e| AppError::Internal(format!("Response serialization failed: {}", e)))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
