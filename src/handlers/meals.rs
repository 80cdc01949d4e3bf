use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use garde::Validate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{
        meal::{Meal, MealDraft},
        session::SessionToken,
    },
    services::meals as meal_service,
    state::AppState,
};

/// The request payload for creating or replacing a meal.
#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MealPayload {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub description: String,
    #[garde(skip)]
    pub is_on_diet: bool,
    #[garde(skip)]
    pub date: DateTime<Utc>,
}

impl MealPayload {
    fn into_draft(self) -> MealDraft {
        MealDraft {
            name: self.name,
            description: self.description,
            is_on_diet: self.is_on_diet,
            date: self.date,
        }
    }
}

/// Serializes a meal for a response body.
fn meal_json(meal: &Meal) -> sonic_rs::Value {
    sonic_rs::json!({
        "id": meal.id.to_string(),
        "name": meal.name,
        "description": meal.description,
        "isOnDiet": meal.is_on_diet,
        "date": meal.date.to_rfc3339(),
        "createdAt": meal.created_at.to_rfc3339(),
        "updatedAt": meal.updated_at.to_rfc3339()
    })
}

fn json_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Creates a new meal owned by the caller.
#[axum::debug_handler]
pub async fn create_meal(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Json(payload): Json<MealPayload>,
) -> Result<Response> {
    payload.validate()?;

    let meal = meal_service::create_meal(&state, token, payload.into_draft()).await?;
    tracing::info!("✅ Meal created: {}", meal.id);

    Ok(StatusCode::CREATED.into_response())
}

/// Lists the caller's meals, most recent first.
#[axum::debug_handler]
pub async fn list_meals(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> Result<Response> {
    let meals = meal_service::list_meals(&state, token).await?;

    let meals_json: Vec<_> = meals.iter().map(meal_json).collect();
    let body = sonic_rs::to_string(&sonic_rs::json!({
        "meals": meals_json
    }))
    .map_err(|e| AppError::Internal(format!("Response serialization failed: {}", e)))?;

    Ok(json_response(StatusCode::OK, body))
}

/// Gets a single meal, only if owned by the caller.
#[axum::debug_handler]
pub async fn get_meal(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(meal_id): Path<Uuid>,
) -> Result<Response> {
    let meal = meal_service::get_meal(&state, token, meal_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let body = sonic_rs::to_string(&sonic_rs::json!({
        "meal": meal_json(&meal)
    }))
    .map_err(|e| AppError::Internal(format!("Response serialization failed: {}", e)))?;

    Ok(json_response(StatusCode::OK, body))
}

/// Full-replaces an owned meal.
#[axum::debug_handler]
pub async fn update_meal(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(meal_id): Path<Uuid>,
    Json(payload): Json<MealPayload>,
) -> Result<Response> {
    payload.validate()?;

    meal_service::update_meal(&state, token, meal_id, payload.into_draft()).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Deletes an owned meal.
#[axum::debug_handler]
pub async fn delete_meal(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(meal_id): Path<Uuid>,
) -> Result<Response> {
    meal_service::delete_meal(&state, token, meal_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Computes the caller's dietary metrics.
#[axum::debug_handler]
pub async fn meal_metrics(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> Result<Response> {
    let metrics = meal_service::meal_metrics(&state, token).await?;

    let body = sonic_rs::to_string(&metrics)
        .map_err(|e| AppError::Internal(format!("Response serialization failed: {}", e)))?;

    Ok(json_response(StatusCode::OK, body))
}
