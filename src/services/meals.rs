use uuid::Uuid;
use crate::{
    error::Result,
    metrics::{self, MealMetrics},
    models::{
        meal::{Meal, MealDraft},
        session::SessionToken,
    },
    repositories::meal as meal_repo,
    state::AppState,
};

/// Creates a new meal owned by the caller's session token.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `token` - The caller's resolved session token.
/// * `draft` - The meal's fields.
///
/// # Returns
///
/// A `Result` containing the created `Meal`.
pub async fn create_meal(state: &AppState, token: SessionToken, draft: MealDraft) -> Result<Meal> {
    let meal_id = Uuid::new_v4();
    meal_repo::create_meal(&state.db, meal_id, token.0, &draft).await
}

/// Lists the caller's meals, most recent meal date first.
pub async fn list_meals(state: &AppState, token: SessionToken) -> Result<Vec<Meal>> {
    meal_repo::list_by_owner(&state.db, token.0).await
}

/// Gets a single meal, only if owned by the caller.
pub async fn get_meal(state: &AppState, token: SessionToken, meal_id: Uuid) -> Result<Option<Meal>> {
    meal_repo::find_owned(&state.db, meal_id, token.0).await
}

/// Full-replaces the mutable fields of an owned meal.
pub async fn update_meal(
    state: &AppState,
    token: SessionToken,
    meal_id: Uuid,
    draft: MealDraft,
) -> Result<()> {
    meal_repo::update_owned(&state.db, meal_id, token.0, &draft).await
}

/// Deletes an owned meal.
pub async fn delete_meal(state: &AppState, token: SessionToken, meal_id: Uuid) -> Result<()> {
    meal_repo::delete_owned(&state.db, meal_id, token.0).await
}

/// Computes the caller's dietary metrics.
///
/// Fetches the meals in chronological order and hands `(date, on_diet)`
/// pairs to the pure streak computation.
pub async fn meal_metrics(state: &AppState, token: SessionToken) -> Result<MealMetrics> {
    let meals = meal_repo::list_chronological(&state.db, token.0).await?;
    let entries: Vec<_> = meals.iter().map(|m| (m.date, m.is_on_diet)).collect();
    Ok(metrics::compute_metrics(&entries))
}
