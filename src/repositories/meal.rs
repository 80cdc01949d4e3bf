use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::meal::{Meal, MealDraft},
};

/// A helper function to map a `tokio_postgres::Row` to a `Meal`.
fn row_to_meal(row: &Row) -> Result<Meal> {
    Ok(Meal {
        id: row.try_get("id")?,
        session_id: row.try_get("session_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        is_on_diet: row.try_get("is_on_diet")?,
        date: row.try_get("date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Inserts a new meal owned by the given session token.
///
/// # Arguments
///
/// * `pool` - The database connection pool.
/// * `id` - The unique identifier for the meal.
/// * `session_id` - The owning session token.
/// * `draft` - The meal's fields.
///
/// # Returns
///
/// A `Result` containing the created `Meal`.
pub async fn create_meal(
    pool: &Pool,
    id: Uuid,
    session_id: Uuid,
    draft: &MealDraft,
) -> Result<Meal> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO meals (id, session_id, name, description, is_on_diet, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
            &[
                &id,
                &session_id,
                &draft.name,
                &draft.description,
                &draft.is_on_diet,
                &draft.date,
            ],
        )
        .await?;
    row_to_meal(&row)
}

/// Lists the meals owned by a session token, most recent meal date first.
///
/// `created_at` breaks date ties so the order is deterministic.
pub async fn list_by_owner(pool: &Pool, session_id: Uuid) -> Result<Vec<Meal>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT *
            FROM meals
            WHERE session_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
            &[&session_id],
        )
        .await?;
    rows.iter().map(row_to_meal).collect()
}

/// Lists the meals owned by a session token in chronological order.
///
/// Ascending by meal date, with insertion order (`created_at`, then `id`)
/// as the stable tiebreak. This is the order the streak computation
/// requires; it is distinct from the display order of [`list_by_owner`].
pub async fn list_chronological(pool: &Pool, session_id: Uuid) -> Result<Vec<Meal>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT *
            FROM meals
            WHERE session_id = $1
            ORDER BY date ASC, created_at ASC, id ASC
            "#,
            &[&session_id],
        )
        .await?;
    rows.iter().map(row_to_meal).collect()
}

/// Finds a meal by id, only if owned by the given session token.
///
/// Ownership mismatch and absence are indistinguishable: both yield `None`.
pub async fn find_owned(pool: &Pool, meal_id: Uuid, session_id: Uuid) -> Result<Option<Meal>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT *
            FROM meals
            WHERE id = $1 AND session_id = $2
            "#,
            &[&meal_id, &session_id],
        )
        .await?;
    row.map(|r| row_to_meal(&r)).transpose()
}

/// Full-replaces the mutable fields of an owned meal.
///
/// Fails with `NotFound` when the meal is absent or owned by another token.
pub async fn update_owned(
    pool: &Pool,
    meal_id: Uuid,
    session_id: Uuid,
    draft: &MealDraft,
) -> Result<()> {
    let client = pool.get().await?;
    let updated = client
        .execute(
            r#"
            UPDATE meals
            SET
                name = $1,
                description = $2,
                is_on_diet = $3,
                date = $4,
                updated_at = NOW()
            WHERE id = $5 AND session_id = $6
            "#,
            &[
                &draft.name,
                &draft.description,
                &draft.is_on_diet,
                &draft.date,
                &meal_id,
                &session_id,
            ],
        )
        .await?;

    if updated == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Deletes an owned meal.
///
/// Fails with `NotFound` when the meal is absent or owned by another token.
pub async fn delete_owned(pool: &Pool, meal_id: Uuid, session_id: Uuid) -> Result<()> {
    let client = pool.get().await?;
    let deleted = client
        .execute(
            r#"
            DELETE FROM meals
            WHERE id = $1 AND session_id = $2
            "#,
            &[&meal_id, &session_id],
        )
        .await?;

    if deleted == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
