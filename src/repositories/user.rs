use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;
use crate::{error::Result, models::user::User};

/// A helper function to map a `tokio_postgres::Row` to a `User`.
fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        session_id: row.try_get("session_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Creates a new user in the database.
///
/// # Arguments
///
/// * `pool` - The database connection pool.
/// * `id` - The unique identifier for the user.
/// * `session_id` - The session token the user is bound to.
/// * `name` - The user's display name.
/// * `email` - The user's email address.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub async fn create_user(
    pool: &Pool,
    id: Uuid,
    session_id: Uuid,
    name: &str,
    email: &str,
) -> Result<User> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO users (id, session_id, name, email)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
            &[&id, &session_id, &name, &email],
        )
        .await?;
    row_to_user(&row)
}

/// Finds a user by their email address.
pub async fn find_by_email(pool: &Pool, email: &str) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT *
            FROM users
            WHERE email = $1
            "#,
            &[&email],
        )
        .await?;
    row.map(|r| row_to_user(&r)).transpose()
}

/// Lists all users, oldest first.
pub async fn list_users(pool: &Pool) -> Result<Vec<User>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT *
            FROM users
            ORDER BY created_at ASC
            "#,
            &[],
        )
        .await?;
    rows.iter().map(row_to_user).collect()
}
