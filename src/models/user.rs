use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Represents a user in the system.
#[derive(Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The session token this user is bound to.
    pub session_id: Uuid,
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}
