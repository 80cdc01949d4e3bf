use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Represents a meal record.
#[derive(Clone, Debug)]
pub struct Meal {
    /// The unique identifier for the meal.
    pub id: Uuid,
    /// The session token that owns this meal.
    pub session_id: Uuid,
    /// The meal's name.
    pub name: String,
    /// Free-text description of the meal.
    pub description: String,
    /// Whether the meal is within the diet.
    pub is_on_diet: bool,
    /// When the meal occurred.
    pub date: DateTime<Utc>,
    /// The timestamp when the record was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The mutable fields of a meal, as accepted on create and update.
#[derive(Clone, Debug)]
pub struct MealDraft {
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
    pub date: DateTime<Utc>,
}
