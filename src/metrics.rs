use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate dietary metrics for one caller's meals.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealMetrics {
    /// Count of all meals.
    pub total_meals: u64,
    /// Count of meals flagged on-diet.
    pub total_meals_on_diet: u64,
    /// Count of meals flagged off-diet.
    pub total_meals_off_diet: u64,
    /// Longest run of chronologically consecutive on-diet meals.
    pub best_on_diet_streak: u64,
}

/// Computes metrics over a sequence of `(date, on_diet)` pairs.
///
/// The streak is defined over chronological order, so the entries are
/// stably sorted ascending by date before the scan; entries sharing a
/// date keep their input order. An empty input yields all-zero metrics.
pub fn compute_metrics(entries: &[(DateTime<Utc>, bool)]) -> MealMetrics {
    let mut ordered: Vec<(DateTime<Utc>, bool)> = entries.to_vec();
    ordered.sort_by_key(|&(date, _)| date);

    let mut metrics = MealMetrics {
        total_meals: 0,
        total_meals_on_diet: 0,
        total_meals_off_diet: 0,
        best_on_diet_streak: 0,
    };
    let mut current_streak = 0u64;

    for (_, on_diet) in ordered {
        metrics.total_meals += 1;
        if on_diet {
            metrics.total_meals_on_diet += 1;
            current_streak += 1;
            metrics.best_on_diet_streak = metrics.best_on_diet_streak.max(current_streak);
        } else {
            metrics.total_meals_off_diet += 1;
            current_streak = 0;
        }
    }

    metrics
}
