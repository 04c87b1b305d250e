use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub meal_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Mean rating (one decimal) and count for one meal. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    pub rating: f64,
    pub review_count: u64,
}

impl AggregateRating {
    /// Aggregates a set of ratings. An empty set yields `0.0` with a count of zero.
    #[must_use]
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0i64, 0u64), |(sum, count), r| (sum + i64::from(r), count + 1));

        if count == 0 {
            return Self::default();
        }

        #[allow(clippy::cast_precision_loss)]
        let mean = sum as f64 / count as f64;

        Self {
            rating: round_one_decimal(mean),
            review_count: count,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
