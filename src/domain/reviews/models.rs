//! Review Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::users::models::UserId,
    ids::TypedId,
};

/// Review Id
pub type ReviewId = TypedId<Review>;

/// Lowest and highest star rating.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Reviewer as populated by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    /// Reviewer's user id.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Reviewer's display name.
    pub name: String,
}

/// Review Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Backend id.
    #[serde(rename = "_id")]
    pub id: ReviewId,
    /// Who wrote it.
    pub user: ReviewAuthor,
    /// Stars, within [`RATING_RANGE`].
    pub rating: u8,
    /// When it was posted.
    pub date: Timestamp,
    /// Review text.
    pub comment: String,
    /// Number of shoppers who found it helpful.
    #[serde(default)]
    pub helpful: u32,
}

/// Body of `POST /api/reviews/:productId/reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    /// Reviewer.
    pub user_id: UserId,
    /// Stars, within [`RATING_RANGE`].
    pub rating: u8,
    /// Review text.
    pub comment: String,
}

/// Mean rating to one decimal place, `None` without reviews.
#[must_use]
pub fn average_rating(reviews: &[Review]) -> Option<Decimal> {
    if reviews.is_empty() {
        return None;
    }

    let sum: Decimal = reviews.iter().map(|review| Decimal::from(review.rating)).sum();

    Some((sum / Decimal::from(reviews.len())).round_dp(1))
}
