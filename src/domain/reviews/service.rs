//! Reviews service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use tracing::instrument;

use crate::{
    domain::{
        products::models::ProductId,
        reviews::{
            errors::ReviewsServiceError,
            models::{NewReview, RATING_RANGE, Review},
        },
    },
    http::{ApiClient, NO_QUERY},
};

fn reviews_path(product: &ProductId) -> String {
    format!("/api/reviews/{product}/reviews")
}

/// [`ReviewsService`] over the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpReviewsService {
    api: ApiClient,
}

impl HttpReviewsService {
    /// Service issuing its requests through `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ReviewsService for HttpReviewsService {
    #[instrument(skip(self))]
    async fn list_reviews(&self, product: &ProductId) -> Result<Vec<Review>, ReviewsServiceError> {
        Ok(self.api.get(&reviews_path(product), NO_QUERY).await?)
    }

    #[instrument(skip(self, review), fields(rating = review.rating))]
    async fn submit_review(
        &self,
        product: &ProductId,
        review: NewReview,
    ) -> Result<(), ReviewsServiceError> {
        validate(&review)?;

        Ok(self
            .api
            .send_unit(Method::POST, &reviews_path(product), &review)
            .await?)
    }
}

fn validate(review: &NewReview) -> Result<(), ReviewsServiceError> {
    if !RATING_RANGE.contains(&review.rating) {
        return Err(ReviewsServiceError::InvalidData("rating must be between 1 and 5"));
    }

    if review.comment.trim().is_empty() {
        return Err(ReviewsServiceError::InvalidData("comment is required"));
    }

    Ok(())
}

/// Product reviews.
#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Retrieve the reviews left on a product.
    async fn list_reviews(&self, product: &ProductId) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Posts a review for a product.
    async fn submit_review(
        &self,
        product: &ProductId,
        review: NewReview,
    ) -> Result<(), ReviewsServiceError>;
}

#[cfg(test)]
mod tests {
    use crate::domain::users::models::UserId;

    use super::*;

    fn review(rating: u8, comment: &str) -> NewReview {
        NewReview {
            user_id: UserId::new("u1"),
            rating,
            comment: comment.to_owned(),
        }
    }

    #[test]
    fn rating_outside_one_to_five_is_rejected() {
        assert!(validate(&review(0, "meh")).is_err(), "zero stars");
        assert!(validate(&review(6, "wow")).is_err(), "six stars");
        assert!(validate(&review(5, "wow")).is_ok(), "five stars");
    }

    #[test]
    fn blank_comment_is_rejected() {
        assert!(matches!(
            validate(&review(4, "  ")),
            Err(ReviewsServiceError::InvalidData(_))
        ));
    }
}
