//! Product reviews - The curated review list edited alongside a product.
//!
//! The form keeps the whole list in memory; a save deletes the product's
//! stored reviews and inserts the current list.

use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    core::links::normalize_image_url,
    entities::{ProductReview, product_review},
    errors::{Error, Result},
};

/// One review as edited on the product form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    /// Name shown next to the review
    pub reviewer_name: String,
    /// Star rating, 1-5
    pub rating: i32,
    /// Review text
    pub comment: String,
    /// Date shown on the review
    pub date: NaiveDate,
    /// Verified-purchase badge
    pub is_verified: bool,
    /// Reviewer avatar
    pub profile_image_url: Option<String>,
}

impl ReviewDraft {
    /// A blank five-star review dated today.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reviewer_name: String::new(),
            rating: 5,
            comment: String::new(),
            date: chrono::Utc::now().date_naive(),
            is_verified: false,
            profile_image_url: None,
        }
    }

    /// Sets the avatar from a pasted link; a blank link clears it.
    pub fn set_profile_image_url(&mut self, raw: &str) {
        let url = normalize_image_url(raw);
        self.profile_image_url = (!url.is_empty()).then_some(url);
    }

    /// Flips the verified-purchase badge.
    pub const fn toggle_verified(&mut self) {
        self.is_verified = !self.is_verified;
    }
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl From<product_review::Model> for ReviewDraft {
    fn from(row: product_review::Model) -> Self {
        Self {
            reviewer_name: row.reviewer_name,
            rating: row.rating,
            comment: row.comment,
            date: row.date,
            is_verified: row.is_verified,
            profile_image_url: row.profile_image_url,
        }
    }
}

/// Checks every review's rating.
///
/// # Errors
/// Returns [`Error::Validation`] naming the first review whose rating is outside 1-5.
pub fn validate_reviews(reviews: &[ReviewDraft]) -> Result<()> {
    match reviews.iter().position(|review| !(1..=5).contains(&review.rating)) {
        Some(index) => Err(Error::Validation {
            message: format!("Review {} needs a rating between 1 and 5", index + 1),
        }),
        None => Ok(()),
    }
}

/// Stored reviews of a product, oldest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_reviews_for_product(
    db: &DatabaseConnection,
    product_id: &str,
) -> Result<Vec<product_review::Model>> {
    ProductReview::find()
        .filter(product_review::Column::ProductId.eq(product_id))
        .order_by_asc(product_review::Column::Date)
        .order_by_asc(product_review::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes all reviews of `product_id`.
///
/// # Errors
/// Returns the database error if the delete fails.
pub async fn delete_reviews(db: &DatabaseConnection, product_id: &str) -> Result<u64> {
    let result = ProductReview::delete_many()
        .filter(product_review::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Replaces the stored reviews of `product_id` with `reviews`.
///
/// Not atomic: if the insert fails the old reviews are already gone.
///
/// # Errors
/// Returns the database error of the failing delete or insert.
pub async fn replace_reviews(
    db: &DatabaseConnection,
    product_id: &str,
    reviews: &[ReviewDraft],
) -> Result<usize> {
    delete_reviews(db, product_id).await?;
    if reviews.is_empty() {
        return Ok(0);
    }

    let now = chrono::Utc::now().naive_utc();
    let rows = reviews.iter().map(|review| product_review::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        product_id: Set(product_id.to_string()),
        reviewer_name: Set(review.reviewer_name.trim().to_string()),
        rating: Set(review.rating),
        comment: Set(review.comment.trim().to_string()),
        date: Set(review.date),
        is_verified: Set(review.is_verified),
        profile_image_url: Set(review.profile_image_url.clone()),
        created_at: Set(now),
    });
    ProductReview::insert_many(rows).exec(db).await?;

    info!(product = %product_id, count = reviews.len(), "Replaced product reviews");
    Ok(reviews.len())
}
