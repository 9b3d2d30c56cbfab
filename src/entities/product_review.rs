//! Product review entity - A curated shopper review shown on a product page.
//!
//! Reviews are owned by the product form: every save replaces the product's
//! full review list.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product review database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_reviews")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Reviewed product
    pub product_id: String,
    /// Name shown next to the review
    pub reviewer_name: String,
    /// Star rating, 1-5
    pub rating: i32,
    /// Review text
    pub comment: String,
    /// Date shown on the review
    pub date: Date,
    /// Whether the review carries the verified-purchase badge
    pub is_verified: bool,
    /// Reviewer avatar
    pub profile_image_url: Option<String>,
    /// When the row was written
    pub created_at: DateTime,
}

/// Defines relationships between `ProductReview` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
