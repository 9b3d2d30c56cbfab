//! Product entity - A catalog item whose sellable units are its variants.
//!
//! Pricing, stock and media live on `product_variant` rows; the product row
//! only carries descriptive fields, merchandising flags and vendor attribution.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Merchandising shelf a product can be pinned to
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum FeaturedType {
    /// Shown in the trending carousel
    #[sea_orm(string_value = "trending")]
    Trending,
    /// Shown in the best-seller carousel
    #[sea_orm(string_value = "best_seller")]
    BestSeller,
}

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Product name
    pub name: String,
    /// Long description
    pub description: String,
    /// Owning category
    pub category_id: String,
    /// Inactive products are hidden from the storefront
    pub is_active: bool,
    /// Optional merchandising shelf
    pub featured_type: Option<FeaturedType>,
    /// Zero-based position inside its featured shelf
    pub display_order_within_feature: Option<i32>,
    /// Return policy text
    pub return_policy: String,
    /// Vendor that supplies the product
    pub vendor_name: String,
    /// Vendor name shown to shoppers
    pub alias_vendor: String,
    /// Number of shopper likes
    pub like_count: i32,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One product has many variants
    #[sea_orm(has_many = "super::product_variant::Entity")]
    Variants,
    /// One product has many reviews
    #[sea_orm(has_many = "super::product_review::Entity")]
    Reviews,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::product_variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variants.def()
    }
}

impl Related<super::product_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
