//! Category entity - Top-level grouping for products.
//!
//! Categories own the size lists offered to their products and carry a
//! `display_order` ordinal written by the drag-and-drop reorder endpoint.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name (e.g., "Sarees", "Kurtis")
    pub name: String,
    /// Free-form description shown to shoppers
    pub description: String,
    /// Optional banner image
    pub image_url: Option<String>,
    /// Inactive categories are hidden from product forms
    pub is_active: bool,
    /// Zero-based position in the storefront listing
    pub display_order: i32,
    /// When the category was created
    pub created_at: DateTime,
    /// When the category was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many sizes
    #[sea_orm(has_many = "super::size::Entity")]
    Sizes,
    /// One category has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::size::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sizes.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
