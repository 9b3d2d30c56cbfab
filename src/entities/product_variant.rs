//! Product variant entity - One persisted cell of a product's color × size matrix.
//!
//! Rows are addressed by `(product_id, color_id, size_id)`; `color_id` is NULL
//! for size-only products. Media link lists are stored as JSON arrays.

use sea_orm::{FromJsonQueryResult, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Ordered list of media links stored as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct MediaUrls(pub Vec<String>);

/// Product variant database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_variants")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning product
    pub product_id: String,
    /// Color axis value, None for size-only variants
    pub color_id: Option<String>,
    /// Size axis value
    pub size_id: String,
    /// Units in stock
    pub quantity: i32,
    /// Selling price, kept equal to `rsp_price`
    pub price: i64,
    /// Stock keeping unit
    pub sku: String,
    /// Maximum retail price
    pub mrp_price: i64,
    /// Retail selling price
    pub rsp_price: i64,
    /// Purchase cost
    pub cost_price: i64,
    /// Derived from MRP and RSP, 0-100
    pub discount_percentage: i32,
    /// Image links in upload order
    pub image_urls: MediaUrls,
    /// Video links in upload order
    pub video_urls: MediaUrls,
    /// When the variant was created
    pub created_at: DateTime,
    /// When the variant was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between `ProductVariant` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each variant belongs to one product
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
