//! Color entity - One value of the color axis of the variant matrix.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Color database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "colors")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name (e.g., "Maroon")
    pub name: String,
    /// Swatch color as `#RRGGBB`
    pub hex_code: String,
}

/// Colors are referenced by variants but own nothing
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
