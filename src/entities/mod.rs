//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the backend tables the catalog core reads and writes.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod color;
pub mod product;
pub mod product_review;
pub mod product_variant;
pub mod size;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use color::{Column as ColorColumn, Entity as Color, Model as ColorModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_review::{
    Column as ProductReviewColumn, Entity as ProductReview, Model as ProductReviewModel,
};
pub use product_variant::{
    Column as ProductVariantColumn, Entity as ProductVariant, Model as ProductVariantModel,
};
pub use size::{Column as SizeColumn, Entity as Size, Model as SizeModel};
