//! Reference data - Categories, colors and sizes, plus drag-and-drop ordinals.
//!
//! The product form reads these lists to offer axis values; the listing views
//! persist their drag-and-drop order as zero-based ordinals.

use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*, sea_query::Expr};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    config::catalog::CatalogConfig,
    entities::{Category, Color, Product, Size, category, color, product, size},
    errors::{Error, Result},
};

fn require_name(name: &str, what: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: format!("{what} name cannot be empty"),
        });
    }
    Ok(trimmed.to_string())
}

fn ordinal(position: usize) -> Result<i32> {
    i32::try_from(position).map_err(|_| Error::Validation {
        message: format!("Too many entries to order ({position})"),
    })
}

/// Creates an active category placed after all existing ones.
///
/// # Errors
/// Returns an error if the name is blank or the insert fails.
pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
) -> Result<category::Model> {
    let name = require_name(name, "Category")?;
    let position = usize::try_from(Category::find().count(db).await?).unwrap_or(usize::MAX);
    let now = chrono::Utc::now().naive_utc();

    let category = category::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name),
        description: Set(description.trim().to_string()),
        image_url: Set(None),
        is_active: Set(true),
        display_order: Set(ordinal(position)?),
        created_at: Set(now),
        updated_at: Set(now),
    };
    category.insert(db).await.map_err(Into::into)
}

/// Editable fields of an existing category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    /// Display name (required)
    pub name: String,
    /// Description
    pub description: String,
    /// Banner image link; blank clears it
    pub image_url: Option<String>,
    /// Whether product forms offer the category
    pub is_active: bool,
}

/// Overwrites the editable fields of a category.
///
/// # Errors
/// Returns [`Error::Validation`] for a blank name, [`Error::CategoryNotFound`]
/// if the category does not exist, or a database error if the update fails.
pub async fn update_category(
    db: &DatabaseConnection,
    category_id: &str,
    draft: &CategoryDraft,
) -> Result<category::Model> {
    let name = require_name(&draft.name, "Category")?;
    let mut category: category::ActiveModel = find_category(db, category_id).await?.into();

    category.name = Set(name);
    category.description = Set(draft.description.trim().to_string());
    category.image_url = Set(draft
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(ToString::to_string));
    category.is_active = Set(draft.is_active);
    category.updated_at = Set(chrono::Utc::now().naive_utc());
    category.update(db).await.map_err(Into::into)
}

/// Deletes a category together with its sizes.
///
/// Categories that still own products are refused; move or delete the
/// products first.
///
/// # Errors
/// Returns [`Error::Validation`] if products still reference the category,
/// [`Error::CategoryNotFound`] if it does not exist, or a database error.
pub async fn delete_category(db: &DatabaseConnection, category_id: &str) -> Result<()> {
    let category = find_category(db, category_id).await?;
    let products = Product::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .count(db)
        .await?;
    if products > 0 {
        return Err(Error::Validation {
            message: format!("Category '{}' still has {products} products", category.name),
        });
    }

    Size::delete_many()
        .filter(size::Column::CategoryId.eq(category_id))
        .exec(db)
        .await?;
    Category::delete_by_id(category.id).exec(db).await?;
    info!("Deleted category '{}'", category.name);
    Ok(())
}

async fn find_category(db: &DatabaseConnection, category_id: &str) -> Result<category::Model> {
    Category::find_by_id(category_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            id: category_id.to_string(),
        })
}

/// Every category, hidden ones included, in display order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::DisplayOrder)
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Active categories in display order, ties broken by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_active_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::IsActive.eq(true))
        .order_by_asc(category::Column::DisplayOrder)
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Shows or hides a category.
///
/// # Errors
/// Returns [`Error::CategoryNotFound`] if the category does not exist.
pub async fn set_category_active(
    db: &DatabaseConnection,
    category_id: &str,
    is_active: bool,
) -> Result<category::Model> {
    let mut category: category::ActiveModel = find_category(db, category_id).await?.into();

    category.is_active = Set(is_active);
    category.updated_at = Set(chrono::Utc::now().naive_utc());
    category.update(db).await.map_err(Into::into)
}

fn is_hex_color(code: &str) -> bool {
    code.len() == 7
        && code.starts_with('#')
        && code[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Trimmed name and hex code, as entered otherwise.
fn check_color(name: &str, hex_code: &str) -> Result<(String, String)> {
    let name = require_name(name, "Color")?;
    let hex_code = hex_code.trim();
    if !is_hex_color(hex_code) {
        return Err(Error::Validation {
            message: format!("'{hex_code}' is not a #RRGGBB color"),
        });
    }
    Ok((name, hex_code.to_string()))
}

/// Adds a color to the palette. The hex code keeps the case it was typed in.
///
/// # Errors
/// Returns [`Error::Validation`] if the name is blank or the hex code is not
/// `#RRGGBB`, or a database error if the insert fails.
pub async fn add_color(db: &DatabaseConnection, name: &str, hex_code: &str) -> Result<color::Model> {
    let (name, hex_code) = check_color(name, hex_code)?;

    let color = color::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name),
        hex_code: Set(hex_code),
    };
    let color = color.insert(db).await?;
    info!("Added color '{}' ({})", color.name, color.hex_code);
    Ok(color)
}

/// Renames a color or changes its swatch.
///
/// # Errors
/// Returns [`Error::Validation`] for invalid input, [`Error::ColorNotFound`]
/// if the color does not exist, or a database error if the update fails.
pub async fn update_color(
    db: &DatabaseConnection,
    color_id: &str,
    name: &str,
    hex_code: &str,
) -> Result<color::Model> {
    let (name, hex_code) = check_color(name, hex_code)?;
    let mut color: color::ActiveModel = Color::find_by_id(color_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::ColorNotFound {
            id: color_id.to_string(),
        })?
        .into();

    color.name = Set(name);
    color.hex_code = Set(hex_code);
    color.update(db).await.map_err(Into::into)
}

/// Removes a color from the palette. Variants keep their stored `color_id`.
///
/// # Errors
/// Returns [`Error::ColorNotFound`] if no row was deleted, or a database error.
pub async fn delete_color(db: &DatabaseConnection, color_id: &str) -> Result<()> {
    let result = Color::delete_by_id(color_id.to_string()).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ColorNotFound {
            id: color_id.to_string(),
        });
    }
    info!("Deleted color {color_id}");
    Ok(())
}

/// Full palette ordered by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_colors(db: &DatabaseConnection) -> Result<Vec<color::Model>> {
    Color::find()
        .order_by_asc(color::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds a size to a category.
///
/// # Errors
/// Returns an error if the name is blank, the category does not exist, or the insert fails.
pub async fn create_size(
    db: &DatabaseConnection,
    category_id: &str,
    name: &str,
) -> Result<size::Model> {
    let name = require_name(name, "Size")?;
    if Category::find_by_id(category_id.to_string())
        .one(db)
        .await?
        .is_none()
    {
        return Err(Error::CategoryNotFound {
            id: category_id.to_string(),
        });
    }

    let size = size::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name),
        category_id: Set(category_id.to_string()),
    };
    size.insert(db).await.map_err(Into::into)
}

/// Sizes offered in one category.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_sizes_for_category(
    db: &DatabaseConnection,
    category_id: &str,
) -> Result<Vec<size::Model>> {
    Size::find()
        .filter(size::Column::CategoryId.eq(category_id))
        .order_by_asc(size::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Persists a drag-and-drop order: each category gets its index as `display_order`.
///
/// Rows are written one by one and the first failure stops the run; rows
/// written before it keep their new ordinal. Returns the number of rows changed.
///
/// # Errors
/// Returns the database error of the first failing row.
pub async fn reorder_categories(db: &DatabaseConnection, ordered_ids: &[String]) -> Result<u64> {
    let mut changed = 0;
    for (position, id) in ordered_ids.iter().enumerate() {
        let result = Category::update_many()
            .col_expr(category::Column::DisplayOrder, Expr::value(ordinal(position)?))
            .filter(category::Column::Id.eq(id.as_str()))
            .exec(db)
            .await
            .inspect_err(|e| error!("Failed to update order of category {id}: {e}"))?;
        changed += result.rows_affected;
    }
    info!("Reordered {changed} categories");
    Ok(changed)
}

/// Persists the order of a featured shelf as `display_order_within_feature`.
///
/// Same write semantics as [`reorder_categories`]; `updated_at` is refreshed.
///
/// # Errors
/// Returns the database error of the first failing row.
pub async fn reorder_featured_products(
    db: &DatabaseConnection,
    ordered_ids: &[String],
) -> Result<u64> {
    let mut changed = 0;
    for (position, id) in ordered_ids.iter().enumerate() {
        let result = Product::update_many()
            .col_expr(
                product::Column::DisplayOrderWithinFeature,
                Expr::value(ordinal(position)?),
            )
            .col_expr(
                product::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().naive_utc()),
            )
            .filter(product::Column::Id.eq(id.as_str()))
            .exec(db)
            .await
            .inspect_err(|e| error!("Failed to update order of product {id}: {e}"))?;
        changed += result.rows_affected;
    }
    info!("Reordered {changed} featured products");
    Ok(changed)
}

/// Rows created by [`seed_from_config`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Colors inserted
    pub colors: usize,
    /// Categories inserted
    pub categories: usize,
    /// Sizes inserted
    pub sizes: usize,
}

/// Seeds colors and categories from configuration. Each table is only seeded
/// while it is empty, so running this on every start is safe.
///
/// # Errors
/// Returns an error if any seed row is invalid or cannot be inserted.
pub async fn seed_from_config(db: &DatabaseConnection, config: &CatalogConfig) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    if Color::find().count(db).await? == 0 {
        for seed in &config.colors {
            add_color(db, &seed.name, &seed.hex_code).await?;
            summary.colors += 1;
        }
    }

    if Category::find().count(db).await? == 0 {
        for seed in &config.categories {
            let category = create_category(db, &seed.name, &seed.description).await?;
            summary.categories += 1;
            for size_name in &seed.sizes {
                create_size(db, &category.id, size_name).await?;
                summary.sizes += 1;
            }
        }
    }

    info!(
        colors = summary.colors,
        categories = summary.categories,
        sizes = summary.sizes,
        "Seeded reference data"
    );
    Ok(summary)
}
