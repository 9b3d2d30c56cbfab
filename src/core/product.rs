//! Product business logic - Saving and loading a product together with its variant matrix.
//!
//! A save writes the product row first and aborts if that fails. Variant rows
//! are then written one at a time, matched to existing rows by
//! `(color_id, size_id)`: existing keys are updated, new keys inserted. A
//! failing row is logged and reported but does not stop the remaining rows,
//! and nothing already written is rolled back. Rows whose key is no longer in
//! the matrix are deleted in one batch at the end. The review list is
//! replaced last; a review failure is reported the same way.

use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    core::{
        matrix::{VariantKey, VariantMatrix, VariantRecord},
        review::{self, ReviewDraft},
    },
    entities::{
        Product, ProductVariant,
        product::{self, FeaturedType},
        product_variant::{self, MediaUrls},
    },
    errors::{Error, Result},
};

/// Product fields edited on the product form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Product name (required)
    pub name: String,
    /// Long description
    pub description: String,
    /// Owning category (required)
    pub category_id: String,
    /// Return policy text
    pub return_policy: String,
    /// Supplying vendor
    pub vendor_name: String,
    /// Vendor name shown to shoppers
    pub alias_vendor: String,
    /// Whether the product is visible in the storefront
    pub is_active: bool,
    /// Optional merchandising shelf
    pub featured_type: Option<FeaturedType>,
    /// Curated reviews, replaced as a whole on save
    pub reviews: Vec<ReviewDraft>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category_id: String::new(),
            return_policy: String::new(),
            vendor_name: String::new(),
            alias_vendor: String::new(),
            is_active: true,
            featured_type: None,
            reviews: Vec::new(),
        }
    }
}

/// A variant row that could not be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantWriteFailure {
    /// Key of the record that failed
    pub key: VariantKey,
    /// Backend error text
    pub message: String,
}

/// What a save actually did to the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Id of the saved product
    pub product_id: String,
    /// Variant rows inserted
    pub inserted: usize,
    /// Variant rows updated
    pub updated: usize,
    /// Stale variant rows deleted
    pub deleted: u64,
    /// Variant rows whose write failed
    pub failures: Vec<VariantWriteFailure>,
    /// Error text if the stale-row deletion failed
    pub delete_failure: Option<String>,
    /// Reviews stored by this save
    pub reviews_saved: usize,
    /// Error text if replacing the reviews failed
    pub review_failure: Option<String>,
}

impl SaveReport {
    /// True when storage now matches the matrix that was saved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.delete_failure.is_none() && self.review_failure.is_none()
    }
}

/// A stored product with its rebuilt matrix and review list.
#[derive(Clone, Debug)]
pub struct LoadedProduct {
    /// The product row
    pub product: product::Model,
    /// Variant matrix rebuilt from the stored variant rows
    pub matrix: VariantMatrix,
    /// Stored reviews, oldest first
    pub reviews: Vec<ReviewDraft>,
}

impl LoadedProduct {
    /// The product form pre-filled from the stored row and reviews.
    #[must_use]
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.product.name.clone(),
            description: self.product.description.clone(),
            category_id: self.product.category_id.clone(),
            return_policy: self.product.return_policy.clone(),
            vendor_name: self.product.vendor_name.clone(),
            alias_vendor: self.product.alias_vendor.clone(),
            is_active: self.product.is_active,
            featured_type: self.product.featured_type,
            reviews: self.reviews.clone(),
        }
    }
}

impl From<product_variant::Model> for VariantRecord {
    fn from(row: product_variant::Model) -> Self {
        Self {
            id: Some(row.id),
            key: VariantKey::new(row.color_id, row.size_id),
            quantity: row.quantity,
            sku: row.sku,
            price: row.price,
            mrp_price: row.mrp_price,
            rsp_price: row.rsp_price,
            cost_price: row.cost_price,
            discount_percentage: row.discount_percentage,
            image_urls: row.image_urls.0,
            video_urls: row.video_urls.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn row_key(row: &product_variant::Model) -> VariantKey {
    VariantKey::new(row.color_id.clone(), row.size_id.clone())
}

/// Checks the form before anything is sent to the backend.
///
/// # Errors
/// Returns [`Error::Validation`] when the name or category is missing, no size
/// is selected, the matrix has no variants, or a review rating is out of range.
pub fn validate_submission(draft: &ProductDraft, matrix: &VariantMatrix) -> Result<()> {
    if draft.name.trim().is_empty() || draft.category_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "Please fill all required fields".to_string(),
        });
    }
    if matrix.selected_sizes().is_empty() {
        return Err(Error::Validation {
            message: "Select at least one size".to_string(),
        });
    }
    if matrix.is_empty() {
        return Err(Error::Validation {
            message: "Please configure at least one variant".to_string(),
        });
    }
    review::validate_reviews(&draft.reviews)
}

/// Variant columns shared by inserts and updates; `id` and `created_at` are left unset.
fn variant_columns(
    product_id: &str,
    record: &VariantRecord,
    now: DateTime,
) -> product_variant::ActiveModel {
    product_variant::ActiveModel {
        product_id: Set(product_id.to_string()),
        color_id: Set(record.key.color_id.clone()),
        size_id: Set(record.key.size_id.clone()),
        quantity: Set(record.quantity),
        price: Set(record.price),
        sku: Set(record.sku.clone()),
        mrp_price: Set(record.mrp_price),
        rsp_price: Set(record.rsp_price),
        cost_price: Set(record.cost_price),
        discount_percentage: Set(record.discount_percentage),
        image_urls: Set(MediaUrls(record.image_urls.clone())),
        video_urls: Set(MediaUrls(record.video_urls.clone())),
        updated_at: Set(now),
        ..Default::default()
    }
}

async fn write_product_row(
    db: &DatabaseConnection,
    existing_id: Option<&str>,
    draft: &ProductDraft,
    now: DateTime,
) -> Result<product::Model> {
    let mut row: product::ActiveModel = match existing_id {
        Some(id) => Product::find_by_id(id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| Error::ProductNotFound { id: id.to_string() })?
            .into(),
        None => product::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            like_count: Set(0),
            display_order_within_feature: Set(None),
            created_at: Set(now),
            ..Default::default()
        },
    };

    row.name = Set(draft.name.trim().to_string());
    row.description = Set(draft.description.trim().to_string());
    row.category_id = Set(draft.category_id.clone());
    row.return_policy = Set(draft.return_policy.clone());
    row.vendor_name = Set(draft.vendor_name.clone());
    row.alias_vendor = Set(draft.alias_vendor.clone());
    row.is_active = Set(draft.is_active);
    row.featured_type = Set(draft.featured_type);
    row.updated_at = Set(now);

    if existing_id.is_some() {
        row.update(db).await.map_err(Into::into)
    } else {
        row.insert(db).await.map_err(Into::into)
    }
}

/// Saves the product row and synchronizes its variant rows with `matrix`.
///
/// Pass `existing_id` to edit a product, `None` to create one.
///
/// # Errors
/// Returns an error if validation fails, the product row cannot be written,
/// or the existing variant rows cannot be read. Individual variant write
/// failures are not errors; they are listed in the returned [`SaveReport`].
pub async fn save_product(
    db: &DatabaseConnection,
    existing_id: Option<&str>,
    draft: &ProductDraft,
    matrix: &VariantMatrix,
) -> Result<SaveReport> {
    validate_submission(draft, matrix)?;

    let now = chrono::Utc::now().naive_utc();
    let product = write_product_row(db, existing_id, draft, now)
        .await
        .inspect_err(|e| error!("Failed to save product '{}': {e}", draft.name))?;

    let existing_rows = ProductVariant::find()
        .filter(product_variant::Column::ProductId.eq(product.id.as_str()))
        .all(db)
        .await
        .inspect_err(|e| error!("Failed to fetch variants of product {}: {e}", product.id))?;
    let existing_ids: HashMap<VariantKey, String> = existing_rows
        .iter()
        .map(|row| (row_key(row), row.id.clone()))
        .collect();

    let mut report = SaveReport {
        product_id: product.id.clone(),
        ..SaveReport::default()
    };

    for record in matrix.records() {
        let mut row = variant_columns(&product.id, record, now);
        let written = if let Some(id) = existing_ids.get(&record.key) {
            row.id = Set(id.clone());
            row.update(db).await.map(|_| report.updated += 1)
        } else {
            row.id = Set(Uuid::new_v4().to_string());
            row.created_at = Set(now);
            row.insert(db).await.map(|_| report.inserted += 1)
        };

        if let Err(e) = written {
            error!(variant = %record.key, "Failed to write variant of product {}: {e}", product.id);
            report.failures.push(VariantWriteFailure {
                key: record.key.clone(),
                message: e.to_string(),
            });
        }
    }

    let wanted: HashSet<&VariantKey> = matrix.records().iter().map(|record| &record.key).collect();
    let stale: Vec<String> = existing_rows
        .iter()
        .filter(|row| !wanted.contains(&row_key(row)))
        .map(|row| row.id.clone())
        .collect();

    if !stale.is_empty() {
        match ProductVariant::delete_many()
            .filter(product_variant::Column::Id.is_in(stale))
            .exec(db)
            .await
        {
            Ok(result) => report.deleted = result.rows_affected,
            Err(e) => {
                error!("Failed to delete stale variants of product {}: {e}", product.id);
                report.delete_failure = Some(e.to_string());
            }
        }
    }

    match review::replace_reviews(db, &product.id, &draft.reviews).await {
        Ok(saved) => report.reviews_saved = saved,
        Err(e) => {
            error!("Failed to save reviews of product {}: {e}", product.id);
            report.review_failure = Some(e.to_string());
        }
    }

    if report.is_complete() {
        info!(
            product = %product.id,
            inserted = report.inserted,
            updated = report.updated,
            deleted = report.deleted,
            "Product saved"
        );
    } else {
        warn!(
            product = %product.id,
            failed = report.failures.len(),
            "Product saved with variant failures; storage differs from the form"
        );
    }

    Ok(report)
}

/// Loads a product, rebuilds its variant matrix from the stored rows and
/// reads its reviews.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if the product does not exist, or a
/// database error if a query fails.
pub async fn load_product(db: &DatabaseConnection, product_id: &str) -> Result<LoadedProduct> {
    let product = Product::find_by_id(product_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: product_id.to_string(),
        })?;

    let rows = ProductVariant::find()
        .filter(product_variant::Column::ProductId.eq(product_id))
        .order_by_asc(product_variant::Column::CreatedAt)
        .all(db)
        .await?;

    let matrix = VariantMatrix::from_records(rows.into_iter().map(VariantRecord::from).collect());
    let reviews = review::get_reviews_for_product(db, product_id)
        .await?
        .into_iter()
        .map(ReviewDraft::from)
        .collect();

    Ok(LoadedProduct {
        product,
        matrix,
        reviews,
    })
}

/// Flips a product's storefront visibility and returns the updated row.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if the product does not exist, or a
/// database error if the update fails.
pub async fn toggle_product_active(
    db: &DatabaseConnection,
    product_id: &str,
) -> Result<product::Model> {
    let current = Product::find_by_id(product_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: product_id.to_string(),
        })?;
    let is_active = !current.is_active;

    let mut row: product::ActiveModel = current.into();
    row.is_active = Set(is_active);
    row.updated_at = Set(chrono::Utc::now().naive_utc());
    let updated = row.update(db).await?;

    info!(product = %product_id, is_active, "Product visibility changed");
    Ok(updated)
}

/// Products of one category, ordered by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_products_for_category(
    db: &DatabaseConnection,
    category_id: &str,
) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Products on one featured shelf, in shelf order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_featured_products(
    db: &DatabaseConnection,
    featured: FeaturedType,
) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::FeaturedType.eq(featured))
        .order_by_asc(product::Column::DisplayOrderWithinFeature)
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a product with all of its variant and review rows.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if no product row was deleted, or a
/// database error if a delete fails.
pub async fn delete_product(db: &DatabaseConnection, product_id: &str) -> Result<()> {
    review::delete_reviews(db, product_id).await?;
    ProductVariant::delete_many()
        .filter(product_variant::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    let result = Product::delete_by_id(product_id.to_string()).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound {
            id: product_id.to_string(),
        });
    }

    info!(product = %product_id, "Product deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{
            matrix::AxisSelection,
            media::MediaKind,
            pricing::VariantEdit,
        },
        test_utils::*,
    };
    use sea_orm::{ConnectionTrait, DatabaseBackend, MockDatabase};

    fn axis(ids: &[&str]) -> AxisSelection {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_validate_submission() {
        let mut matrix = VariantMatrix::new();
        let mut draft = ProductDraft {
            name: "  ".to_string(),
            category_id: "cat".to_string(),
            ..ProductDraft::default()
        };

        let err = validate_submission(&draft, &matrix).unwrap_err();
        assert!(matches!(err, Error::Validation { message } if message == "Please fill all required fields"));

        draft.name = "Kurti".to_string();
        let err = validate_submission(&draft, &matrix).unwrap_err();
        assert!(matches!(err, Error::Validation { message } if message == "Select at least one size"));

        matrix.set_axes(AxisSelection::new(), axis(&["S"]));
        assert!(validate_submission(&draft, &matrix).is_ok());

        draft.category_id = String::new();
        assert!(validate_submission(&draft, &matrix).is_err());
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_form_before_any_query() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = save_product(&db, None, &ProductDraft::default(), &VariantMatrix::new()).await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_create_product_with_variants() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(axis(&["red", "blue"]), axis(&["S", "M"]));
        matrix.edit_variant(&VariantKey::colored("red", "S"), VariantEdit::MrpPrice(1000.0))?;
        matrix.edit_variant(&VariantKey::colored("red", "S"), VariantEdit::RspPrice(800.0))?;
        matrix.add_media(
            &VariantKey::colored("red", "S"),
            &["https://cdn.example/red-s.jpg".to_string()],
            MediaKind::Image,
        )?;

        let report = save_product(&db, None, &test_draft(&category.id), &matrix).await?;

        assert!(report.is_complete());
        assert_eq!(report.inserted, 4);
        assert_eq!(report.updated, 0);

        let LoadedProduct {
            product,
            matrix: loaded,
            reviews,
        } = load_product(&db, &report.product_id).await?;
        assert_eq!(product.name, "Cotton Kurti");
        assert!(reviews.is_empty());
        assert_eq!(product.like_count, 0);
        assert_eq!(loaded.len(), 4);
        assert!(loaded.selected_colors().same_members(&axis(&["red", "blue"])));
        assert!(loaded.selected_sizes().same_members(&axis(&["S", "M"])));

        let red_small = loaded.get(&VariantKey::colored("red", "S")).unwrap();
        assert!(red_small.id().is_some());
        assert_eq!(red_small.price(), 800);
        assert_eq!(red_small.discount_percentage(), 20);
        assert_eq!(red_small.image_urls(), ["https://cdn.example/red-s.jpg".to_string()].as_slice());
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_updates_inserts_and_deletes() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S", "M"]));
        let first = save_product(&db, None, &test_draft(&category.id), &matrix).await?;

        let mut matrix = load_product(&db, &first.product_id).await?.matrix;
        matrix.edit_variant(&VariantKey::sized("S"), VariantEdit::Quantity(40))?;
        matrix.toggle_size("M");
        matrix.toggle_size("L");
        let mut draft = test_draft(&category.id);
        draft.name = "Cotton Kurti v2".to_string();

        let second = save_product(&db, Some(&first.product_id), &draft, &matrix).await?;

        assert_eq!(second.product_id, first.product_id);
        assert_eq!(second.updated, 1);
        assert_eq!(second.inserted, 1);
        assert_eq!(second.deleted, 1);

        let LoadedProduct {
            product,
            matrix: reloaded,
            ..
        } = load_product(&db, &first.product_id).await?;
        assert_eq!(product.name, "Cotton Kurti v2");
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get(&VariantKey::sized("S")).unwrap().quantity(), 40);
        assert!(reloaded.get(&VariantKey::sized("M")).is_none());
        assert!(reloaded.get(&VariantKey::sized("L")).is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_variant_row_does_not_stop_the_rest() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        db.execute_unprepared(
            "CREATE TRIGGER reject_broken_sku BEFORE INSERT ON product_variants \
             WHEN NEW.sku = 'BROKEN' BEGIN SELECT RAISE(ABORT, 'sku rejected'); END;",
        )
        .await?;

        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S", "M", "L"]));
        matrix.edit_variant(&VariantKey::sized("M"), VariantEdit::Sku("BROKEN".to_string()))?;

        let report = save_product(&db, None, &test_draft(&category.id), &matrix).await?;

        assert!(!report.is_complete());
        assert_eq!(report.inserted, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key, VariantKey::sized("M"));

        // Storage diverges from the form: the failed row is simply absent.
        let stored = load_product(&db, &report.product_id).await?.matrix;
        assert_eq!(stored.len(), 2);
        assert!(stored.get(&VariantKey::sized("S")).unwrap().id().is_some());
        assert!(stored.get(&VariantKey::sized("L")).unwrap().id().is_some());
        assert!(stored.get(&VariantKey::sized("M")).is_none());
        Ok(())
    }

    fn sample_review(name: &str, rating: i32) -> ReviewDraft {
        ReviewDraft {
            reviewer_name: name.to_string(),
            rating,
            comment: format!("{name} liked it"),
            ..ReviewDraft::new()
        }
    }

    #[tokio::test]
    async fn test_reviews_are_replaced_on_each_save() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S"]));
        let mut draft = test_draft(&category.id);
        draft.reviews = vec![sample_review("Asha", 5), sample_review("Meera", 4)];

        let first = save_product(&db, None, &draft, &matrix).await?;
        assert!(first.is_complete());
        assert_eq!(first.reviews_saved, 2);

        let loaded = load_product(&db, &first.product_id).await?;
        assert_eq!(loaded.reviews.len(), 2);
        let mut edited = loaded.draft();
        assert_eq!(edited.name, "Cotton Kurti");
        edited.reviews.retain(|review| review.reviewer_name == "Meera");
        edited.reviews[0].toggle_verified();

        let second = save_product(&db, Some(&first.product_id), &edited, &loaded.matrix).await?;
        assert_eq!(second.reviews_saved, 1);

        let reloaded = load_product(&db, &first.product_id).await?;
        assert_eq!(reloaded.reviews.len(), 1);
        assert_eq!(reloaded.reviews[0].reviewer_name, "Meera");
        assert!(reloaded.reviews[0].is_verified);

        edited.reviews.clear();
        save_product(&db, Some(&first.product_id), &edited, &reloaded.matrix).await?;
        assert!(load_product(&db, &first.product_id).await?.reviews.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_review_rating_blocks_save() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S"]));
        let mut draft = test_draft("cat");
        draft.reviews = vec![sample_review("Asha", 9)];

        let result = save_product(&db, None, &draft, &matrix).await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_review_failure_is_reported_not_fatal() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        db.execute_unprepared(
            "CREATE TRIGGER reject_reviews BEFORE INSERT ON product_reviews \
             BEGIN SELECT RAISE(ABORT, 'reviews closed'); END;",
        )
        .await?;
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S"]));
        let mut draft = test_draft(&category.id);
        draft.reviews = vec![sample_review("Asha", 5)];

        let report = save_product(&db, None, &draft, &matrix).await?;

        assert!(!report.is_complete());
        assert!(report.failures.is_empty());
        assert_eq!(report.inserted, 1);
        assert_eq!(report.reviews_saved, 0);
        assert!(report.review_failure.is_some());
        assert!(load_product(&db, &report.product_id).await?.reviews.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_product_active() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S"]));
        let report = save_product(&db, None, &test_draft(&category.id), &matrix).await?;

        let hidden = toggle_product_active(&db, &report.product_id).await?;
        assert!(!hidden.is_active);
        let shown = toggle_product_active(&db, &report.product_id).await?;
        assert!(shown.is_active);
        assert!(shown.updated_at >= hidden.updated_at);

        assert!(matches!(
            toggle_product_active(&db, "missing").await,
            Err(Error::ProductNotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_save_unknown_product_fails() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S"]));

        let result = save_product(&db, Some("missing"), &test_draft(&category.id), &matrix).await;

        assert!(matches!(result, Err(Error::ProductNotFound { id }) if id == "missing"));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_removes_variants() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S", "M"]));
        let mut draft = test_draft(&category.id);
        draft.reviews = vec![sample_review("Asha", 5)];
        let report = save_product(&db, None, &draft, &matrix).await?;

        delete_product(&db, &report.product_id).await?;

        assert!(matches!(
            load_product(&db, &report.product_id).await,
            Err(Error::ProductNotFound { .. })
        ));
        let orphans = ProductVariant::find()
            .filter(product_variant::Column::ProductId.eq(report.product_id.as_str()))
            .all(&db)
            .await?;
        assert!(orphans.is_empty());
        assert!(review::get_reviews_for_product(&db, &report.product_id).await?.is_empty());
        assert!(matches!(
            delete_product(&db, &report.product_id).await,
            Err(Error::ProductNotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_products_for_category_and_shelf() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S"]));

        let mut draft = test_draft(&category.id);
        draft.featured_type = Some(FeaturedType::Trending);
        save_product(&db, None, &draft, &matrix).await?;
        draft.name = "Anarkali".to_string();
        draft.featured_type = None;
        save_product(&db, None, &draft, &matrix).await?;

        let all = get_products_for_category(&db, &category.id).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Anarkali");

        let trending = get_featured_products(&db, FeaturedType::Trending).await?;
        assert_eq!(trending.len(), 1);
        assert_eq!(trending[0].name, "Cotton Kurti");
        Ok(())
    }
}
