//! Shared test utilities for the catalog admin core.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{catalog, product::ProductDraft},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an active test category with an empty description.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    catalog::create_category(db, name, "").await
}

/// Sets up a complete test environment with one category.
/// Returns (db, category) for product-related tests.
pub async fn setup_with_category() -> Result<(DatabaseConnection, entities::category::Model)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "Kurtis").await?;
    Ok((db, category))
}

/// A valid product form for `category_id`.
///
/// # Defaults
/// * `name`: "Cotton Kurti"
/// * `vendor_name`: "Jaipur Looms"
/// * `is_active`: true
pub fn test_draft(category_id: &str) -> ProductDraft {
    ProductDraft {
        name: "Cotton Kurti".to_string(),
        description: "Hand block printed cotton".to_string(),
        category_id: category_id.to_string(),
        return_policy: "7 days".to_string(),
        vendor_name: "Jaipur Looms".to_string(),
        alias_vendor: "JL".to_string(),
        ..ProductDraft::default()
    }
}
