//! Variant matrix - Keeps a product's variant records in step with its selected axes.
//!
//! A product is sold as the cartesian product of its selected colors and sizes
//! (or as sizes alone when no color is selected). Whenever either selection
//! changes the record list is rebuilt: records whose key survives are carried
//! over untouched (same allocation), new keys get a zero-valued record, and
//! keys that no longer appear are dropped. Removing a single record runs the
//! other way and contracts the selections to what remains.
//!
//! Records are held behind [`Arc`] so that carried-over records are observably
//! the same value, and edits go through [`Arc::make_mut`] (copy-on-write).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::debug;

use crate::errors::{Error, Result};

/// Identifies one cell of the matrix.
///
/// `color_id` is `None` for size-only variants. A literal color id `"null"`
/// is a distinct key from `None`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantKey {
    /// Color axis value, `None` when the product has no color axis
    pub color_id: Option<String>,
    /// Size axis value
    pub size_id: String,
}

impl VariantKey {
    /// Builds a key from an optional color and a size.
    pub fn new(color_id: Option<String>, size_id: impl Into<String>) -> Self {
        Self {
            color_id,
            size_id: size_id.into(),
        }
    }

    /// Key for a size-only variant.
    pub fn sized(size_id: impl Into<String>) -> Self {
        Self::new(None, size_id)
    }

    /// Key for a color × size variant.
    pub fn colored(color_id: impl Into<String>, size_id: impl Into<String>) -> Self {
        Self::new(Some(color_id.into()), size_id)
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.color_id.as_deref().unwrap_or("null"),
            self.size_id
        )
    }
}

/// One cell of the matrix: stock, pricing and media for a color × size pair.
///
/// Pricing fields are only changed through [`crate::core::pricing::VariantEdit`]
/// so that the discount and the mirrored selling price stay derived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantRecord {
    pub(crate) id: Option<String>,
    pub(crate) key: VariantKey,
    pub(crate) quantity: i32,
    pub(crate) sku: String,
    pub(crate) price: i64,
    pub(crate) mrp_price: i64,
    pub(crate) rsp_price: i64,
    pub(crate) cost_price: i64,
    pub(crate) discount_percentage: i32,
    pub(crate) image_urls: Vec<String>,
    pub(crate) video_urls: Vec<String>,
    pub(crate) created_at: NaiveDateTime,
    pub(crate) updated_at: NaiveDateTime,
}

impl VariantRecord {
    /// Fabricates a zero-valued, media-less record for `key`.
    #[must_use]
    pub fn new(key: VariantKey) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: None,
            key,
            quantity: 0,
            sku: String::new(),
            price: 0,
            mrp_price: 0,
            rsp_price: 0,
            cost_price: 0,
            discount_percentage: 0,
            image_urls: Vec::new(),
            video_urls: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Database row id, `None` until the record has been persisted.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Matrix key of this record.
    #[must_use]
    pub const fn key(&self) -> &VariantKey {
        &self.key
    }

    /// Units in stock.
    #[must_use]
    pub const fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Stock keeping unit.
    #[must_use]
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Selling price, mirrors `rsp_price`.
    #[must_use]
    pub const fn price(&self) -> i64 {
        self.price
    }

    /// Maximum retail price.
    #[must_use]
    pub const fn mrp_price(&self) -> i64 {
        self.mrp_price
    }

    /// Retail selling price.
    #[must_use]
    pub const fn rsp_price(&self) -> i64 {
        self.rsp_price
    }

    /// Purchase cost.
    #[must_use]
    pub const fn cost_price(&self) -> i64 {
        self.cost_price
    }

    /// Discount derived from MRP and RSP.
    #[must_use]
    pub const fn discount_percentage(&self) -> i32 {
        self.discount_percentage
    }

    /// Image links in the order they were added.
    #[must_use]
    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    /// Video links in the order they were added.
    #[must_use]
    pub fn video_urls(&self) -> &[String] {
        &self.video_urls
    }

    /// When the record was fabricated.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// When the record was last mutated.
    #[must_use]
    pub const fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}

/// Duplicate-free selection of axis values, kept in the order they were picked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AxisSelection(Vec<String>);

impl AxisSelection {
    /// Empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|selected| selected == id)
    }

    /// Selects `id`; returns false if it was already selected.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Deselects `id`; returns false if it was not selected.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|selected| selected != id);
        self.0.len() != before
    }

    /// Flips the selection of `id` and returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.0.push(id.to_string());
            true
        }
    }

    /// Iterates selected ids in pick order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compares membership, ignoring pick order.
    #[must_use]
    pub fn same_members(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|id| other.contains(id))
    }
}

impl<S: Into<String>> FromIterator<S> for AxisSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.insert(id);
        }
        selection
    }
}

/// Keys the matrix must contain for the given selections, colors outer and sizes inner.
#[must_use]
pub fn expected_keys(colors: &AxisSelection, sizes: &AxisSelection) -> Vec<VariantKey> {
    if colors.is_empty() {
        return sizes.iter().map(VariantKey::sized).collect();
    }

    colors
        .iter()
        .flat_map(|color| sizes.iter().map(move |size| VariantKey::colored(color, size)))
        .collect()
}

/// Rebuilds the record list for the given selections.
///
/// Existing records are reused by key (a later duplicate wins), missing keys
/// get a fresh zero-valued record and everything else is dropped.
#[must_use]
pub fn synchronize(
    previous: &[Arc<VariantRecord>],
    colors: &AxisSelection,
    sizes: &AxisSelection,
) -> Vec<Arc<VariantRecord>> {
    let existing: HashMap<&VariantKey, &Arc<VariantRecord>> =
        previous.iter().map(|record| (&record.key, record)).collect();

    expected_keys(colors, sizes)
        .into_iter()
        .map(|key| match existing.get(&key) {
            Some(record) => Arc::clone(record),
            None => Arc::new(VariantRecord::new(key)),
        })
        .collect()
}

/// A product's variant records together with the axis selections that drive them.
#[derive(Clone, Debug, Default)]
pub struct VariantMatrix {
    records: Vec<Arc<VariantRecord>>,
    selected_colors: AxisSelection,
    selected_sizes: AxisSelection,
}

impl VariantMatrix {
    /// Empty matrix with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matrix from already persisted records, deriving the selections
    /// from the colors and sizes they reference.
    #[must_use]
    pub fn from_records(records: Vec<VariantRecord>) -> Self {
        let records: Vec<Arc<VariantRecord>> = records.into_iter().map(Arc::new).collect();
        let (selected_colors, selected_sizes) = axes_of(&records);
        let mut matrix = Self {
            records,
            selected_colors,
            selected_sizes,
        };
        matrix.resync();
        matrix
    }

    /// Records in enumeration order.
    #[must_use]
    pub fn records(&self) -> &[Arc<VariantRecord>] {
        &self.records
    }

    /// Selected colors.
    #[must_use]
    pub const fn selected_colors(&self) -> &AxisSelection {
        &self.selected_colors
    }

    /// Selected sizes.
    #[must_use]
    pub const fn selected_sizes(&self) -> &AxisSelection {
        &self.selected_sizes
    }

    /// Looks a record up by key.
    #[must_use]
    pub fn get(&self, key: &VariantKey) -> Option<&Arc<VariantRecord>> {
        self.records.iter().find(|record| &record.key == key)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the matrix has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Flips a color and rebuilds. Returns whether the color is now selected.
    pub fn toggle_color(&mut self, color_id: &str) -> bool {
        let selected = self.selected_colors.toggle(color_id);
        self.resync();
        selected
    }

    /// Flips a size and rebuilds. Returns whether the size is now selected.
    pub fn toggle_size(&mut self, size_id: &str) -> bool {
        let selected = self.selected_sizes.toggle(size_id);
        self.resync();
        selected
    }

    /// Replaces both selections and rebuilds.
    pub fn set_axes(&mut self, colors: AxisSelection, sizes: AxisSelection) {
        self.selected_colors = colors;
        self.selected_sizes = sizes;
        self.resync();
    }

    /// Removes one record and contracts the selections to the colors and sizes
    /// still referenced by the remaining records, then rebuilds.
    ///
    /// # Errors
    /// Returns [`Error::VariantNotFound`] if no record has this key.
    pub fn remove_variant(&mut self, key: &VariantKey) -> Result<Arc<VariantRecord>> {
        let position = self
            .records
            .iter()
            .position(|record| &record.key == key)
            .ok_or_else(|| Error::VariantNotFound {
                key: key.to_string(),
            })?;
        let removed = self.records.remove(position);

        let (colors, sizes) = axes_of(&self.records);
        debug!(
            variant = %key,
            colors = colors.len(),
            sizes = sizes.len(),
            "Removed variant, contracting axis selections"
        );
        self.set_axes(colors, sizes);

        Ok(removed)
    }

    /// Re-runs the synchronizer against the current selections.
    pub(crate) fn resync(&mut self) {
        let previous = self.records.len();
        self.records = synchronize(&self.records, &self.selected_colors, &self.selected_sizes);
        debug!(
            previous,
            current = self.records.len(),
            colors = self.selected_colors.len(),
            sizes = self.selected_sizes.len(),
            "Rebuilt variant matrix"
        );
    }

    /// Mutable access to one record, cloning it first if it is shared.
    pub(crate) fn record_mut(&mut self, key: &VariantKey) -> Result<&mut VariantRecord> {
        self.records
            .iter_mut()
            .find(|record| &record.key == key)
            .map(Arc::make_mut)
            .ok_or_else(|| Error::VariantNotFound {
                key: key.to_string(),
            })
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<Arc<VariantRecord>> {
        &mut self.records
    }

    pub(crate) fn selected_sizes_mut(&mut self) -> &mut AxisSelection {
        &mut self.selected_sizes
    }
}

/// Distinct non-null colors and distinct sizes referenced by `records`, in first-seen order.
fn axes_of(records: &[Arc<VariantRecord>]) -> (AxisSelection, AxisSelection) {
    let colors = records
        .iter()
        .filter_map(|record| record.key.color_id.clone())
        .collect();
    let sizes = records
        .iter()
        .map(|record| record.key.size_id.clone())
        .collect();
    (colors, sizes)
}
