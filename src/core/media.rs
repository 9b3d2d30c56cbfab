//! Variant media - Attaching uploaded image and video links to variant records.
//!
//! Uploads are shared across colors: the operator picks the sizes an upload
//! belongs to and every record of those sizes receives the links. Sizes that
//! have no record yet are added to the selection, and the records the rebuild
//! creates for them carry the links as well.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::{
    core::matrix::{AxisSelection, VariantKey, VariantMatrix, VariantRecord},
    errors::{Error, Result},
};

/// Which media list of a record an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still images
    Image,
    /// Video clips
    Video,
}

/// Outcome of a size fan-out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaAssignment {
    /// Existing records that received the links
    pub updated: usize,
    /// Records fabricated for newly selected sizes that received the links
    pub created: usize,
    /// Sizes that were added to the size selection
    pub widened_sizes: Vec<String>,
}

impl VariantRecord {
    pub(crate) fn media_mut(&mut self, kind: MediaKind) -> &mut Vec<String> {
        match kind {
            MediaKind::Image => &mut self.image_urls,
            MediaKind::Video => &mut self.video_urls,
        }
    }

    /// Links of the given kind.
    #[must_use]
    pub fn media(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Image => &self.image_urls,
            MediaKind::Video => &self.video_urls,
        }
    }
}

/// Merges `urls` into every record of `size_id`; returns how many records matched.
fn merge_into_size(
    records: &mut [Arc<VariantRecord>],
    size_id: &str,
    urls: &[String],
    kind: MediaKind,
) -> usize {
    let mut matched = 0;
    for record in records.iter_mut().filter(|record| record.key().size_id == size_id) {
        let record = Arc::make_mut(record);
        merge_unique(record.media_mut(kind), urls);
        record.touch();
        matched += 1;
    }
    matched
}

/// Appends `incoming` to `existing` as an ordered set union.
fn merge_unique(existing: &mut Vec<String>, incoming: &[String]) {
    let mut merged: Vec<String> = Vec::with_capacity(existing.len() + incoming.len());
    for url in existing.drain(..).chain(incoming.iter().cloned()) {
        if !merged.contains(&url) {
            merged.push(url);
        }
    }
    *existing = merged;
}

impl VariantMatrix {
    /// Gives every record of each target size the new links. Target sizes
    /// that are not selected yet are added to the size selection, the matrix
    /// is rebuilt, and the records the rebuild fabricated for those sizes
    /// (one per selected color, or a size-only record) receive the links too.
    ///
    /// # Errors
    /// Returns [`Error::EmptyMediaTarget`] when `target_sizes` is empty; the
    /// matrix is left untouched.
    pub fn assign_media_to_sizes(
        &mut self,
        urls: &[String],
        kind: MediaKind,
        target_sizes: &AxisSelection,
    ) -> Result<MediaAssignment> {
        if target_sizes.is_empty() {
            return Err(Error::EmptyMediaTarget);
        }

        let mut outcome = MediaAssignment::default();
        let mut missing = Vec::new();
        for size_id in target_sizes.iter() {
            let updated = merge_into_size(self.records_mut(), size_id, urls, kind);
            if updated == 0 {
                missing.push(size_id);
            }
            outcome.updated += updated;
        }

        for size_id in target_sizes.iter() {
            if self.selected_sizes_mut().insert(size_id) {
                outcome.widened_sizes.push(size_id.to_string());
            }
        }
        if !outcome.widened_sizes.is_empty() {
            self.resync();
        }

        // Records for sizes that had none only exist after the rebuild.
        for size_id in missing {
            outcome.created += merge_into_size(self.records_mut(), size_id, urls, kind);
        }

        info!(
            ?kind,
            links = urls.len(),
            updated = outcome.updated,
            created = outcome.created,
            widened = outcome.widened_sizes.len(),
            "Assigned media to sizes"
        );
        Ok(outcome)
    }

    /// Removes a link from every record that carries it. Returns how many
    /// records changed; records without the link are left shared.
    pub fn remove_media_everywhere(&mut self, url: &str, kind: MediaKind) -> usize {
        let mut changed = 0;
        for record in self.records_mut().iter_mut() {
            if record.media(kind).iter().any(|existing| existing == url) {
                let record = Arc::make_mut(record);
                record.media_mut(kind).retain(|existing| existing != url);
                record.touch();
                changed += 1;
            }
        }
        changed
    }

    /// Appends links to one record in the given order.
    ///
    /// # Errors
    /// Returns [`Error::VariantNotFound`] if no record has this key.
    pub fn add_media(&mut self, key: &VariantKey, urls: &[String], kind: MediaKind) -> Result<()> {
        let record = self.record_mut(key)?;
        record.media_mut(kind).extend_from_slice(urls);
        record.touch();
        Ok(())
    }

    /// Removes the link at `index` from one record and returns it.
    ///
    /// # Errors
    /// Returns an error if no record has this key or the index is out of range.
    pub fn remove_media_at(
        &mut self,
        key: &VariantKey,
        index: usize,
        kind: MediaKind,
    ) -> Result<String> {
        let available = self
            .get(key)
            .ok_or_else(|| Error::VariantNotFound {
                key: key.to_string(),
            })?
            .media(kind)
            .len();
        if index >= available {
            return Err(Error::Validation {
                message: format!("Variant {key} has no {kind:?} at position {index}"),
            });
        }

        let record = self.record_mut(key)?;
        let removed = record.media_mut(kind).remove(index);
        record.touch();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn axis(ids: &[&str]) -> AxisSelection {
        ids.iter().copied().collect()
    }

    fn links(urls: &[&str]) -> Vec<String> {
        urls.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_target_is_rejected() {
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S"]));

        let result = matrix.assign_media_to_sizes(&links(&["a.jpg"]), MediaKind::Image, &axis(&[]));

        assert!(matches!(result, Err(Error::EmptyMediaTarget)));
        assert!(matrix.records()[0].image_urls().is_empty());
    }

    #[test]
    fn test_assignment_reaches_every_color_of_a_size() {
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(axis(&["red", "blue"]), axis(&["S", "M"]));

        let outcome = matrix
            .assign_media_to_sizes(&links(&["s1.jpg", "s2.jpg"]), MediaKind::Image, &axis(&["S"]))
            .unwrap();

        assert_eq!(outcome.updated, 2);
        assert_eq!(outcome.created, 0);
        assert!(outcome.widened_sizes.is_empty());
        for color in ["red", "blue"] {
            let small = matrix.get(&VariantKey::colored(color, "S")).unwrap();
            assert_eq!(small.image_urls(), links(&["s1.jpg", "s2.jpg"]).as_slice());
            let medium = matrix.get(&VariantKey::colored(color, "M")).unwrap();
            assert!(medium.image_urls().is_empty());
        }
    }

    #[test]
    fn test_assignment_does_not_duplicate_links() {
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S"]));
        matrix
            .add_media(&VariantKey::sized("S"), &links(&["a.mp4"]), MediaKind::Video)
            .unwrap();

        matrix
            .assign_media_to_sizes(&links(&["a.mp4", "b.mp4"]), MediaKind::Video, &axis(&["S"]))
            .unwrap();

        let record = matrix.get(&VariantKey::sized("S")).unwrap();
        assert_eq!(record.video_urls(), links(&["a.mp4", "b.mp4"]).as_slice());
        assert!(record.image_urls().is_empty());
    }

    #[test]
    fn test_new_size_gets_record_and_widens_selection() {
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S"]));

        let outcome = matrix
            .assign_media_to_sizes(&links(&["l.jpg"]), MediaKind::Image, &axis(&["S", "L"]))
            .unwrap();

        assert_eq!(outcome.updated, 1);
        assert_eq!(outcome.created, 1);
        assert_eq!(outcome.widened_sizes, vec!["L".to_string()]);
        assert_eq!(matrix.selected_sizes(), &axis(&["S", "L"]));

        let large = matrix.get(&VariantKey::sized("L")).unwrap();
        assert_eq!(large.image_urls(), links(&["l.jpg"]).as_slice());
        assert_eq!(matrix.len(), 2);
    }

    #[test]
    fn test_new_size_on_colored_matrix_gets_links_for_every_color() {
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(axis(&["red", "blue"]), axis(&["S"]));

        let outcome = matrix
            .assign_media_to_sizes(&links(&["m.jpg"]), MediaKind::Image, &axis(&["M"]))
            .unwrap();

        assert_eq!(outcome.updated, 0);
        assert_eq!(outcome.created, 2);
        assert_eq!(outcome.widened_sizes, vec!["M".to_string()]);
        assert_eq!(matrix.selected_sizes(), &axis(&["S", "M"]));
        assert_eq!(matrix.len(), 4);
        assert!(matrix.get(&VariantKey::sized("M")).is_none());
        for color in ["red", "blue"] {
            let medium = matrix.get(&VariantKey::colored(color, "M")).unwrap();
            assert_eq!(medium.image_urls(), links(&["m.jpg"]).as_slice());
            let small = matrix.get(&VariantKey::colored(color, "S")).unwrap();
            assert!(small.image_urls().is_empty());
        }
    }

    #[test]
    fn test_mixed_target_updates_existing_and_fills_new_size() {
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(axis(&["red"]), axis(&["S"]));
        let carriers = |matrix: &VariantMatrix| {
            matrix
                .records()
                .iter()
                .filter(|record| record.video_urls().contains(&"clip.mp4".to_string()))
                .count()
        };

        let outcome = matrix
            .assign_media_to_sizes(&links(&["clip.mp4"]), MediaKind::Video, &axis(&["S", "L"]))
            .unwrap();

        assert_eq!((outcome.updated, outcome.created), (1, 1));
        assert_eq!(carriers(&matrix), 2);
        assert_eq!(carriers(&matrix), outcome.updated + outcome.created);
    }

    #[test]
    fn test_remove_media_everywhere_only_touches_carriers() {
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S", "M"]));
        matrix
            .add_media(&VariantKey::sized("S"), &links(&["x.jpg", "y.jpg"]), MediaKind::Image)
            .unwrap();
        let untouched = Arc::clone(&matrix.records()[1]);

        let changed = matrix.remove_media_everywhere("x.jpg", MediaKind::Image);

        assert_eq!(changed, 1);
        assert_eq!(matrix.records()[0].image_urls(), links(&["y.jpg"]).as_slice());
        assert!(Arc::ptr_eq(&untouched, &matrix.records()[1]));
    }

    #[test]
    fn test_remove_media_at_index() {
        let mut matrix = VariantMatrix::new();
        matrix.set_axes(AxisSelection::new(), axis(&["S"]));
        let key = VariantKey::sized("S");
        matrix
            .add_media(&key, &links(&["1.jpg", "2.jpg", "3.jpg"]), MediaKind::Image)
            .unwrap();

        assert_eq!(matrix.remove_media_at(&key, 1, MediaKind::Image).unwrap(), "2.jpg");
        assert_eq!(matrix.get(&key).unwrap().image_urls(), links(&["1.jpg", "3.jpg"]).as_slice());
        assert!(matches!(
            matrix.remove_media_at(&key, 5, MediaKind::Image),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            matrix.remove_media_at(&key, 0, MediaKind::Video),
            Err(Error::Validation { .. })
        ));
    }
}
