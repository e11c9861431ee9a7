//! In-memory label store for the currently open image.
//!
//! The store is the single source of truth for committed labels. It is
//! single-writer: all mutation happens through the active gesture on the
//! UI event thread, so no locking is needed. Insertion order is preserved
//! because hit-testing tie-breaks on it.

use crate::error::EngineError;
use crate::model::{Label, LabelId};

/// Insertion-ordered collection of labels, unique by ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelStore {
    labels: Vec<Label>,
}

impl LabelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All labels in insertion order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Owned copy of the current label set, e.g. for a persistence payload.
    pub fn to_vec(&self) -> Vec<Label> {
        self.labels.clone()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether a label with this ID is present.
    pub fn contains(&self, id: LabelId) -> bool {
        self.labels.iter().any(|l| l.id == id)
    }

    /// Get a label by ID.
    pub fn get(&self, id: LabelId) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }

    /// Get a mutable reference to a label by ID.
    pub fn get_mut(&mut self, id: LabelId) -> Option<&mut Label> {
        self.labels.iter_mut().find(|l| l.id == id)
    }

    /// Atomically replace the whole collection. Used when the active image
    /// changes.
    pub fn replace_all(&mut self, labels: Vec<Label>) {
        self.labels = labels;
        self.dedup_by_id();
    }

    /// Add or replace labels by ID. A replaced label keeps its position;
    /// new labels are appended in the given order.
    pub fn upsert_many(&mut self, labels: Vec<Label>) {
        for label in labels {
            match self.labels.iter_mut().find(|l| l.id == label.id) {
                Some(existing) => *existing = label,
                None => self.labels.push(label),
            }
        }
    }

    /// Remove labels by ID. Returns how many were removed.
    pub fn remove_by_ids(&mut self, ids: &[LabelId]) -> usize {
        let before = self.labels.len();
        self.labels.retain(|l| !ids.contains(&l.id));
        before - self.labels.len()
    }

    /// Clone the labels matching `ids`, in store order. Used to snapshot a
    /// selection before a drag starts so the transform math operates on a
    /// frozen baseline.
    pub fn filter_by_ids(&self, ids: &[LabelId]) -> Vec<Label> {
        self.labels
            .iter()
            .filter(|l| ids.contains(&l.id))
            .cloned()
            .collect()
    }

    /// Remove and return the labels matching `ids`, in store order. This is
    /// the drag-start detach: the selection floats as a preview and is
    /// merged back on commit.
    pub fn take_by_ids(&mut self, ids: &[LabelId]) -> Vec<Label> {
        let taken = self.filter_by_ids(ids);
        self.labels.retain(|l| !ids.contains(&l.id));
        taken
    }

    /// Ordered deep equality with another label set. Hosts use this to skip
    /// no-op saves.
    pub fn same_labels(&self, other: &[Label]) -> bool {
        self.labels == other
    }

    /// Serialize the label set to JSON, the canonical persistence payload.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(&self.labels)?)
    }

    /// Load a label set from JSON, replacing the current contents.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let labels: Vec<Label> = serde_json::from_str(json)?;
        let mut store = Self { labels };
        store.dedup_by_id();
        Ok(store)
    }

    // Keeps the first occurrence of each ID; later duplicates are dropped.
    fn dedup_by_id(&mut self) {
        let mut seen: Vec<LabelId> = Vec::with_capacity(self.labels.len());
        self.labels.retain(|l| {
            if seen.contains(&l.id) {
                log::warn!("dropping duplicate label id {}", l.id);
                false
            } else {
                seen.push(l.id);
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_at(x: f64) -> Label {
        Label::new(x, 0.1, 0.2, 0.2, None)
    }

    #[test]
    fn test_upsert_appends_and_replaces() {
        let mut store = LabelStore::new();
        let a = label_at(0.1);
        let b = label_at(0.2);
        store.upsert_many(vec![a.clone(), b.clone()]);
        assert_eq!(store.len(), 2);

        // Replacing by ID keeps position.
        let mut a2 = a.clone();
        a2.x = 0.5;
        store.upsert_many(vec![a2.clone()]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.labels()[0], a2);
        assert_eq!(store.labels()[1], b);
    }

    #[test]
    fn test_no_duplicate_ids_after_upserts() {
        let mut store = LabelStore::new();
        let a = label_at(0.1);
        store.upsert_many(vec![a.clone()]);
        store.upsert_many(vec![a.clone(), a.clone()]);
        let mut ids: Vec<_> = store.labels().iter().map(|l| l.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), store.len());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_all_swaps_wholesale() {
        let mut store = LabelStore::new();
        store.upsert_many(vec![label_at(0.1), label_at(0.2)]);
        let fresh = vec![label_at(0.3)];
        store.replace_all(fresh.clone());
        assert!(store.same_labels(&fresh));
    }

    #[test]
    fn test_take_by_ids_detaches_in_store_order() {
        let mut store = LabelStore::new();
        let a = label_at(0.1);
        let b = label_at(0.2);
        let c = label_at(0.3);
        store.upsert_many(vec![a.clone(), b.clone(), c.clone()]);

        // Request in reverse order; snapshot comes back in store order.
        let taken = store.take_by_ids(&[c.id, a.id]);
        assert_eq!(taken, vec![a, c]);
        assert_eq!(store.len(), 1);
        assert!(store.contains(b.id));
    }

    #[test]
    fn test_remove_by_ids() {
        let mut store = LabelStore::new();
        let a = label_at(0.1);
        let b = label_at(0.2);
        store.upsert_many(vec![a.clone(), b.clone()]);
        assert_eq!(store.remove_by_ids(&[a.id]), 1);
        assert_eq!(store.remove_by_ids(&[a.id]), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let mut store = LabelStore::new();
        store.upsert_many(vec![label_at(0.1), label_at(0.2)]);
        let json = store.to_json().unwrap();
        let back = LabelStore::from_json(&json).unwrap();
        assert!(back.same_labels(store.labels()));
    }

    #[test]
    fn test_from_json_malformed_input_is_json_error() {
        let err = LabelStore::from_json("not json").unwrap_err();
        assert!(matches!(err, EngineError::Json(_)));
    }

    #[test]
    fn test_from_json_drops_duplicate_ids() {
        let a = label_at(0.1);
        let json = serde_json::to_string(&vec![a.clone(), a.clone()]).unwrap();
        let store = LabelStore::from_json(&json).unwrap();
        assert_eq!(store.len(), 1);
    }
}
