//! Category entity referenced by labels.

use serde::{Deserialize, Serialize};

/// Unique identifier for a category.
pub type CategoryId = u32;

/// A label category. Owned by the dataset, not by this engine; labels only
/// cross-reference the `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier for the category.
    pub id: CategoryId,
    /// Display name of the category.
    pub name: String,
    /// Broader grouping this category belongs to (e.g. "vehicle" for "car").
    #[serde(default)]
    pub supercategory: Option<String>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            supercategory: None,
        }
    }

    pub fn with_supercategory(mut self, supercategory: impl Into<String>) -> Self {
        self.supercategory = Some(supercategory.into());
        self
    }
}
