use std::collections::HashMap;

use crate::models::ProductId;

/// Read-only product catalog: display names and aisle labels
///
/// Products may appear in the aisle map without a display name (or vice
/// versa); projection-time lookups handle the gaps.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    names: HashMap<ProductId, String>,
    aisles: HashMap<ProductId, String>,
}

/// Normalizes an aisle label for comparison: trimmed, case-folded
pub fn normalize_aisle(label: &str) -> String {
    label.trim().to_lowercase()
}

impl CatalogIndex {
    /// Builds the index from the raw name and aisle artifacts
    pub fn from_artifacts(names: HashMap<u32, String>, aisles: HashMap<u32, String>) -> Self {
        Self {
            names: names.into_iter().map(|(id, n)| (ProductId(id), n)).collect(),
            aisles: aisles.into_iter().map(|(id, a)| (ProductId(id), a)).collect(),
        }
    }

    /// Display name for a product, if the catalog knows it
    pub fn name_of(&self, product: ProductId) -> Option<&str> {
        self.names.get(&product).map(String::as_str)
    }

    /// Aisle label for a product, if the catalog knows it
    pub fn aisle_of(&self, product: ProductId) -> Option<&str> {
        self.aisles.get(&product).map(String::as_str)
    }

    /// All products with a display name; this is the global candidate pool
    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.names.keys().copied()
    }

    /// Products whose normalized aisle label equals the given normalized label
    ///
    /// Matching is literal string equality after normalization; no fuzzy
    /// matching or synonym resolution.
    pub fn products_in_aisle(&self, normalized_label: &str) -> Vec<ProductId> {
        self.aisles
            .iter()
            .filter(|(_, aisle)| normalize_aisle(aisle) == normalized_label)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of products with a display name
    pub fn product_count(&self) -> usize {
        self.names.len()
    }
}
