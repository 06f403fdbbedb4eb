//! Ordered feature schema the classifier was trained on

use std::collections::HashMap;

/// Ordered feature names with a precomputed name-to-slot index
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Build a schema from feature names in training order
    pub fn new(names: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(names.len());
        for (slot, name) in names.iter().enumerate() {
            // First occurrence wins for duplicated names
            index.entry(name.clone()).or_insert(slot);
        }
        FeatureSchema { names, index }
    }

    /// Slot for a feature name, if the model knows it
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSchema {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        FeatureSchema::new(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_lookup() {
        let schema: FeatureSchema = ["Monthly Charge", "Contract_One Year", "Tenure in Months"]
            .into_iter()
            .collect();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.position("Tenure in Months"), Some(2));
        assert_eq!(schema.position("Contract_One Year"), Some(1));
        assert_eq!(schema.position("Churn Score"), None);
        assert!(!schema.contains("monthly charge"));
    }

    #[test]
    fn test_duplicate_names_resolve_to_first_slot() {
        let schema: FeatureSchema = ["A", "B", "A"].into_iter().collect();
        assert_eq!(schema.position("A"), Some(0));
        assert_eq!(schema.len(), 3);
    }
}
