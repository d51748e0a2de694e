//! Label and mode-id lookup for the operation families.
//!
//! The table is built in one go and never mutated afterwards.  Most callers
//! want [`Registry::shared`]; tests and embedders that prefer to own their
//! table can call [`Registry::builtin`] and pass it by reference.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::drill_engine::models::{Category, Operation};

static SHARED: OnceLock<Registry> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Registry {
    ordered: Vec<Operation>,
    by_label: HashMap<&'static str, Operation>,
    by_mode_id: HashMap<&'static str, Operation>,
}

impl Registry {
    /// Every built-in family, in canonical order.
    pub fn builtin() -> Registry {
        Registry::from_operations(&Operation::ALL)
    }

    pub fn from_operations(operations: &[Operation]) -> Registry {
        let mut registry = Registry {
            ordered: Vec::with_capacity(operations.len()),
            by_label: HashMap::with_capacity(operations.len()),
            by_mode_id: HashMap::with_capacity(operations.len()),
        };
        for &op in operations {
            if registry.by_label.insert(op.label(), op).is_none() {
                registry.by_mode_id.insert(op.mode_id(), op);
                registry.ordered.push(op);
            }
        }
        registry
    }

    /// Process-wide table, built on first use.
    pub fn shared() -> &'static Registry {
        SHARED.get_or_init(Registry::builtin)
    }

    /// Look up by display label, e.g. `"Mixed Basics"`. `None` if unknown.
    pub fn get(&self, label: &str) -> Option<Operation> {
        self.by_label.get(label).copied()
    }

    /// Look up by mode slug, e.g. `"square-roots"`.
    pub fn by_mode_id(&self, mode_id: &str) -> Option<Operation> {
        self.by_mode_id.get(mode_id).copied()
    }

    pub fn all(&self) -> &[Operation] {
        &self.ordered
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = Operation> + '_ {
        self.ordered.iter().copied().filter(move |op| op.category() == category)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ordered.iter().map(|op| op.label())
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_resolves_by_label_and_mode_id() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), 16);
        for op in Operation::ALL {
            assert_eq!(registry.get(op.label()), Some(op));
            assert_eq!(registry.by_mode_id(op.mode_id()), Some(op));
        }
    }

    #[test]
    fn unknown_label_is_none() {
        let registry = Registry::builtin();
        assert_eq!(registry.get("Calculus"), None);
        assert_eq!(registry.get("addition"), None, "labels are case sensitive");
        assert_eq!(registry.by_mode_id("Addition"), None);
    }

    #[test]
    fn canonical_order_is_preserved() {
        let labels: Vec<_> = Registry::builtin().labels().collect();
        assert_eq!(labels.first(), Some(&"Addition"));
        assert_eq!(labels.last(), Some(&"Anything Goes"));
    }

    #[test]
    fn categories_partition_the_families() {
        let registry = Registry::shared();
        let counts: Vec<usize> = [Category::Basic, Category::Power, Category::Advanced, Category::Mixed]
            .into_iter()
            .map(|c| registry.by_category(c).count())
            .collect();
        assert_eq!(counts, vec![4, 4, 4, 4]);
    }

    #[test]
    fn duplicates_are_ignored() {
        let registry = Registry::from_operations(&[Operation::Cube, Operation::Cube, Operation::Square]);
        assert_eq!(registry.all(), &[Operation::Cube, Operation::Square]);
    }

    #[test]
    fn shared_is_a_single_instance() {
        assert!(std::ptr::eq(Registry::shared(), Registry::shared()));
    }
}
