//! Insertion-ordered name registries

use crate::error::{AnalysisError, CatalogueError, Scope};
use std::collections::HashMap;
use std::fmt;

/// Something registered under a unique name
pub trait Named {
    /// Namespace used in error reports
    const SCOPE: Scope;

    fn name(&self) -> &str;
}

/// Name-keyed collection that remembers registration order
///
/// Filled once while the catalogue is assembled, read-only afterwards.
pub struct Registry<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Named> Registry<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add an item, a second item with the same name is rejected
    pub fn register(&mut self, item: T) -> Result<(), CatalogueError> {
        let name = item.name().to_string();
        if self.index.contains_key(&name) {
            return Err(CatalogueError::DuplicateName {
                scope: T::SCOPE,
                name,
            });
        }

        self.index.insert(name, self.items.len());
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.items[i])
    }

    /// Fetch an item or report it as not found
    pub fn lookup(&self, name: &str) -> Result<&T, AnalysisError> {
        self.get(name).ok_or_else(|| AnalysisError::NotFound {
            scope: T::SCOPE,
            name: name.to_string(),
        })
    }

    /// All items in registration order
    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(Named::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Named> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Named> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("scope", &T::SCOPE)
            .field("names", &self.names())
            .finish()
    }
}

impl<'a, T: Named> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Item(&'static str);

    impl Named for Item {
        const SCOPE: Scope = Scope::Algorithm;

        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_insertion_order() {
        let mut registry = Registry::new();
        for name in ["seasonal-naive", "drift", "naive"] {
            registry.register(Item(name)).unwrap();
        }

        assert_eq!(registry.names(), vec!["seasonal-naive", "drift", "naive"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup("drift").map(|i| i.0), Ok("drift"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = Registry::new();
        registry.register(Item("naive")).unwrap();

        assert_eq!(
            registry.register(Item("naive")),
            Err(CatalogueError::DuplicateName {
                scope: Scope::Algorithm,
                name: "naive".to_string()
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_unknown() {
        let registry: Registry<Item> = Registry::default();
        assert!(registry.is_empty());
        assert_eq!(
            registry.lookup("arima").map(|i| i.0),
            Err(AnalysisError::NotFound {
                scope: Scope::Algorithm,
                name: "arima".to_string()
            })
        );
    }
}
