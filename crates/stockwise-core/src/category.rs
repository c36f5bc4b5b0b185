//! # Categories
//!
//! Product categories are interned value objects.
//!
//! ## Canonical Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CategoryRegistry                                                       │
//! │                                                                         │
//! │  "dairy"   ──┐                                                          │
//! │  " DAIRY " ──┼── normalize ──► "Dairy" ──► Arc<str> (one allocation)   │
//! │  "Dairy"   ──┘                                                          │
//! │                                                                         │
//! │  Every call with an equivalent name hands back the SAME shared value.  │
//! │  Equality and hashing compare that shared allocation, not the text.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two registries never share identities: a "Dairy" from registry A is not
//! equal to a "Dairy" from registry B. Applications keep one registry per
//! inventory, owned next to the warehouses it labels.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::validation::{validate_category_name, ValidationResult};

/// A canonical product category.
///
/// Only [`CategoryRegistry::category`] creates categories.
#[derive(Clone)]
pub struct Category(Arc<str>);

impl Category {
    /// The normalized category name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as *const u8).hash(state);
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Category").field(&self.name()).finish()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Interning factory for [`Category`] values.
///
/// ## Example
/// ```rust
/// use stockwise_core::category::CategoryRegistry;
///
/// let mut categories = CategoryRegistry::new();
/// let a = categories.category("dairy").unwrap();
/// let b = categories.category("  DAIRY").unwrap();
///
/// assert_eq!(a, b);
/// assert_eq!(a.name(), "Dairy");
/// ```
#[derive(Debug, Default)]
pub struct CategoryRegistry {
    interned: HashMap<String, Category>,
}

impl CategoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical category for `name`, creating it on first use.
    pub fn category(&mut self, name: &str) -> ValidationResult<Category> {
        validate_category_name(name)?;
        let normalized = normalize_name(name);

        let category = self
            .interned
            .entry(normalized)
            .or_insert_with_key(|key| Category(Arc::from(key.as_str())));
        Ok(category.clone())
    }

    /// Looks up an already interned category without creating one.
    pub fn get(&self, name: &str) -> Option<Category> {
        self.interned.get(&normalize_name(name)).cloned()
    }

    /// Number of distinct categories interned so far.
    pub fn len(&self) -> usize {
        self.interned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interned.is_empty()
    }
}

/// Trims and capitalizes: first character upper case, the rest lower case.
fn normalize_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
