use core::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a product within one source.
///
/// Both fields participate in equality, hashing, and ordering: two products
/// with the same name but different categories are distinct keys and get
/// independent price histories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductKey {
    /// Product name as reported by the source.
    pub name: String,
    /// Category the source filed the product under.
    pub category: String,
}

impl ProductKey {
    /// Build a key from its two components.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.category)
    }
}
