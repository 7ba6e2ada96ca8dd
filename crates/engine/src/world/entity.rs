use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(pub String);

impl EntityKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product or storefront record supplied by the data layer. The engine reads
/// `id` and `category`; everything else is passed through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: EntityKey,
    pub category: String,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub display: BTreeMap<String, serde_json::Value>,
}

impl EntityRecord {
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: EntityKey::new(id),
            category: category.into(),
            label: String::new(),
            display: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}
