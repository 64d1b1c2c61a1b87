//! Collection name newtype.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Name of a managed MongoDB collection. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CollectionName(String);

impl CollectionName {
    /// Wrap a name known to be non-empty.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "collection name must not be empty");
        Self(name)
    }

    /// Wrap a name, or `None` if it is empty.
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        (!name.is_empty()).then_some(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CollectionName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        CollectionName::try_new(name)
            .ok_or_else(|| serde::de::Error::custom("collection name must not be empty"))
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for CollectionName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
