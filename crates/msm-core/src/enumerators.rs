//! Enumerator catalog: historical snapshots of named value sets.
//!
//! The catalog is an ordered list of revisions. A schema at version
//! `a.b.c.N` resolves its enum directives against revision `N`, so enum
//! values stay pinned even as later revisions add or retire keys.

use crate::error::{CoreError, CoreResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Values of one enumerator, `value -> description`, in declared order.
pub type EnumeratorValues = IndexMap<String, String>;

/// One snapshot of every enumerator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumeratorRevision {
    /// Position this revision claims in the catalog. Must equal its index.
    #[serde(rename = "version", alias = "revisionIndex")]
    pub revision_index: u32,

    /// Enumerators by name.
    #[serde(default)]
    pub enumerators: IndexMap<String, EnumeratorValues>,

    /// Any other fields carried by the revision (name, status, ...).
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl EnumeratorRevision {
    /// Create a revision with no metadata.
    pub fn new(revision_index: u32, enumerators: IndexMap<String, EnumeratorValues>) -> Self {
        Self {
            revision_index,
            enumerators,
            metadata: serde_json::Map::new(),
        }
    }
}

/// The full ordered enumerator catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumeratorCatalog {
    revisions: Vec<EnumeratorRevision>,
}

impl EnumeratorCatalog {
    /// Wrap an ordered list of revisions.
    pub fn new(revisions: Vec<EnumeratorRevision>) -> Self {
        Self { revisions }
    }

    /// Parse a catalog from the JSON array stored in `enumerators.json`.
    pub fn from_json_str(content: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// All revisions, in catalog order.
    pub fn revisions(&self) -> &[EnumeratorRevision] {
        &self.revisions
    }

    /// Number of revisions.
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// True if the catalog holds no revisions.
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    /// Fetch a revision, checking that it sits at its declared position.
    pub fn revision(&self, revision: u32) -> CoreResult<&EnumeratorRevision> {
        let entry = self.revisions.get(revision as usize).ok_or(
            CoreError::EnumeratorRevisionMissing {
                revision,
                available: self.revisions.len(),
            },
        )?;
        if entry.revision_index != revision {
            return Err(CoreError::EnumeratorRevisionMismatch {
                index: revision,
                declared: entry.revision_index,
            });
        }
        Ok(entry)
    }

    /// Look up the named enumerator at the given revision.
    pub fn get(&self, revision: u32, name: &str) -> CoreResult<&EnumeratorValues> {
        self.revision(revision)?
            .enumerators
            .get(name)
            .ok_or_else(|| CoreError::EnumeratorNotFound {
                name: name.to_string(),
                revision,
            })
    }

    /// The allowed values of an enumerator, in declared order.
    pub fn values(&self, revision: u32, name: &str) -> CoreResult<Vec<String>> {
        Ok(self.get(revision, name)?.keys().cloned().collect())
    }
}

#[cfg(test)]
#[path = "enumerators_test.rs"]
mod tests;
