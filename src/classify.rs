//! Reverse lookup from produced identifiers back to their class tag.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::Deserialize;

use crate::group::CategoryGroup;

/// What to do when an identifier is registered under two different tags.
///
/// The same identifier appearing again under the *same* tag is routine (tier
/// tables overlap heavily) and is always skipped quietly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the tag seen first and log the dropped one.
    #[default]
    FirstWins,
    /// Fail construction.
    Reject,
}

/// A tag conflict found while indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict<K, C> {
    pub id: K,
    pub kept: C,
    pub dropped: C,
}

/// Immutable `identifier -> tag` index built once from category groups.
#[derive(Debug, Clone)]
pub struct ReverseClassifier<K, C> {
    index: HashMap<K, C>,
}

impl<K, C> ReverseClassifier<K, C>
where
    K: Copy + Eq + Hash + Debug,
    C: Copy + Eq + Debug,
{
    /// Index every member table of every group, in the order given.
    ///
    /// First write wins. Conflicting duplicates are logged and, under
    /// [`DuplicatePolicy::Reject`], returned as the error.
    pub fn build<'a, I>(groups: I, policy: DuplicatePolicy) -> Result<Self, Conflict<K, C>>
    where
        I: IntoIterator<Item = &'a CategoryGroup<K, C>>,
        K: 'a,
        C: 'a,
    {
        let mut index = HashMap::new();
        for group in groups {
            for (&id, _, tag) in group.entries() {
                match index.get(&id) {
                    None => {
                        index.insert(id, tag);
                    }
                    Some(&kept) if kept == tag => {}
                    Some(&kept) => {
                        let conflict = Conflict {
                            id,
                            kept,
                            dropped: tag,
                        };
                        if policy == DuplicatePolicy::Reject {
                            return Err(conflict);
                        }
                        tracing::warn!(
                            ?id,
                            ?kept,
                            dropped = ?tag,
                            "identifier registered under two classes; keeping the first"
                        );
                    }
                }
            }
        }
        Ok(Self { index })
    }

    pub fn classify(&self, id: &K) -> Option<C> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.index.contains_key(id)
    }

    /// Number of distinct identifiers indexed.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
