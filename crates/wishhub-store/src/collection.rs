//! Concurrent document collection with per-document atomic updates.

use std::hash::Hash;

use dashmap::DashMap;

use wishhub_core::error::AppError;
use wishhub_core::result::AppResult;

/// A concurrent map of documents keyed by id.
///
/// `update` runs its closure under the document's entry lock, so each
/// single-document mutation is atomic with respect to other accessors.
/// There is no multi-document atomicity; callers sequencing several
/// updates must tolerate partial completion.
pub struct DocumentCollection<K, V> {
    docs: DashMap<K, V>,
}

impl<K, V> std::fmt::Debug for DocumentCollection<K, V>
where
    K: Eq + Hash + std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCollection")
            .field("docs", &self.docs)
            .finish()
    }
}

impl<K, V> DocumentCollection<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            docs: DashMap::new(),
        }
    }

    /// Inserts a document, replacing any previous one with the same key.
    pub fn insert(&self, key: K, doc: V) {
        self.docs.insert(key, doc);
    }

    /// Returns a clone of the document, if present.
    pub fn get(&self, key: &K) -> Option<V> {
        self.docs.get(key).map(|entry| entry.value().clone())
    }

    /// Applies `mutate` to the document under its entry lock and returns
    /// the updated clone.
    pub fn update<F>(&self, key: &K, mutate: F) -> AppResult<V>
    where
        F: FnOnce(&mut V),
    {
        match self.docs.get_mut(key) {
            Some(mut entry) => {
                mutate(entry.value_mut());
                Ok(entry.value().clone())
            }
            None => Err(AppError::not_found("Document not found")),
        }
    }

    /// Applies a fallible `mutate` to the document under its entry lock.
    ///
    /// When the closure errors, the document is left untouched only if the
    /// closure itself made no changes before failing; closures should
    /// validate before mutating.
    pub fn try_update<F, T>(&self, key: &K, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut V) -> AppResult<T>,
    {
        match self.docs.get_mut(key) {
            Some(mut entry) => mutate(entry.value_mut()),
            None => Err(AppError::not_found("Document not found")),
        }
    }

    /// Removes a document. Returns it when it existed.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.docs.remove(key).map(|(_, doc)| doc)
    }

    /// Returns whether a document exists.
    pub fn contains(&self, key: &K) -> bool {
        self.docs.contains_key(key)
    }

    /// Returns clones of all documents matching the predicate.
    pub fn find<P>(&self, predicate: P) -> Vec<V>
    where
        P: Fn(&V) -> bool,
    {
        self.docs
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl<K, V> Default for DocumentCollection<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_returns_mutated_clone() {
        let docs: DocumentCollection<u32, String> = DocumentCollection::new();
        docs.insert(1, "a".to_string());
        let updated = docs.update(&1, |s| s.push('b')).expect("exists");
        assert_eq!(updated, "ab");
        assert_eq!(docs.get(&1), Some("ab".to_string()));
    }

    #[test]
    fn update_missing_is_not_found() {
        let docs: DocumentCollection<u32, String> = DocumentCollection::new();
        let err = docs.update(&7, |_| {}).unwrap_err();
        assert_eq!(err.kind, wishhub_core::error::ErrorKind::NotFound);
    }

    #[test]
    fn try_update_propagates_closure_error() {
        let docs: DocumentCollection<u32, i32> = DocumentCollection::new();
        docs.insert(1, 10);
        let err = docs
            .try_update(&1, |_| -> AppResult<()> {
                Err(AppError::conflict("nope"))
            })
            .unwrap_err();
        assert_eq!(err.kind, wishhub_core::error::ErrorKind::Conflict);
        assert_eq!(docs.get(&1), Some(10));
    }

    #[test]
    fn find_filters_documents() {
        let docs: DocumentCollection<u32, i32> = DocumentCollection::new();
        docs.insert(1, 1);
        docs.insert(2, 2);
        docs.insert(3, 3);
        let even = docs.find(|v| v % 2 == 0);
        assert_eq!(even, vec![2]);
    }
}
