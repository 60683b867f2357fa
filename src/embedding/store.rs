//! Immutable node embedding mapping

use super::{EmbeddingError, EmbeddingResult};
use crate::graph::{NodeKey, NodeKind};
use rustc_hash::FxHashMap;

/// Mapping from node identity to a fixed-dimension vector.
///
/// Built once per training run and never mutated afterwards. Lookups of unknown nodes
/// return the all-zero vector of the store's dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingStore {
    dimensions: usize,
    vectors: FxHashMap<NodeKey, Vec<f32>>,
    zero: Vec<f32>,
}

impl EmbeddingStore {
    /// Create a store, rejecting any vector whose length differs from `dimensions`.
    ///
    /// A key given twice keeps its last vector.
    pub fn new<I>(dimensions: usize, entries: I) -> EmbeddingResult<Self>
    where
        I: IntoIterator<Item = (NodeKey, Vec<f32>)>,
    {
        let mut vectors = FxHashMap::default();
        for (key, vector) in entries {
            if vector.len() != dimensions {
                return Err(EmbeddingError::DimensionMismatch {
                    node: key.to_string(),
                    expected: dimensions,
                    got: vector.len(),
                });
            }
            vectors.insert(key, vector);
        }

        Ok(Self {
            dimensions,
            vectors,
            zero: vec![0.0; dimensions],
        })
    }

    /// Store without any vectors; every lookup yields zeros
    pub fn empty(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: FxHashMap::default(),
            zero: vec![0.0; dimensions],
        }
    }

    /// Stored vector, or the zero vector for unknown nodes. Never fails.
    pub fn lookup(&self, key: &NodeKey) -> &[f32] {
        self.vectors.get(key).map(Vec::as_slice).unwrap_or(&self.zero)
    }

    /// `lookup` by kind and name
    pub fn lookup_named(&self, kind: NodeKind, name: &str) -> &[f32] {
        self.lookup(&NodeKey::new(kind, name))
    }

    /// Stored vector, `None` for unknown nodes
    pub fn get(&self, key: &NodeKey) -> Option<&[f32]> {
        self.vectors.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.vectors.contains_key(key)
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, &[f32])> {
        self.vectors.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Entries sorted by node key
    pub fn sorted_entries(&self) -> Vec<(&NodeKey, &[f32])> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        let store = EmbeddingStore::new(
            3,
            vec![(NodeKey::artist("A"), vec![1.0, 2.0, 3.0])],
        )
        .unwrap();

        assert_eq!(store.lookup(&NodeKey::artist("A")), &[1.0, 2.0, 3.0]);
        assert_eq!(store.lookup(&NodeKey::artist("Missing")), &[0.0, 0.0, 0.0]);
        // Same name, other kind: unknown
        assert_eq!(store.lookup_named(NodeKind::Genre, "A"), &[0.0, 0.0, 0.0]);
        assert!(store.get(&NodeKey::genre("A")).is_none());
    }

    #[test]
    fn test_zero_fallback_is_deterministic() {
        let store = EmbeddingStore::empty(64);
        let key = NodeKey::genre("Afroswing");
        let first = store.lookup(&key).to_vec();
        let second = store.lookup(&key).to_vec();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let result = EmbeddingStore::new(
            2,
            vec![
                (NodeKey::artist("A"), vec![1.0, 2.0]),
                (NodeKey::artist("B"), vec![1.0]),
            ],
        );
        assert!(matches!(
            result,
            Err(EmbeddingError::DimensionMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn test_sorted_entries() {
        let store = EmbeddingStore::new(
            1,
            vec![
                (NodeKey::genre("Z"), vec![1.0]),
                (NodeKey::artist("B"), vec![2.0]),
                (NodeKey::artist("A"), vec![3.0]),
            ],
        )
        .unwrap();

        let keys: Vec<String> = store.sorted_entries().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["artist:A", "artist:B", "genre:Z"]);
    }
}
