//! Relation Graph - labeled, directed, boolean edges between nouns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Composite key of one directed edge.
///
/// Ordered so the whole graph serializes (and therefore fingerprints)
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelationKey {
    pub label: String,
    pub source: String,
    pub target: String,
}

impl RelationKey {
    pub fn new(label: &str, source: &str, target: &str) -> Self {
        Self {
            label: label.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// The set of present edges. An absent key means "not related".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationGraph {
    edges: BTreeSet<RelationKey>,
}

impl RelationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edge `a -> b` under `label`. Idempotent.
    pub fn relate(&mut self, label: &str, a: &str, b: &str) {
        self.edges.insert(RelationKey::new(label, a, b));
    }

    /// Clear the edge `a -> b` under `label`. No-op if absent.
    pub fn unrelate(&mut self, label: &str, a: &str, b: &str) {
        self.edges.remove(&RelationKey::new(label, a, b));
    }

    /// Set both `a -> b` and `b -> a`.
    pub fn reciprocal(&mut self, label: &str, a: &str, b: &str) {
        self.relate(label, a, b);
        self.relate(label, b, a);
    }

    /// Clear both `a -> b` and `b -> a`.
    pub fn unreciprocal(&mut self, label: &str, a: &str, b: &str) {
        self.unrelate(label, a, b);
        self.unrelate(label, b, a);
    }

    pub fn is_related(&self, label: &str, a: &str, b: &str) -> bool {
        self.edges.contains(&RelationKey::new(label, a, b))
    }

    /// Iterate over every present edge in key order.
    pub fn iter(&self) -> impl Iterator<Item = &RelationKey> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
