//! World state - the mutable handle rule guards and actions operate on.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::entities::{EntityStore, Noun, Value};
use crate::relations::RelationGraph;
use crate::WorldError;

/// Content hash of the nouns and relations at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint(blake3::Hash);

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Everything a story can observe or change: the Entity Store, the Relation
/// Graph, and the random source behind [`World::choice`].
#[derive(Debug, Clone)]
pub struct World {
    nouns: EntityStore,
    relations: RelationGraph,
    rng: StdRng,
}

impl World {
    /// Create a world whose random choices are seeded from the OS.
    pub fn new(nouns: impl IntoIterator<Item = Noun>) -> Result<Self, WorldError> {
        Ok(Self {
            nouns: EntityStore::from_nouns(nouns)?,
            relations: RelationGraph::new(),
            rng: StdRng::from_os_rng(),
        })
    }

    /// Create a world with reproducible random choices.
    pub fn with_seed(nouns: impl IntoIterator<Item = Noun>, seed: u64) -> Result<Self, WorldError> {
        Ok(Self {
            nouns: EntityStore::from_nouns(nouns)?,
            relations: RelationGraph::new(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn store(&self) -> &EntityStore {
        &self.nouns
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.nouns
    }

    pub fn relations(&self) -> &RelationGraph {
        &self.relations
    }

    pub fn relations_mut(&mut self) -> &mut RelationGraph {
        &mut self.relations
    }

    // -- Entity queries --------------------------------------------------

    /// Look up a noun by name. Unknown names yield `None`.
    pub fn noun(&self, name: &str) -> Option<&Noun> {
        self.nouns.get(name)
    }

    pub fn noun_mut(&mut self, name: &str) -> Option<&mut Noun> {
        self.nouns.get_mut(name)
    }

    pub fn nouns_by_tag(&self, tag: &str) -> Vec<&Noun> {
        self.nouns.by_tag(tag)
    }

    pub fn nouns_by_property(&self, key: &str, value: impl Into<Value>) -> Vec<&Noun> {
        self.nouns.by_property(key, &value.into())
    }

    /// Read one property of a named noun.
    pub fn property(&self, name: &str, key: &str) -> Option<&Value> {
        self.noun(name)?.property(key)
    }

    /// Set one property of a named noun. Returns `false` if the noun is unknown.
    pub fn set_property(&mut self, name: &str, key: &str, value: impl Into<Value>) -> bool {
        match self.noun_mut(name) {
            Some(noun) => {
                noun.set_property(key, value);
                true
            }
            None => false,
        }
    }

    // -- Relations ---------------------------------------------------------

    pub fn relate(&mut self, label: &str, a: &str, b: &str) {
        self.relations.relate(label, a, b);
    }

    pub fn unrelate(&mut self, label: &str, a: &str, b: &str) {
        self.relations.unrelate(label, a, b);
    }

    pub fn reciprocal(&mut self, label: &str, a: &str, b: &str) {
        self.relations.reciprocal(label, a, b);
    }

    pub fn unreciprocal(&mut self, label: &str, a: &str, b: &str) {
        self.relations.unreciprocal(label, a, b);
    }

    pub fn is_related(&self, label: &str, a: &str, b: &str) -> bool {
        self.relations.is_related(label, a, b)
    }

    /// Every noun tagged `tag` that `a` points to under `label`.
    ///
    /// Follows the store's tag order, so edges to removed nouns never show up.
    pub fn all_related_by_tag(&self, label: &str, a: &str, tag: &str) -> Vec<&Noun> {
        self.nouns
            .by_tag(tag)
            .into_iter()
            .filter(|b| self.relations.is_related(label, a, &b.name))
            .collect()
    }

    /// The first match of [`World::all_related_by_tag`].
    ///
    /// A "the" accessor for relations authors treat as single-valued, such as
    /// the room someone is currently in. Nothing enforces that cardinality.
    pub fn related_by_tag(&self, label: &str, a: &str, tag: &str) -> Option<&Noun> {
        self.all_related_by_tag(label, a, tag).into_iter().next()
    }

    /// Name of the first related noun; handy for comparing locations.
    pub fn related_name_by_tag(&self, label: &str, a: &str, tag: &str) -> Option<String> {
        self.related_by_tag(label, a, tag).map(|n| n.name.clone())
    }

    /// Clear `a -> b` for every currently matching `b`.
    pub fn unrelate_by_tag(&mut self, label: &str, a: &str, tag: &str) {
        for b in self.all_related_names_by_tag(label, a, tag) {
            self.relations.unrelate(label, a, &b);
        }
    }

    /// Clear both directions for every `b` that `a` currently points to.
    pub fn unreciprocal_by_tag(&mut self, label: &str, a: &str, tag: &str) {
        for b in self.all_related_names_by_tag(label, a, tag) {
            self.relations.unreciprocal(label, a, &b);
        }
    }

    /// Owned names of [`World::all_related_by_tag`], for feeding [`World::choice`].
    pub fn all_related_names_by_tag(&self, label: &str, a: &str, tag: &str) -> Vec<String> {
        self.all_related_by_tag(label, a, tag)
            .into_iter()
            .map(|n| n.name.clone())
            .collect()
    }

    // -- Helpers ----------------------------------------------------------------

    /// Pick one element uniformly at random. Empty input yields `None`.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Hash the nouns (in declaration order) and the relation set.
    ///
    /// The random source is not part of the fingerprint.
    pub fn fingerprint(&self) -> Result<Fingerprint, WorldError> {
        #[derive(Serialize)]
        struct Snapshot<'a> {
            nouns: &'a EntityStore,
            relations: &'a RelationGraph,
        }

        let bytes = serde_json::to_vec(&Snapshot {
            nouns: &self.nouns,
            relations: &self.relations,
        })?;
        Ok(Fingerprint(blake3::hash(&bytes)))
    }
}
