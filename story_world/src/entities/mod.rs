//! Entity Store - the nouns of a story, in declaration order.

mod noun;
mod value;

pub use noun::*;
pub use value::*;

use serde::Serialize;
use std::collections::HashSet;

use crate::WorldError;

/// Ordered collection of nouns with unique names.
///
/// Declaration order is preserved and is the iteration order of every query.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EntityStore {
    nouns: Vec<Noun>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from nouns, rejecting duplicate names.
    pub fn from_nouns(nouns: impl IntoIterator<Item = Noun>) -> Result<Self, WorldError> {
        let nouns: Vec<Noun> = nouns.into_iter().collect();
        let mut seen = HashSet::new();
        for noun in &nouns {
            if !seen.insert(noun.name.as_str()) {
                return Err(WorldError::DuplicateNoun {
                    name: noun.name.clone(),
                });
            }
        }
        Ok(Self { nouns })
    }

    /// Append a noun at the end of declaration order.
    pub fn insert(&mut self, noun: Noun) -> Result<(), WorldError> {
        if self.contains(&noun.name) {
            return Err(WorldError::DuplicateNoun { name: noun.name });
        }
        self.nouns.push(noun);
        Ok(())
    }

    /// Remove a noun by name.
    ///
    /// Relations that mention the noun are left in place; queries that go
    /// through the store simply stop finding it.
    pub fn remove(&mut self, name: &str) -> Option<Noun> {
        let index = self.nouns.iter().position(|n| n.name == name)?;
        Some(self.nouns.remove(index))
    }

    /// Look up a noun by name.
    pub fn get(&self, name: &str) -> Option<&Noun> {
        self.nouns.iter().find(|n| n.name == name)
    }

    /// Look up a noun by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Noun> {
        self.nouns.iter_mut().find(|n| n.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All nouns carrying a tag, in declaration order.
    pub fn by_tag(&self, tag: &str) -> Vec<&Noun> {
        self.nouns.iter().filter(|n| n.has_tag(tag)).collect()
    }

    /// All nouns whose property `key` equals `value`.
    pub fn by_property(&self, key: &str, value: &Value) -> Vec<&Noun> {
        self.nouns
            .iter()
            .filter(|n| n.property(key) == Some(value))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Noun> {
        self.nouns.iter()
    }

    pub fn len(&self) -> usize {
        self.nouns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nouns.is_empty()
    }
}
