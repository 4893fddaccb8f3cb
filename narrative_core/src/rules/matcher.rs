//! Rule Matcher - candidate enumeration and firing.
//!
//! Ordering is part of the contract: candidates follow declaration order, an
//! arity-2 rule walks its first slot in the outer loop, and a noun never
//! binds to both slots of the same rule.

use story_world::{EntityStore, Noun, World};
use tracing::debug;

use super::{Pattern, Rule};
use crate::error::StoryError;
use crate::events::StoryEvent;

/// Every tuple of noun names a rule's patterns select, in firing order.
///
/// Malformed rules (arity other than 1 or 2) select nothing.
pub fn candidate_tuples(patterns: &[Pattern], store: &EntityStore) -> Vec<Vec<String>> {
    match patterns {
        [only] => matching_names(only, store)
            .into_iter()
            .map(|a| vec![a])
            .collect(),
        [first, second] => {
            let slot_a = matching_names(first, store);
            let slot_b = matching_names(second, store);
            let mut tuples = Vec::new();
            for a in &slot_a {
                for b in &slot_b {
                    if a == b {
                        continue;
                    }
                    tuples.push(vec![a.clone(), b.clone()]);
                }
            }
            tuples
        }
        _ => Vec::new(),
    }
}

fn matching_names(pattern: &Pattern, store: &EntityStore) -> Vec<String> {
    store
        .iter()
        .filter(|noun| pattern.matches(noun))
        .map(|noun| noun.name.clone())
        .collect()
}

impl Rule {
    /// Evaluate the guard for one candidate tuple.
    ///
    /// A name that no longer resolves (the noun was removed) never satisfies it.
    pub fn holds(&self, world: &World, names: &[String]) -> bool {
        let nouns: Option<Vec<&Noun>> = names.iter().map(|name| world.noun(name)).collect();
        nouns.is_some_and(|nouns| (self.guard)(world, &nouns))
    }
}

/// Candidate tuples whose guard holds against the current world, without firing.
pub fn satisfied_bindings(rule: &Rule, world: &World) -> Vec<Vec<String>> {
    candidate_tuples(&rule.patterns, world.store())
        .into_iter()
        .filter(|names| rule.holds(world, names))
        .collect()
}

/// Fire one rule against the world, appending its events to `out`.
///
/// Candidates are computed once up front; each guard then sees every
/// mutation made by actions that already ran, including earlier candidates of
/// this same rule. Returns how many candidates fired.
pub fn fire(
    rule: &mut Rule,
    world: &mut World,
    out: &mut Vec<StoryEvent>,
) -> Result<usize, StoryError> {
    let mut fired = 0;
    for names in candidate_tuples(&rule.patterns, world.store()) {
        if !rule.holds(world, &names) {
            continue;
        }
        let events = (rule.action)(world, &names)?;
        debug!(
            rule = %rule.label(),
            bound = ?names,
            emitted = events.len(),
            "rule fired"
        );
        out.extend(events);
        fired += 1;
    }
    Ok(fired)
}
