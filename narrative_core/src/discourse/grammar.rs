//! Template grammar - `#symbol#` expansion over a table of alternatives.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use tracing::debug;

use super::{modifiers, Renderer};
use crate::error::StoryError;
use crate::events::StoryEvent;

/// Maximum nesting of symbol expansions before rendering gives up.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Symbol bound to the event's first noun.
pub const NOUN_A: &str = "nounA";
/// Symbol bound to the event's second noun.
pub const NOUN_B: &str = "nounB";

/// A table of symbol -> alternatives, expanded with uniform random choice.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: BTreeMap<String, Vec<String>>,
    rng: StdRng,
    max_depth: usize,
}

impl Grammar {
    /// Create a grammar seeded from the OS.
    pub fn new(rules: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            rules,
            rng: StdRng::from_os_rng(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a grammar with reproducible choices.
    pub fn with_seed(rules: BTreeMap<String, Vec<String>>, seed: u64) -> Self {
        Self {
            rules,
            rng: StdRng::seed_from_u64(seed),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.rules.contains_key(symbol)
    }

    /// Expand every `#tag#` in `text`.
    pub fn flatten(&mut self, text: &str) -> Result<String, StoryError> {
        self.expand(text, &[], 0)
    }

    /// Expand `text` with some symbols pinned to fixed values.
    ///
    /// Pinned symbols shadow table entries and are not expanded further.
    pub fn flatten_with(&mut self, text: &str, pinned: &[(&str, &str)]) -> Result<String, StoryError> {
        self.expand(text, pinned, 0)
    }

    fn expand(&mut self, text: &str, pinned: &[(&str, &str)], depth: usize) -> Result<String, StoryError> {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '#' => {
                    let mut tag = String::new();
                    let mut closed = false;
                    for t in chars.by_ref() {
                        if t == '#' {
                            closed = true;
                            break;
                        }
                        tag.push(t);
                    }
                    if closed {
                        out.push_str(&self.expand_tag(&tag, pinned, depth)?);
                    } else {
                        out.push('#');
                        out.push_str(&tag);
                    }
                }
                _ => out.push(c),
            }
        }
        Ok(out)
    }

    fn expand_tag(&mut self, tag: &str, pinned: &[(&str, &str)], depth: usize) -> Result<String, StoryError> {
        let mut parts = tag.split('.');
        let symbol = parts.next().unwrap_or_default();

        if depth >= self.max_depth {
            return Err(StoryError::RenderDepth {
                symbol: symbol.to_string(),
                depth,
            });
        }

        let mut text = if let Some((_, value)) = pinned.iter().find(|(name, _)| *name == symbol) {
            value.to_string()
        } else {
            let chosen = self
                .rules
                .get(symbol)
                .and_then(|alternatives| alternatives.choose(&mut self.rng))
                .cloned();
            match chosen {
                Some(template) => self.expand(&template, pinned, depth + 1)?,
                None => format!("(({}))", symbol),
            }
        };

        for modifier in parts {
            match modifiers::apply(modifier, &text) {
                Some(modified) => text = modified,
                None => debug!(modifier, symbol, "unknown template modifier"),
            }
        }
        Ok(text)
    }
}

impl Renderer for Grammar {
    fn render(&mut self, event: &StoryEvent) -> Result<String, StoryError> {
        if !self.has_symbol(event.verb()) {
            return Err(StoryError::MissingTemplate {
                verb: event.verb().to_string(),
            });
        }
        let mut pinned = Vec::with_capacity(2);
        if let Some(a) = event.a() {
            pinned.push((NOUN_A, a));
        }
        if let Some(b) = event.b() {
            pinned.push((NOUN_B, b));
        }
        self.flatten_with(&format!("#{}#", event.verb()), &pinned)
    }
}
