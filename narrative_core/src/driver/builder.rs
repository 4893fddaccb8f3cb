//! Assembling a [`Narrative`] from configuration and code.

use std::collections::BTreeMap;

use story_world::{Noun, World};
use tracing::warn;
use uuid::Uuid;

use super::{Initializer, Narrative, StoryPhase};
use crate::config::NarrativeConfig;
use crate::discourse::{Grammar, Renderer};
use crate::error::StoryError;
use crate::events::EventLog;
use crate::rules::{ActionResult, Rule};

/// Collects nouns, templates, rules, and an optional initializer.
///
/// Without an explicit renderer the story renders through a [`Grammar`] built
/// from the discourse table.
#[derive(Default)]
pub struct NarrativeBuilder {
    seed: Option<u64>,
    nouns: Vec<Noun>,
    discourse: BTreeMap<String, Vec<String>>,
    rules: Vec<Rule>,
    initializer: Option<Initializer>,
    renderer: Option<Box<dyn Renderer>>,
}

impl NarrativeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take nouns, discourse, and seed from a loaded story file.
    pub fn config(mut self, config: NarrativeConfig) -> Self {
        self.seed = config.seed.or(self.seed);
        self.nouns.extend(config.nouns);
        for (symbol, templates) in config.discourse {
            self.discourse.entry(symbol).or_default().extend(templates);
        }
        self
    }

    /// Fix the seed for rule choices and template expansion.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn noun(mut self, noun: Noun) -> Self {
        self.nouns.push(noun);
        self
    }

    pub fn nouns(mut self, nouns: impl IntoIterator<Item = Noun>) -> Self {
        self.nouns.extend(nouns);
        self
    }

    /// Add template alternatives for a verb or helper symbol.
    pub fn discourse<S: Into<String>>(
        mut self,
        symbol: impl Into<String>,
        templates: impl IntoIterator<Item = S>,
    ) -> Self {
        self.discourse
            .entry(symbol.into())
            .or_default()
            .extend(templates.into_iter().map(Into::into));
        self
    }

    /// Append a rule. Rules fire in the order they are added.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Setup that runs instead of the rules on the first step.
    pub fn initialize(mut self, initialize: impl FnMut(&mut World) -> ActionResult + 'static) -> Self {
        self.initializer = Some(Box::new(initialize));
        self
    }

    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Validate noun names and assemble the story.
    ///
    /// Rules whose arity is not 1 or 2 are kept but never evaluated; each is
    /// reported once here.
    pub fn build(self) -> Result<Narrative, StoryError> {
        let run_id = Uuid::new_v4();

        let world = match self.seed {
            Some(seed) => World::with_seed(self.nouns, seed)?,
            None => World::new(self.nouns)?,
        };

        for rule in self.rules.iter().filter(|rule| !rule.is_well_formed()) {
            warn!(
                %run_id,
                rule = %rule.label(),
                arity = rule.arity(),
                "rule arity must be 1 or 2; it will never fire"
            );
        }

        let renderer = match self.renderer {
            Some(renderer) => renderer,
            None => {
                let grammar = match self.seed {
                    Some(seed) => Grammar::with_seed(self.discourse, seed),
                    None => Grammar::new(self.discourse),
                };
                Box::new(grammar)
            }
        };

        Ok(Narrative {
            run_id,
            world,
            rules: self.rules,
            initializer: self.initializer,
            renderer,
            step_count: 0,
            phase: StoryPhase::NotStarted,
            events: EventLog::new(),
            history: Vec::new(),
        })
    }
}
