//! Rules - author-supplied condition/action pairs over one or two nouns.
//!
//! A rule names the nouns it applies to with one [`Pattern`] per slot. Each
//! step, the [`matcher`] enumerates candidate tuples for every rule in
//! declaration order, checks the guard, and runs the action when it holds.

pub mod matcher;

pub use matcher::*;

use story_world::{Noun, World};

use crate::error::StoryError;
use crate::events::StoryEvent;

/// What an action produces: the events it emits, in order.
pub type ActionResult = Result<Vec<StoryEvent>, StoryError>;

/// Guard over the bound nouns, with read access to the whole world.
pub type Guard = Box<dyn Fn(&World, &[&Noun]) -> bool>;

/// Effect over the bound noun names, with write access to the whole world.
pub type Action = Box<dyn FnMut(&mut World, &[String]) -> ActionResult>;

/// Selects the nouns a rule slot may bind to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Exactly the noun with this name.
    Name(String),
    /// Every noun carrying this tag. Written `#tag`.
    Tag(String),
}

impl Pattern {
    /// Parse a pattern; a leading `#` makes it a tag reference.
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_prefix('#') {
            Some(tag) => Pattern::Tag(tag.to_string()),
            None => Pattern::Name(pattern.to_string()),
        }
    }

    pub fn matches(&self, noun: &Noun) -> bool {
        match self {
            Pattern::Name(name) => noun.name == *name,
            Pattern::Tag(tag) => noun.has_tag(tag),
        }
    }
}

impl From<&str> for Pattern {
    fn from(pattern: &str) -> Self {
        Pattern::parse(pattern)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Name(name) => write!(f, "{}", name),
            Pattern::Tag(tag) => write!(f, "#{}", tag),
        }
    }
}

/// One condition/action pair.
///
/// Only arity 1 and 2 are evaluated. A rule built through [`Rule::new`] with
/// any other number of patterns is kept but never fires.
pub struct Rule {
    name: Option<String>,
    patterns: Vec<Pattern>,
    guard: Guard,
    action: Action,
}

impl Rule {
    /// Build a rule over an arbitrary pattern list.
    pub fn new(
        patterns: Vec<Pattern>,
        guard: impl Fn(&World, &[&Noun]) -> bool + 'static,
        action: impl FnMut(&mut World, &[String]) -> ActionResult + 'static,
    ) -> Self {
        Self {
            name: None,
            patterns,
            guard: Box::new(guard),
            action: Box::new(action),
        }
    }

    /// A rule over single nouns.
    pub fn unary(
        pattern: impl Into<Pattern>,
        guard: impl Fn(&World, &Noun) -> bool + 'static,
        mut action: impl FnMut(&mut World, &str) -> ActionResult + 'static,
    ) -> Self {
        Self::new(
            vec![pattern.into()],
            move |world: &World, nouns: &[&Noun]| match nouns {
                [a] => guard(world, a),
                _ => false,
            },
            move |world: &mut World, names: &[String]| match names {
                [a] => action(world, a),
                _ => Ok(Vec::new()),
            },
        )
    }

    /// A rule over ordered pairs of distinct nouns.
    pub fn binary(
        first: impl Into<Pattern>,
        second: impl Into<Pattern>,
        guard: impl Fn(&World, &Noun, &Noun) -> bool + 'static,
        mut action: impl FnMut(&mut World, &str, &str) -> ActionResult + 'static,
    ) -> Self {
        Self::new(
            vec![first.into(), second.into()],
            move |world: &World, nouns: &[&Noun]| match nouns {
                [a, b] => guard(world, a, b),
                _ => false,
            },
            move |world: &mut World, names: &[String]| match names {
                [a, b] => action(world, a, b),
                _ => Ok(Vec::new()),
            },
        )
    }

    /// Give the rule a name for logs.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name for log records; unnamed rules show their patterns.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .patterns
                .iter()
                .map(Pattern::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn arity(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the matcher will ever evaluate this rule.
    pub fn is_well_formed(&self) -> bool {
        matches!(self.arity(), 1 | 2)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}
