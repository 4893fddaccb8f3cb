//! Discourse - turning story events into prose.
//!
//! The engine only hands a renderer a verb and up to two noun names. The
//! default renderer is a [`Grammar`]: a table mapping each verb to template
//! alternatives such as `"#nounA# took #nounB#."`, with `#symbol.modifier#`
//! expansion.

mod grammar;
pub mod modifiers;

pub use grammar::*;

use crate::error::StoryError;
use crate::events::StoryEvent;

/// Turns one event into a sentence.
pub trait Renderer {
    fn render(&mut self, event: &StoryEvent) -> Result<String, StoryError>;
}

/// Renders the headless tuple form, e.g. `Max take coffee`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TupleRenderer;

impl Renderer for TupleRenderer {
    fn render(&mut self, event: &StoryEvent) -> Result<String, StoryError> {
        Ok(event.to_string())
    }
}
