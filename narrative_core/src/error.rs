//! Error types for the narrative engine.

use story_world::WorldError;
use thiserror::Error;

/// Failures while loading a story definition.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read story file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML story: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON story: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported story file format: {path} (expected .toml or .json)")]
    UnsupportedFormat { path: String },
}

/// Everything that can abort building, stepping, or rendering a story.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The discourse table has no templates for an event's verb.
    #[error("no templates for verb '{verb}'")]
    MissingTemplate { verb: String },

    #[error("template expansion of '{symbol}' exceeded depth {depth}")]
    RenderDepth { symbol: String, depth: usize },

    /// An author-supplied action gave up. Nothing it already changed is undone.
    #[error("rule '{rule}' failed: {message}")]
    Action { rule: String, message: String },
}

impl StoryError {
    /// Convenience for rule actions that need to abort the current step.
    pub fn action(rule: impl Into<String>, message: impl Into<String>) -> Self {
        StoryError::Action {
            rule: rule.into(),
            message: message.into(),
        }
    }
}
