//! Error types for the world model.

use thiserror::Error;

/// Errors raised while building or inspecting a [`crate::World`].
#[derive(Debug, Error)]
pub enum WorldError {
    /// Two nouns share a name. Names are the join key for matching and relations.
    #[error("duplicate noun name: {name}")]
    DuplicateNoun { name: String },

    #[error("failed to serialize world state for fingerprinting: {0}")]
    Fingerprint(#[from] serde_json::Error),
}
