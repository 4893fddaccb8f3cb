//! # Story World
//!
//! The world model for Seaduck stories. This crate holds the nouns of a story,
//! the labeled relations between them, and the helpers rule authors use to
//! read and mutate that state. It knows nothing about rules or events.

pub mod entities;
pub mod error;
pub mod relations;
pub mod world_state;

pub use entities::*;
pub use error::*;
pub use relations::*;
pub use world_state::*;
