//! # Narrative Core (Seaduck)
//!
//! A rule-driven narrative simulator. A story is a set of nouns, labeled
//! relations between them, and condition/action rules. Each step evaluates
//! every rule against the current world, fires all that apply, and emits
//! story events; a template grammar turns those events into prose.
//!
//! ## Core Components
//!
//! - **rules**: Match patterns, guards, actions, and the rule matcher
//! - **driver**: The step loop and end-of-story detection
//! - **events**: Story events and the append-only event log
//! - **discourse**: Rendering events into sentences
//! - **config**: Loading nouns and templates from TOML or JSON
//!
//! ```no_run
//! use narrative_core::{Narrative, Rule, StoryEvent};
//! use story_world::Noun;
//!
//! let mut story = Narrative::builder()
//!     .noun(Noun::new("Chris").with_tag("person").with_property("sleepiness", 0))
//!     .discourse("moreSleepy", ["#nounA# yawns."])
//!     .discourse("_end", ["Good night."])
//!     .rule(Rule::unary(
//!         "Chris",
//!         |_, a| a.int("sleepiness") < 10,
//!         |world, a| {
//!             let next = world.noun(a).map_or(0, |n| n.int("sleepiness")) + 1;
//!             world.set_property(a, "sleepiness", next);
//!             Ok(vec![StoryEvent::unary("moreSleepy", a)])
//!         },
//!     ))
//!     .build()?;
//!
//! while !story.is_ended() {
//!     for line in story.step_and_render()? {
//!         println!("{}", line);
//!     }
//! }
//! # Ok::<(), narrative_core::StoryError>(())
//! ```

pub mod config;
pub mod discourse;
pub mod driver;
pub mod error;
pub mod events;
pub mod rules;

pub use config::*;
pub use discourse::*;
pub use driver::*;
pub use error::*;
pub use events::*;
pub use rules::*;
