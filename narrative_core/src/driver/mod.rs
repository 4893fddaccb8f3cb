//! Simulation Driver - advances a story one discrete step at a time.
//!
//! Step 0 runs the initializer when one is supplied. Every later step fires
//! each rule once, in declaration order, against a world that earlier rules
//! in the same step may already have changed. The story ends when a step
//! emits nothing or leaves the world's fingerprint identical to the previous
//! step's.
//!
//! Only immediate repetition is detected: a world cycling through two or more
//! states keeps running until something else stops it.

mod builder;

pub use builder::*;

use story_world::{Fingerprint, World};
use tracing::{debug, info};
use uuid::Uuid;

use crate::discourse::Renderer;
use crate::error::StoryError;
use crate::events::{EventLog, StoryEvent};
use crate::rules::{self, ActionResult, Rule};

/// Setup run instead of the rules on the first step.
///
/// Kept until it succeeds: a failed attempt leaves the story unstarted and
/// the next step tries again.
pub type Initializer = Box<dyn FnMut(&mut World) -> ActionResult>;

/// Lifecycle of a [`Narrative`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryPhase {
    /// No step has completed yet, including a step whose initializer failed.
    NotStarted,
    /// The initializer is running.
    Initializing,
    Running,
    /// The end sentinel has been emitted; further steps do nothing.
    Ended,
}

/// Why a step closed the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndReason {
    NoEvents,
    Stagnant,
}

impl EndReason {
    fn as_str(self) -> &'static str {
        match self {
            EndReason::NoEvents => "no_events",
            EndReason::Stagnant => "stagnant",
        }
    }
}

/// A running story: world state, rules, and everything emitted so far.
pub struct Narrative {
    run_id: Uuid,
    world: World,
    rules: Vec<Rule>,
    initializer: Option<Initializer>,
    renderer: Box<dyn Renderer>,
    step_count: u64,
    phase: StoryPhase,
    events: EventLog,
    history: Vec<Fingerprint>,
}

impl Narrative {
    /// Start describing a story.
    pub fn builder() -> NarrativeBuilder {
        NarrativeBuilder::new()
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access between steps, e.g. for a host injecting changes.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of steps that have done work.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn phase(&self) -> StoryPhase {
        self.phase
    }

    /// Every event emitted so far, including the end sentinel.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn is_ended(&self) -> bool {
        self.events.is_ended()
    }

    /// Advance the story by one step and return the events it produced.
    ///
    /// Once the story has ended this returns an empty list forever. An
    /// action error aborts the step; mutations and events from rules that
    /// already fired stay in place.
    pub fn step(&mut self) -> Result<Vec<StoryEvent>, StoryError> {
        if self.events.is_ended() {
            self.phase = StoryPhase::Ended;
            return Ok(Vec::new());
        }

        if self.step_count == 0 {
            if self.initializer.is_some() {
                return self.run_initializer();
            }
            info!(run_id = %self.run_id, rules = self.rules.len(), "story started");
        }
        self.phase = StoryPhase::Running;

        let mut emitted = Vec::new();
        let outcome = self.fire_rules(&mut emitted);
        self.events.extend(emitted.iter().cloned());
        outcome?;

        let fingerprint = self.world.fingerprint()?;
        let stagnant = self.history.last() == Some(&fingerprint);
        self.history.push(fingerprint);
        self.step_count += 1;

        debug!(
            run_id = %self.run_id,
            step = self.step_count,
            events = emitted.len(),
            %fingerprint,
            "step complete"
        );

        let reason = if emitted.is_empty() {
            Some(EndReason::NoEvents)
        } else if stagnant {
            Some(EndReason::Stagnant)
        } else {
            None
        };
        if let Some(reason) = reason {
            self.events.push(StoryEvent::end());
            emitted.push(StoryEvent::end());
            info!(
                run_id = %self.run_id,
                step = self.step_count,
                reason = reason.as_str(),
                "story ended"
            );
        }
        self.sync_phase();

        Ok(emitted)
    }

    /// [`Narrative::step`], with every event passed through the renderer.
    pub fn step_and_render(&mut self) -> Result<Vec<String>, StoryError> {
        let events = self.step()?;
        events.iter().map(|event| self.render_event(event)).collect()
    }

    pub fn render_event(&mut self, event: &StoryEvent) -> Result<String, StoryError> {
        self.renderer.render(event)
    }

    /// Step until the story ends or `max_steps` steps have been taken,
    /// returning everything emitted along the way.
    pub fn run_to_end(&mut self, max_steps: usize) -> Result<Vec<StoryEvent>, StoryError> {
        let mut all = Vec::new();
        for _ in 0..max_steps {
            if self.is_ended() {
                break;
            }
            all.extend(self.step()?);
        }
        Ok(all)
    }

    fn run_initializer(&mut self) -> Result<Vec<StoryEvent>, StoryError> {
        let Some(initialize) = self.initializer.as_mut() else {
            return Ok(Vec::new());
        };
        self.phase = StoryPhase::Initializing;
        info!(run_id = %self.run_id, "running story initializer");

        // World changes made before a failure are not undone.
        let events = match initialize(&mut self.world) {
            Ok(events) => events,
            Err(err) => {
                self.phase = StoryPhase::NotStarted;
                return Err(err);
            }
        };
        self.initializer = None;
        self.events.extend(events.iter().cloned());
        self.step_count += 1;
        self.sync_phase();
        Ok(events)
    }

    fn fire_rules(&mut self, emitted: &mut Vec<StoryEvent>) -> Result<(), StoryError> {
        for rule in self.rules.iter_mut().filter(|rule| rule.is_well_formed()) {
            rules::fire(rule, &mut self.world, emitted)?;
        }
        Ok(())
    }

    fn sync_phase(&mut self) {
        self.phase = if self.events.is_ended() {
            StoryPhase::Ended
        } else {
            StoryPhase::Running
        };
    }
}

impl std::fmt::Debug for Narrative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrative")
            .field("run_id", &self.run_id)
            .field("step_count", &self.step_count)
            .field("phase", &self.phase)
            .field("rules", &self.rules)
            .field("events", &self.events.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discourse::TupleRenderer;
    use story_world::Noun;

    fn sleepy_rule() -> Rule {
        Rule::unary(
            "#person",
            |_, a| a.int("sleepiness") < 10,
            |world, a| {
                let next = world.noun(a).map(|n| n.int("sleepiness") + 1).unwrap_or(0);
                world.set_property(a, "sleepiness", next);
                Ok(vec![StoryEvent::unary("moreSleepy", a)])
            },
        )
        .named("get sleepy")
    }

    fn sleeper() -> NarrativeBuilder {
        Narrative::builder()
            .seed(5)
            .noun(Noun::new("A").with_tag("person").with_property("sleepiness", 0))
            .renderer(TupleRenderer)
    }

    #[test]
    fn test_phase_progression() {
        let mut story = sleeper().rule(sleepy_rule()).build().unwrap();
        assert_eq!(story.phase(), StoryPhase::NotStarted);

        story.step().unwrap();
        assert_eq!(story.phase(), StoryPhase::Running);

        story.run_to_end(50).unwrap();
        assert_eq!(story.phase(), StoryPhase::Ended);
        assert!(story.is_ended());
    }

    #[test]
    fn test_initializer_only_on_first_step() {
        let mut story = sleeper()
            .initialize(|world| {
                world.set_property("A", "sleepiness", 8);
                Ok(vec![StoryEvent::unary("wakes", "A")])
            })
            .rule(sleepy_rule())
            .build()
            .unwrap();

        assert_eq!(story.step().unwrap(), vec![StoryEvent::unary("wakes", "A")]);
        assert_eq!(story.step_count(), 1);
        assert_eq!(story.step().unwrap(), vec![StoryEvent::unary("moreSleepy", "A")]);
        assert_eq!(story.step().unwrap(), vec![StoryEvent::unary("moreSleepy", "A")]);
        assert_eq!(story.step().unwrap(), vec![StoryEvent::end()]);
    }

    #[test]
    fn test_failed_initializer_runs_again() {
        let mut attempts = 0;
        let mut story = sleeper()
            .initialize(move |_| {
                attempts += 1;
                if attempts == 1 {
                    return Err(StoryError::action("setup", "not ready"));
                }
                Ok(vec![StoryEvent::unary("wakes", "A")])
            })
            .rule(sleepy_rule())
            .build()
            .unwrap();

        assert!(matches!(story.step(), Err(StoryError::Action { .. })));
        assert_eq!(story.phase(), StoryPhase::NotStarted);
        assert_eq!(story.step_count(), 0);
        assert!(story.events().is_empty());
        assert_eq!(story.world().noun("A").unwrap().int("sleepiness"), 0);

        assert_eq!(story.step().unwrap(), vec![StoryEvent::unary("wakes", "A")]);
        assert_eq!(story.phase(), StoryPhase::Running);
        assert_eq!(story.step_count(), 1);
        assert_eq!(story.step().unwrap(), vec![StoryEvent::unary("moreSleepy", "A")]);
    }

    #[test]
    fn test_ended_story_stays_ended() {
        let mut story = sleeper().build().unwrap();
        assert_eq!(story.step().unwrap(), vec![StoryEvent::end()]);
        let logged = story.events().len();

        for _ in 0..3 {
            assert!(story.step().unwrap().is_empty());
        }
        assert_eq!(story.events().len(), logged);
        assert_eq!(story.step_count(), 1);
    }

    #[test]
    fn test_stagnant_world_ends_story() {
        let mut story = sleeper()
            .rule(Rule::unary(
                "A",
                |_, _| true,
                |_, a| Ok(vec![StoryEvent::unary("waits", a)]),
            ))
            .build()
            .unwrap();

        assert_eq!(story.step().unwrap(), vec![StoryEvent::unary("waits", "A")]);
        assert_eq!(
            story.step().unwrap(),
            vec![StoryEvent::unary("waits", "A"), StoryEvent::end()]
        );
        assert!(story.step().unwrap().is_empty());
    }

    #[test]
    fn test_action_error_keeps_partial_step() {
        let mut story = sleeper()
            .noun(Noun::new("B").with_tag("person").with_property("sleepiness", 0))
            .rule(sleepy_rule())
            .rule(Rule::unary(
                "B",
                |_, _| true,
                |_, _| Err(StoryError::action("trip", "B tripped")),
            ))
            .build()
            .unwrap();

        let result = story.step();
        assert!(matches!(result, Err(StoryError::Action { .. })));
        assert_eq!(story.world().noun("A").unwrap().int("sleepiness"), 1);
        assert_eq!(story.world().noun("B").unwrap().int("sleepiness"), 1);
        assert_eq!(story.events().len(), 2);
        assert!(!story.is_ended());
    }

    #[test]
    fn test_step_and_render() {
        let mut story = sleeper().rule(sleepy_rule()).build().unwrap();
        assert_eq!(story.step_and_render().unwrap(), vec!["A moreSleepy".to_string()]);
    }
}
