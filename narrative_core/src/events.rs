//! Story events - the narrative facts rules emit.

use serde::Serialize;

/// Verb of the sentinel event that closes a story.
pub const END_VERB: &str = "_end";

/// An immutable narrative fact: a verb plus up to two nouns, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryEvent {
    verb: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    a: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    b: Option<String>,
}

impl StoryEvent {
    /// An event with no participants.
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            a: None,
            b: None,
        }
    }

    /// An event about one noun, e.g. `Chris moreSleepy`.
    pub fn unary(verb: impl Into<String>, a: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            a: Some(a.into()),
            b: None,
        }
    }

    /// An event relating two nouns, e.g. `Max take coffee`.
    pub fn binary(verb: impl Into<String>, a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            a: Some(a.into()),
            b: Some(b.into()),
        }
    }

    /// The sentinel that marks the end of a story.
    pub fn end() -> Self {
        Self::new(END_VERB)
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn a(&self) -> Option<&str> {
        self.a.as_deref()
    }

    pub fn b(&self) -> Option<&str> {
        self.b.as_deref()
    }

    /// Number of bound nouns.
    pub fn arity(&self) -> usize {
        usize::from(self.a.is_some()) + usize::from(self.b.is_some())
    }

    pub fn is_ending(&self) -> bool {
        self.verb == END_VERB
    }

    /// Headless form: `[verb]`, `[a, verb]` or `[a, verb, b]`.
    pub fn to_tuple(&self) -> Vec<&str> {
        match (self.a(), self.b()) {
            (Some(a), Some(b)) => vec![a, self.verb(), b],
            (Some(a), None) => vec![a, self.verb()],
            (None, _) => vec![self.verb()],
        }
    }
}

impl std::fmt::Display for StoryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_tuple().join(" "))
    }
}

/// Append-only record of every event a story has emitted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<StoryEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: StoryEvent) {
        self.events.push(event);
    }

    pub(crate) fn extend(&mut self, events: impl IntoIterator<Item = StoryEvent>) {
        self.events.extend(events);
    }

    pub fn last(&self) -> Option<&StoryEvent> {
        self.events.last()
    }

    /// Whether the most recent event is the end sentinel.
    pub fn is_ended(&self) -> bool {
        self.last().is_some_and(StoryEvent::is_ending)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoryEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[StoryEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_matches_bound_nouns() {
        let zero = StoryEvent::new("dawn");
        let one = StoryEvent::unary("moreSleepy", "Chris");
        let two = StoryEvent::binary("take", "Max", "coffee");

        assert_eq!(zero.arity(), 0);
        assert_eq!(one.arity(), 1);
        assert_eq!(two.arity(), 2);

        assert_eq!(zero.to_tuple(), vec!["dawn"]);
        assert_eq!(one.to_tuple(), vec!["Chris", "moreSleepy"]);
        assert_eq!(two.to_tuple(), vec!["Max", "take", "coffee"]);
    }

    #[test]
    fn test_ending() {
        assert!(StoryEvent::end().is_ending());
        assert_eq!(StoryEvent::end().verb(), END_VERB);
        assert!(!StoryEvent::unary("yawn", "Chris").is_ending());
    }

    #[test]
    fn test_display() {
        let event = StoryEvent::binary("chatsWith", "Max", "Rory");
        assert_eq!(event.to_string(), "Max chatsWith Rory");
    }

    #[test]
    fn test_serialize_skips_missing_nouns() {
        let json = serde_json::to_string(&StoryEvent::unary("isHungry", "Joe")).unwrap();
        assert_eq!(json, r#"{"verb":"isHungry","a":"Joe"}"#);
    }

    #[test]
    fn test_log_is_ended_only_on_last_event() {
        let mut log = EventLog::new();
        assert!(!log.is_ended());

        log.push(StoryEvent::end());
        assert!(log.is_ended());

        log.push(StoryEvent::new("epilogue"));
        assert!(!log.is_ended());
        assert_eq!(log.len(), 2);
    }
}
