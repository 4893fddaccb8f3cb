//! End-to-end behavior of complete stories.

use narrative_core::{Narrative, NarrativeBuilder, Rule, StoryEvent, TupleRenderer};
use story_world::Noun;

fn increment(world: &mut story_world::World, name: &str, key: &str) {
    let next = world.noun(name).map_or(0, |n| n.int(key)) + 1;
    world.set_property(name, key, next);
}

fn sleepy_story() -> Narrative {
    Narrative::builder()
        .seed(1)
        .noun(Noun::new("A").with_tag("person").with_property("sleepiness", 0))
        .rule(Rule::unary(
            "#person",
            |_, a| a.int("sleepiness") < 10,
            |world, a| {
                increment(world, a, "sleepiness");
                Ok(vec![StoryEvent::unary("moreSleepy", a)])
            },
        ))
        .renderer(TupleRenderer)
        .build()
        .unwrap()
}

/// Rooms, people, and drinks; people wander at random until they settle.
fn household(seed: u64) -> NarrativeBuilder {
    Narrative::builder()
        .seed(seed)
        .nouns([
            Noun::new("kitchen").with_tag("room"),
            Noun::new("living room").with_tag("room"),
            Noun::new("study").with_tag("room"),
            Noun::new("Max").with_tag("person").with_property("has_drink", false),
            Noun::new("Rory").with_tag("person").with_property("has_drink", false),
            Noun::new("coffee").with_tag("drink"),
            Noun::new("tea").with_tag("drink"),
        ])
        .initialize(|world| {
            world.reciprocal("connects to", "kitchen", "living room");
            world.reciprocal("connects to", "kitchen", "study");
            world.relate("currently in", "Max", "living room");
            world.relate("currently in", "Rory", "study");
            world.relate("currently in", "coffee", "kitchen");
            world.relate("currently in", "tea", "kitchen");
            Ok(vec![
                StoryEvent::binary("in", "Max", "living room"),
                StoryEvent::binary("in", "Rory", "study"),
            ])
        })
        .rule(
            Rule::binary(
                "#person",
                "#drink",
                |world, a, b| {
                    let here = world.related_name_by_tag("currently in", &a.name, "room");
                    let there = world.related_name_by_tag("currently in", &b.name, "room");
                    here.is_some() && here == there && !a.flag("has_drink")
                },
                |world, a, b| {
                    world.unrelate_by_tag("currently in", b, "room");
                    world.set_property(a, "has_drink", true);
                    Ok(vec![StoryEvent::binary("take", a, b)])
                },
            )
            .named("take"),
        )
        .rule(
            Rule::unary(
                "#person",
                |world, a| !(world.is_related("currently in", &a.name, "study") && a.flag("has_drink")),
                |world, a| {
                    let Some(current) = world.related_name_by_tag("currently in", a, "room") else {
                        return Ok(Vec::new());
                    };
                    let exits = world.all_related_names_by_tag("connects to", &current, "room");
                    let Some(dest) = world.choice(&exits).cloned() else {
                        return Ok(Vec::new());
                    };
                    world.unrelate("currently in", a, &current);
                    world.relate("currently in", a, &dest);
                    Ok(vec![StoryEvent::binary("moveTo", a, dest)])
                },
            )
            .named("move"),
        )
        .renderer(TupleRenderer)
}

#[test]
fn sleepiness_counts_to_ten_then_ends() {
    let mut story = sleepy_story();

    for step in 1..=10 {
        let events = story.step().unwrap();
        assert_eq!(events, vec![StoryEvent::unary("moreSleepy", "A")], "step {}", step);
    }

    let last = story.step().unwrap();
    assert_eq!(last.len(), 1);
    assert!(last[0].is_ending());

    let sleepy = story
        .events()
        .iter()
        .filter(|e| e.verb() == "moreSleepy")
        .count();
    assert_eq!(sleepy, 10);

    for _ in 0..5 {
        assert!(story.step().unwrap().is_empty());
    }
}

#[test]
fn initializer_step_fires_no_rules() {
    let mut story = household(3).build().unwrap();
    let first = story.step().unwrap();
    assert_eq!(
        first,
        vec![
            StoryEvent::binary("in", "Max", "living room"),
            StoryEvent::binary("in", "Rory", "study"),
        ]
    );
    assert!(!story.world().noun("Max").unwrap().flag("has_drink"));
}

#[test]
fn same_seed_same_story() {
    let mut first = household(42).build().unwrap();
    let mut second = household(42).build().unwrap();

    let a = first.run_to_end(100).unwrap();
    let b = second.run_to_end(100).unwrap();
    assert_eq!(a, b);
    assert_eq!(first.events().as_slice(), second.events().as_slice());
}

#[test]
fn deterministic_without_randomness() {
    let first = sleepy_story().run_to_end(50).unwrap();
    let second = sleepy_story().run_to_end(50).unwrap();
    assert_eq!(first.len(), 11);
    assert_eq!(first, second);
}

#[test]
fn later_rules_see_earlier_mutations_in_the_same_step() {
    let mut story = Narrative::builder()
        .seed(1)
        .noun(Noun::new("Joe").with_tag("person").with_property("hungry", true))
        .noun(Noun::new("cake").with_tag("food"))
        .rule(Rule::binary(
            "#person",
            "#food",
            |_, a, b| a.flag("hungry") && !b.flag("eaten"),
            |world, a, b| {
                world.set_property(a, "hungry", false);
                world.set_property(b, "eaten", true);
                Ok(vec![StoryEvent::binary("eat", a, b)])
            },
        ))
        .rule(Rule::unary(
            "#person",
            |_, a| !a.flag("hungry") && !a.flag("content"),
            |world, a| {
                world.set_property(a, "content", true);
                Ok(vec![StoryEvent::unary("isHappy", a)])
            },
        ))
        .renderer(TupleRenderer)
        .build()
        .unwrap();

    assert_eq!(
        story.step().unwrap(),
        vec![
            StoryEvent::binary("eat", "Joe", "cake"),
            StoryEvent::unary("isHappy", "Joe"),
        ]
    );
}

#[test]
fn self_pairs_never_bound() {
    let mut story = Narrative::builder()
        .seed(1)
        .nouns([
            Noun::new("Joe").with_tag("person"),
            Noun::new("Mary").with_tag("person"),
            Noun::new("Horatio").with_tag("person"),
        ])
        .rule(Rule::binary(
            "#person",
            "#person",
            |world, a, b| !world.is_related("friendship", &a.name, &b.name),
            |world, a, b| {
                assert_ne!(a, b);
                world.reciprocal("friendship", a, b);
                Ok(vec![StoryEvent::binary("makeFriends", a, b)])
            },
        ))
        .renderer(TupleRenderer)
        .build()
        .unwrap();

    let events = story.step().unwrap();
    let pairs: Vec<_> = events.iter().map(|e| e.to_tuple()).collect();
    assert_eq!(
        pairs,
        vec![
            vec!["Joe", "makeFriends", "Mary"],
            vec!["Joe", "makeFriends", "Horatio"],
            vec!["Mary", "makeFriends", "Horatio"],
        ]
    );
    assert!(story.world().is_related("friendship", "Horatio", "Joe"));
    assert_eq!(story.step().unwrap(), vec![StoryEvent::end()]);
}

#[test]
fn unrelate_by_tag_clears_contents() {
    let mut story = Narrative::builder()
        .seed(1)
        .nouns([
            Noun::new("room").with_tag("room"),
            Noun::new("item").with_tag("item"),
        ])
        .build()
        .unwrap();

    let world = story.world_mut();
    world.relate("in", "room", "item");
    assert!(world.is_related("in", "room", "item"));
    world.unrelate_by_tag("in", "room", "item");
    assert!(!world.is_related("in", "room", "item"));
}

#[test]
fn reciprocal_relations_are_symmetric() {
    let mut story = Narrative::builder()
        .nouns([Noun::new("a"), Noun::new("b")])
        .build()
        .unwrap();
    let world = story.world_mut();

    world.reciprocal("L", "a", "b");
    assert!(world.is_related("L", "a", "b"));
    assert!(world.is_related("L", "b", "a"));

    world.unreciprocal("L", "a", "b");
    assert!(!world.is_related("L", "a", "b"));
    assert!(!world.is_related("L", "b", "a"));
}
