//! Hungry people eat, then befriend each other once everyone is fed.
//!
//! Run with: cargo run -p narrative_core --example relations

use narrative_core::{Narrative, NarrativeConfig, Rule, StoryEvent};
use tracing_subscriber::EnvFilter;

const STORY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/stories/relations.toml");

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("narrative_core=warn".parse()?))
        .init();

    let mut story = Narrative::builder()
        .config(NarrativeConfig::load(STORY)?)
        .initialize(|world| {
            Ok(world
                .nouns_by_property("hungry", true)
                .into_iter()
                .map(|noun| StoryEvent::unary("isHungry", noun.name.as_str()))
                .collect())
        })
        .rule(
            Rule::binary(
                "#person",
                "#food",
                |_, a, b| a.flag("hungry") && b.int("tastiness") > 0 && !b.flag("eaten"),
                |world, a, b| {
                    let tastiness = world.noun(b).map_or(0, |n| n.int("tastiness"));
                    let happiness = world.noun(a).map_or(0, |n| n.int("happiness"));

                    let mut events = vec![StoryEvent::binary("eat", a, b)];
                    world.set_property(a, "hungry", false);
                    world.set_property(b, "eaten", true);
                    world.set_property(a, "happiness", happiness + tastiness);
                    if tastiness >= 2 {
                        events.push(StoryEvent::binary("reallyLike", a, b));
                    }
                    Ok(events)
                },
            )
            .named("eat"),
        )
        .rule(
            Rule::binary(
                "#person",
                "#person",
                |world, a, b| {
                    !a.flag("hungry")
                        && !b.flag("hungry")
                        && !world.is_related("friendship", &a.name, &b.name)
                },
                |world, a, b| {
                    world.reciprocal("friendship", a, b);
                    Ok(vec![StoryEvent::binary("makeFriends", a, b)])
                },
            )
            .named("befriend"),
        )
        .rule(
            Rule::unary(
                "#person",
                |world, a| {
                    !a.flag("hungry")
                        && a.int("happiness") >= 2
                        && !world.all_related_by_tag("friendship", &a.name, "person").is_empty()
                },
                |_, a| Ok(vec![StoryEvent::unary("isHappy", a)]),
            )
            .named("express happiness"),
        )
        .build()?;

    for _ in 0..100 {
        let lines = story.step_and_render()?;
        if lines.is_empty() {
            break;
        }
        for line in lines {
            println!("{}", line);
        }
    }
    Ok(())
}
