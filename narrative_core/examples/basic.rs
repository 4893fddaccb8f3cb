//! Chris gets sleepier and sleepier, then climbs into bed.
//!
//! Run with: cargo run -p narrative_core --example basic

use narrative_core::{Narrative, NarrativeConfig, Rule, StoryEvent};
use story_world::World;
use tracing_subscriber::EnvFilter;

const STORY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/stories/basic.toml");

fn bump(world: &mut World, name: &str, key: &str) {
    let next = world.noun(name).map_or(0, |n| n.int(key)) + 1;
    world.set_property(name, key, next);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("narrative_core=warn".parse()?))
        .init();

    let mut story = Narrative::builder()
        .config(NarrativeConfig::load(STORY)?)
        .rule(Rule::unary(
            "Chris",
            |_, a| a.int("sleepiness") < 10,
            |world, a| {
                bump(world, a, "sleepiness");
                Ok(vec![StoryEvent::unary("moreSleepy", a)])
            },
        ))
        .rule(Rule::unary(
            "Chris",
            |_, a| a.int("sleepiness") == 7,
            |_, a| Ok(vec![StoryEvent::unary("reallySleepy", a)]),
        ))
        .rule(Rule::binary(
            "Chris",
            "king-size bed",
            |world, a, b| {
                a.int("sleepiness") >= 10
                    && !world.is_related("sleepingIn", &a.name, &b.name)
                    && !b.flag("occupied")
            },
            |world, a, b| {
                world.relate("sleepingIn", a, b);
                world.set_property(b, "occupied", true);
                Ok(vec![StoryEvent::binary("getsInto", a, b)])
            },
        ))
        .rule(Rule::binary(
            "Chris",
            "king-size bed",
            |world, a, b| world.is_related("sleepingIn", &a.name, &b.name),
            |_, a, b| Ok(vec![StoryEvent::binary("asleep", a, b)]),
        ))
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
