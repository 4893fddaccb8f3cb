//! Two sleepers share a bunk bed, matched by tag instead of by name.
//!
//! Run with: cargo run -p narrative_core --example tags

use narrative_core::{Narrative, NarrativeConfig, Rule, StoryEvent};
use tracing_subscriber::EnvFilter;

const STORY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/stories/tags.toml");

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("narrative_core=warn".parse()?))
        .init();

    let mut story = Narrative::builder()
        .config(NarrativeConfig::load(STORY)?)
        .rule(
            Rule::unary(
                "#person",
                |_, a| a.int("sleepiness") < 10,
                |world, a| {
                    let next = world.noun(a).map_or(0, |n| n.int("sleepiness")) + 1;
                    world.set_property(a, "sleepiness", next);
                    Ok(vec![StoryEvent::unary("moreSleepy", a)])
                },
            )
            .named("get sleepier"),
        )
        .rule(Rule::unary(
            "#person",
            |_, a| a.int("sleepiness") == 7,
            |_, a| Ok(vec![StoryEvent::unary("reallySleepy", a)]),
        ))
        .rule(
            Rule::binary(
                "#person",
                "#bed",
                |world, a, b| {
                    a.int("sleepiness") >= 10
                        && world.related_by_tag("sleepingIn", &a.name, "bed").is_none()
                        && !b.flag("occupied")
                },
                |world, a, b| {
                    world.relate("sleepingIn", a, b);
                    world.set_property(b, "occupied", true);
                    Ok(vec![StoryEvent::binary("getsInto", a, b)])
                },
            )
            .named("go to bed"),
        )
        .rule(Rule::binary(
            "#person",
            "#bed",
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
