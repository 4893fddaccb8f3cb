//! People wander a small house, pick up drinks, chat, and get to work.
//!
//! Run with: cargo run -p narrative_core --example rooms_and_objects
//! (set `RUST_LOG=narrative_core=debug` to watch rules fire)

use narrative_core::{Narrative, NarrativeConfig, Rule, StoryEvent};
use story_world::World;
use tracing_subscriber::EnvFilter;

const STORY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/stories/rooms_and_objects.toml");

fn location(world: &World, name: &str) -> Option<String> {
    world.related_name_by_tag("currently in", name, "room")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("narrative_core=warn".parse()?))
        .init();

    let mut story = Narrative::builder()
        .config(NarrativeConfig::load(STORY)?)
        .initialize(|world| {
            world.reciprocal("connects to", "kitchen", "living room");
            world.reciprocal("connects to", "kitchen", "study");

            let mut events = Vec::new();
            for (thing, room) in [
                ("Max", "living room"),
                ("Rory", "study"),
                ("coffee", "kitchen"),
                ("tea", "kitchen"),
            ] {
                world.relate("currently in", thing, room);
                events.push(StoryEvent::binary("in", thing, room));
            }
            Ok(events)
        })
        .rule(
            Rule::binary(
                "#person",
                "#drink",
                |world, a, b| {
                    location(world, &a.name) == location(world, &b.name) && !a.flag("has_drink")
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
                    let Some(current) = location(world, a) else {
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
        .rule(
            Rule::binary(
                "#person",
                "#person",
                |world, a, b| location(world, &a.name) == location(world, &b.name),
                |_, a, b| Ok(vec![StoryEvent::binary("chatsWith", a, b)]),
            )
            .named("talk"),
        )
        .rule(
            Rule::unary(
                "#person",
                |world, a| world.is_related("currently in", &a.name, "study") && a.flag("has_drink"),
                |_, a| Ok(vec![StoryEvent::unary("isWorking", a)]),
            )
            .named("work"),
        )
        .rule(
            Rule::unary(
                "#person",
                |world, a| world.is_related("currently in", &a.name, "living room"),
                |_, a| Ok(vec![StoryEvent::unary("playGames", a)]),
            )
            .named("play video games"),
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
