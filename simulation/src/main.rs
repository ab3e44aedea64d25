//! Headless driver for the garden simulation.
//!
//! Plays a short scripted session against the default scenario: sows a
//! patch, advances days until an outcome, exercises undo/redo, and
//! leaves an autosave behind. Stands in for the presentation layer
//! during development.

use simulation::scenario::DEFAULT_SCENARIO;
use simulation::{GardenWorld, PlantType, SaveStore, Scenario};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("garden simulation starting");

    let scenario = Scenario::from_json(DEFAULT_SCENARIO)?;
    let mut world = GardenWorld::from_scenario(&scenario);
    let store = SaveStore::new("saves");

    if store.has_autosave() {
        // A real driver would prompt; the headless one starts fresh.
        info!("discarding previous autosave");
        store.discard_autosave()?;
    }

    // Sow a 3x3 patch of the scenario's starting seed choice.
    let seed = world.player_seed_choice;
    for row in 6..9 {
        for col in 6..9 {
            world.sow(row, col, seed);
        }
    }

    // Switch to flowers for a border row.
    world.set_seed_choice(PlantType::Flower);
    for col in 5..10 {
        world.sow(5, col, PlantType::Flower);
    }

    let outcome = loop {
        let report = world.advance_day();
        if let Some(message) = report.event_message {
            info!(day = report.day, %message, "scripted event");
        }
        if let Some(outcome) = report.outcome {
            break outcome;
        }
    };
    info!(?outcome, day = world.day, "session over");

    // One step back, one step forward, then persist.
    world.undo()?;
    world.redo()?;
    store.save(1, &world)?;
    store.autosave(&world)?;

    info!(
        undo_depth = world.history.undo_len(),
        "saved to slot 1 and autosave"
    );
    Ok(())
}
