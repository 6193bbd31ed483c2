//! Content domain: room definitions and gameplay defaults loaded from RON.

mod builtin;
mod data;
mod loader;
mod registry;
mod validation;


pub use builtin::builtin_rooms;
pub use data::{
    ActivityDef, DataFile, DoorDef, DoorDefaults, DoorSide, GameplayDefaults, NpcDef, ObstacleDef,
    RoomDef,
};
pub use loader::{ContentLoadError, load_all_content, parse_data_file, parse_single_file};
pub use registry::RoomCatalog;
pub use validation::{ValidationIssue, validate_defaults, validate_rooms};

use std::path::Path;

use bevy::prelude::*;

const CONTENT_PATH: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoomCatalog>()
            .init_resource::<GameplayDefaults>()
            .add_systems(Startup, load_content);
    }
}

/// Load content from disk, falling back to the built-in rooms and defaults
/// per file so a broken file never stops the game from booting.
fn load_content(mut commands: Commands) {
    let (rooms, defaults) = load_all_content(Path::new(CONTENT_PATH));

    let catalog = rooms.unwrap_or_else(|e| {
        error!("[CONTENT] {}; using built-in rooms", e);
        RoomCatalog::from_defs(builtin_rooms())
    });
    let defaults = defaults.unwrap_or_else(|e| {
        error!("[CONTENT] {}; using default tuning", e);
        GameplayDefaults::default()
    });

    let mut issues = validate_defaults(&defaults);
    issues.extend(validate_rooms(&catalog));
    for issue in &issues {
        warn!("[CONTENT] {}", issue);
    }

    info!(
        "[CONTENT] Loaded {} ({} validation issues)",
        catalog.summary(),
        issues.len()
    );

    commands.insert_resource(defaults.activity_tuning());
    commands.insert_resource(defaults);
    commands.insert_resource(catalog);
}
