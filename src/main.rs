mod activities;
mod combat;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod doors;
mod movement;
mod narrative;
mod placement;
mod rooms;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Sealed Rooms".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(Gravity(Vec2::ZERO))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        placement::PlacementPlugin,
        movement::MovementPlugin,
        combat::CombatPlugin,
        doors::DoorsPlugin,
        narrative::NarrativePlugin,
        activities::ActivitiesPlugin,
        rooms::RoomsPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
