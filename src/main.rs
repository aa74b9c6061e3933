use avian2d::prelude::*;
use bevy::prelude::*;

use ironclaw::arena::ArenaPlugin;
use ironclaw::content::ContentPlugin;
use ironclaw::diver::DiverPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Iron Claw Beast".to_string(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Gravity(Vec2::ZERO))
        .insert_resource(ClearColor(Color::srgb(0.02, 0.08, 0.14)))
        .add_plugins((ContentPlugin::default(), ArenaPlugin, DiverPlugin))
        .run();
}
