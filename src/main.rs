use bevy::prelude::*;
use hex_tiles::rendering::plugin::HexTilePlugin;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest()) // Keep sprite texels crisp
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Hex Tiles".to_string(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(HexTilePlugin)
        .insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.12)))
        .add_systems(Startup, spawn_camera)
        .run();
}

fn spawn_camera(mut commands: Commands) {
    // One world unit per screen pixel, looking down -Z at the chunk.
    commands.spawn((
        Camera3d::default(),
        Projection::from(OrthographicProjection::default_3d()),
        Transform::from_xyz(0.0, 0.0, 500.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
