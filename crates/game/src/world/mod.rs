//! The walkable scene: ground, notable props to photograph, and the tripod.

mod notables;
mod tripod;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::ConfigLoaded;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, spawn_world)
      .add_systems(
        Update,
        (
          notables::highlight_focus,
          notables::log_captures,
          tripod::place_deployed_tripod,
        ),
      );
  }
}

pub fn spawn_world(
  mut commands: Commands,
  config: Res<ConfigLoaded>,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
) {
  let world = &config.world;
  let size = world.ground_size;

  commands.spawn((
    Name::new("Ground"),
    Mesh3d(meshes.add(Cuboid::new(size, 0.2, size))),
    MeshMaterial3d(materials.add(Color::srgb_u8(96, 128, 80))),
    Transform::from_xyz(0.0, -0.1, 0.0),
    RigidBody::Fixed,
    Collider::cuboid(size / 2.0, 0.1, size / 2.0),
  ));

  notables::spawn_notables(&mut commands, world, &mut meshes, &mut materials);
  tripod::spawn_tripod(
    &mut commands,
    config.camera.priorities.tripod,
    &mut meshes,
    &mut materials,
  );
}
