use bevy::prelude::*;
use bevy_camera_tool::{FollowCamera, ToolCamera, VirtualCamera};

use crate::config::ConfigLoaded;

/// Marker component for the render camera
#[derive(Component)]
pub struct GameCamera;

/// Camera entities spawned at startup, picked up when the rig is assembled.
#[derive(Resource, Clone, Copy, Debug)]
pub struct GameCameras {
  pub view: Entity,
  pub follow: Entity,
  pub tool: Entity,
}

/// Spawns the render camera, both virtual cameras and the sun.
pub fn setup_camera(mut commands: Commands, config: Res<ConfigLoaded>) {
  let camera = &config.camera;
  let priorities = camera.priorities;

  let view = commands
    .spawn((
      GameCamera,
      Name::new("Game Camera"),
      Camera3d::default(),
      Projection::Perspective(PerspectiveProjection {
        fov: camera.fov_degrees.to_radians(),
        ..default()
      }),
      Transform::from_xyz(0.0, 3.0, 6.0).looking_at(Vec3::Y, Vec3::Y),
    ))
    .id();

  let follow = commands
    .spawn((
      Name::new("Follow Camera"),
      VirtualCamera::new(priorities.follow),
      FollowCamera {
        pivot_offset: Vec3::Y * camera.pivot_height,
        distance: camera.follow_distance,
        smoothness: camera.follow_smoothness,
        pivot: None,
      },
      Transform::default(),
    ))
    .id();

  let tool = commands
    .spawn((
      Name::new("Tool Camera"),
      VirtualCamera::new(priorities.tool_idle),
      ToolCamera {
        mount_offset: Vec3::from_array(camera.tool_mount),
      },
      Transform::default(),
    ))
    .id();

  commands.insert_resource(GameCameras { view, follow, tool });

  commands.spawn((
    Name::new("Sun"),
    DirectionalLight {
      illuminance: 8000.0,
      shadows_enabled: true,
      ..default()
    },
    Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
  ));
}
