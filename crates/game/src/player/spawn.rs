use bevy::prelude::*;
use bevy_camera_tool::{
  CameraRig, CharacterAudio, CharacterBundle, PlayerInput, Tripod, VerticalMotion,
  input::player_input_actions,
};
use bevy_rapier3d::prelude::*;

use super::cues::StrideTracker;
use crate::config::ConfigLoaded;
use crate::core::camera::GameCameras;

/// Spawns the character body and registers the camera rig around it.
pub fn spawn_player(
  mut commands: Commands,
  config: Res<ConfigLoaded>,
  cameras: Res<GameCameras>,
  tripods: Query<Entity, With<Tripod>>,
  asset_server: Res<AssetServer>,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
) {
  let player = &config.player;
  let spawn_pos = Vec3::from_array(player.spawn);

  let audio = CharacterAudio {
    footsteps: config
      .audio
      .footsteps
      .iter()
      .map(|path| asset_server.load(path.clone()))
      .collect(),
    landing: config.audio.landing.clone().map(|path| asset_server.load(path)),
    volume: config.audio.volume,
    ..default()
  };

  let body = commands
    .spawn((
      Name::new("Player"),
      CharacterBundle {
        orientation_config: config.orientation.clone(),
        locomotion_config: config.locomotion.clone(),
        vertical: VerticalMotion::new(&config.jump),
        jump_config: config.jump.clone(),
        ..default()
      },
      StrideTracker::new(player.stride_length),
      audio,
      Transform::from_translation(spawn_pos),
      Visibility::default(),
      Mesh3d(meshes.add(Capsule3d::new(
        player.collider_radius,
        player.collider_half_height * 2.0,
      ))),
      MeshMaterial3d(materials.add(Color::srgb_u8(230, 160, 90))),
      (
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(player.collider_half_height, player.collider_radius),
        KinematicCharacterController {
          snap_to_ground: Some(CharacterLength::Absolute(player.snap_to_ground)),
          max_slope_climb_angle: player.max_slope_angle.to_radians(),
          min_slope_slide_angle: player.max_slope_angle.to_radians(),
          autostep: Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(player.autostep_height),
            min_width: CharacterLength::Absolute(player.autostep_width),
            include_dynamic_bodies: false,
          }),
          ..default()
        },
        PlayerInput,
        player_input_actions(),
      ),
    ))
    .id();

  let tripod = tripods.iter().next();
  info!("Spawning player at {spawn_pos:?} (tripod: {tripod:?})");

  commands.insert_resource(CameraRig {
    body,
    follow_camera: cameras.follow,
    tool_camera: cameras.tool,
    view_camera: cameras.view,
    tripod,
  });
}
