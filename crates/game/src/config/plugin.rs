use std::path::PathBuf;

use bevy::{asset::AssetEvent, ecs::message::MessageReader, prelude::*, window::PrimaryWindow};
use bevy_camera_tool::{
  CameraPriorities, CameraToolSet, CharacterBody, FocusQueryService, FollowCamera, JumpConfig,
  LocomotionConfig, NearestToReticle, OrientationConfig, ToolCamera,
};
use bevy_common_assets::toml::TomlAssetPlugin;

use super::{ConfigHandle, ConfigLoaded, ConfigSource, GameConfig, read_config};
use crate::core::camera::GameCamera;

pub struct ConfigPlugin {
  pub path: PathBuf,
}

impl Plugin for ConfigPlugin {
  fn build(&self, app: &mut App) {
    app
      .insert_resource(ConfigSource {
        path: self.path.clone(),
      })
      .add_plugins(TomlAssetPlugin::<GameConfig>::new(&["config.toml"]))
      .add_systems(PreStartup, load_config_sync)
      .add_systems(
        Update,
        (
          watch_config_changes,
          (
            update_window_on_config_change,
            update_camera_tool_on_config_change,
            update_cameras_on_config_change,
          ),
        )
          .chain()
          .before(CameraToolSet::Input),
      );
  }
}

fn load_config_sync(
  mut commands: Commands,
  source: Res<ConfigSource>,
  asset_server: Res<AssetServer>,
) {
  let config = match read_config(&source.path) {
    Ok(config) => config,
    Err(err) => {
      warn!("{err}; using built-in defaults");
      GameConfig::default()
    }
  };
  commands.insert_resource(ConfigLoaded(config));

  // Hot reload only works for files inside the asset folder
  match source.path.strip_prefix("assets") {
    Ok(asset_path) => {
      let handle: Handle<GameConfig> = asset_server.load(asset_path.to_path_buf());
      commands.insert_resource(ConfigHandle(handle));
    }
    Err(_) => info!(
      "Config {} is outside the asset folder; hot reload disabled",
      source.path.display()
    ),
  }
}

fn watch_config_changes(
  mut commands: Commands,
  config_handle: Option<Res<ConfigHandle>>,
  mut messages: MessageReader<AssetEvent<GameConfig>>,
  configs: Res<Assets<GameConfig>>,
) {
  let Some(config_handle) = config_handle else {
    return;
  };
  for event in messages.read() {
    if let AssetEvent::Modified { id } = event {
      if config_handle.0.id() == *id {
        if let Some(config) = configs.get(&config_handle.0) {
          info!("Config reloaded!");
          commands.insert_resource(ConfigLoaded(config.clone()));
        }
      }
    }
  }
}

fn update_window_on_config_change(
  config: Res<ConfigLoaded>,
  mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
  if config.is_changed() {
    if let Ok(mut window) = windows.single_mut() {
      window
        .resolution
        .set(config.window.width as f32, config.window.height as f32);
      window.title.clone_from(&config.window.title);
    }
  }
}

fn update_camera_tool_on_config_change(
  config: Res<ConfigLoaded>,
  mut priorities: ResMut<CameraPriorities>,
  mut focus_query: ResMut<FocusQueryService>,
  mut bodies: Query<
    (
      &mut OrientationConfig,
      &mut LocomotionConfig,
      &mut JumpConfig,
    ),
    With<CharacterBody>,
  >,
) {
  if !config.is_changed() {
    return;
  }

  *priorities = config.camera.priorities;
  *focus_query = FocusQueryService::new(NearestToReticle {
    max_distance: config.camera.focus_radius,
  });
  for (mut orientation, mut locomotion, mut jump) in &mut bodies {
    orientation.clone_from(&config.orientation);
    locomotion.clone_from(&config.locomotion);
    jump.clone_from(&config.jump);
  }
  debug!("Camera tool tuning applied");
}

fn update_cameras_on_config_change(
  config: Res<ConfigLoaded>,
  mut follow_cameras: Query<&mut FollowCamera>,
  mut tool_cameras: Query<&mut ToolCamera>,
  mut projections: Query<&mut Projection, With<GameCamera>>,
) {
  if !config.is_changed() {
    return;
  }

  let camera = &config.camera;
  for mut follow in &mut follow_cameras {
    follow.distance = camera.follow_distance;
    follow.smoothness = camera.follow_smoothness;
    follow.pivot_offset = Vec3::Y * camera.pivot_height;
  }
  for mut tool in &mut tool_cameras {
    tool.mount_offset = Vec3::from_array(camera.tool_mount);
  }
  for mut projection in &mut projections {
    if let Projection::Perspective(ref mut perspective) = *projection {
      perspective.fov = camera.fov_degrees.to_radians();
    }
  }
}
