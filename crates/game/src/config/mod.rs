mod plugin;

use std::fmt;
use std::path::{Path, PathBuf};

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
use bevy_camera_tool::{CameraPriorities, JumpConfig, LocomotionConfig, OrientationConfig};
pub use plugin::ConfigPlugin;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/game.config.toml";

/// Every section is optional; missing values take the built-in defaults.
#[derive(Asset, TypePath, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub orientation: OrientationConfig,
  pub locomotion: LocomotionConfig,
  pub jump: JumpConfig,
  pub player: PlayerConfig,
  pub audio: AudioConfig,
  pub world: WorldConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

impl Default for WindowConfig {
  fn default() -> Self {
    Self {
      width: 1280,
      height: 720,
      title: "Photo Walk".to_string(),
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CameraConfig {
  pub fov_degrees: f32,
  pub follow_distance: f32,
  pub follow_smoothness: f32,
  pub pivot_height: f32,
  pub tool_mount: [f32; 3],
  /// Reticle pick radius in logical pixels.
  pub focus_radius: f32,
  pub priorities: CameraPriorities,
}

impl Default for CameraConfig {
  fn default() -> Self {
    Self {
      fov_degrees: 60.0,
      follow_distance: 4.0,
      follow_smoothness: 8.0,
      pivot_height: 1.4,
      tool_mount: [0.0, 1.5, -0.2],
      focus_radius: 96.0,
      priorities: CameraPriorities::default(),
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PlayerConfig {
  pub spawn: [f32; 3],
  pub collider_radius: f32,
  pub collider_half_height: f32,
  pub snap_to_ground: f32,
  pub max_slope_angle: f32,
  pub autostep_height: f32,
  pub autostep_width: f32,
  /// Ground distance covered per footstep cue.
  pub stride_length: f32,
}

impl Default for PlayerConfig {
  fn default() -> Self {
    Self {
      spawn: [0.0, 2.0, 0.0],
      collider_radius: 0.3,
      collider_half_height: 0.6,
      snap_to_ground: 0.3,
      max_slope_angle: 45.0,
      autostep_height: 0.3,
      autostep_width: 0.2,
      stride_length: 0.8,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AudioConfig {
  pub volume: f32,
  pub footsteps: Vec<String>,
  pub landing: Option<String>,
}

impl Default for AudioConfig {
  fn default() -> Self {
    Self {
      volume: 0.5,
      footsteps: Vec::new(),
      landing: None,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
  pub ground_size: f32,
  pub notable_count: u32,
  pub notable_ring_radius: f32,
  pub seed: u64,
}

impl Default for WorldConfig {
  fn default() -> Self {
    Self {
      ground_size: 60.0,
      notable_count: 6,
      notable_ring_radius: 8.0,
      seed: 7,
    }
  }
}

#[derive(Debug)]
pub enum ConfigError {
  Read(PathBuf, std::io::Error),
  Parse(PathBuf, toml::de::Error),
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Read(path, err) => write!(f, "failed to read {}: {err}", path.display()),
      Self::Parse(path, err) => write!(f, "failed to parse {}: {err}", path.display()),
    }
  }
}

impl std::error::Error for ConfigError {}

pub fn read_config(path: &Path) -> Result<GameConfig, ConfigError> {
  let text =
    std::fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
  toml::from_str(&text).map_err(|err| ConfigError::Parse(path.to_path_buf(), err))
}

/// Where the config was read from, as given on the command line.
#[derive(Resource, Debug, Clone)]
pub struct ConfigSource {
  pub path: PathBuf,
}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<GameConfig>);

#[derive(Resource, Debug, Clone, Deref)]
pub struct ConfigLoaded(pub GameConfig);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shipped_config_matches_builtin_tuning() {
    let config: GameConfig =
      toml::from_str(include_str!("../../assets/config/game.config.toml")).unwrap();

    assert_eq!(config.locomotion, LocomotionConfig::default());
    assert_eq!(config.jump, JumpConfig::default());
    assert_eq!(config.orientation, OrientationConfig::default());
    assert_eq!(config.camera.priorities, CameraPriorities::default());
    assert!(config.audio.footsteps.is_empty());
  }

  #[test]
  fn missing_sections_fall_back_to_defaults() {
    let config: GameConfig = toml::from_str(
      r#"
      [window]
      title = "Test"

      [locomotion]
      sprint_speed = 8.0
      "#,
    )
    .unwrap();

    assert_eq!(config.window.title, "Test");
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.locomotion.sprint_speed, 8.0);
    assert_eq!(config.locomotion.walk_speed, 2.0);
    assert_eq!(config.camera.priorities.tool_active, 20);
  }

  #[test]
  fn unreadable_file_is_a_read_error() {
    let result = read_config(Path::new("does/not/exist.config.toml"));
    assert!(matches!(result, Err(ConfigError::Read(..))));
  }

  #[test]
  fn malformed_file_is_a_parse_error() {
    let err = toml::from_str::<GameConfig>("[window\nwidth = 3").unwrap_err();
    let err = ConfigError::Parse(PathBuf::from("bad.toml"), err);
    assert!(err.to_string().starts_with("failed to parse bad.toml"));
  }
}
