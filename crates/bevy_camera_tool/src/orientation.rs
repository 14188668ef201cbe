//! Yaw/pitch model driven by look input.
//!
//! While the camera tool is active the yaw/pitch drive the tool camera and
//! the body keeps its heading. Otherwise they drive the follow camera that
//! rides on the body (classic third-person mouse look).

use bevy::prelude::*;
use serde::Deserialize;

use crate::angles::{clamp_pitch, look_rotation, normalize_angle, yaw_rotation};
use crate::camera_mode::{CameraMode, CameraModeState, ToolUi};
use crate::input::CharacterInput;
use crate::rig::{CameraRig, CharacterBody};

#[derive(Component, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OrientationConfig {
  /// Degrees per unit of look input per second.
  pub sensitivity: f32,
  /// Degrees per unit of look input per second on the reticle path.
  pub reticle_sensitivity: f32,
  pub min_pitch: f32,
  pub max_pitch: f32,
  /// Squared magnitude below which look input is ignored.
  pub look_threshold: f32,
}

impl Default for OrientationConfig {
  fn default() -> Self {
    Self {
      sensitivity: 25.0,
      reticle_sensitivity: 5.0,
      min_pitch: -40.0,
      max_pitch: 70.0,
      look_threshold: 0.01,
    }
  }
}

/// Accumulated camera yaw and pitch in degrees.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
  pub yaw: f32,
  pub pitch: f32,
}

impl Orientation {
  pub fn new(yaw: f32, pitch: f32) -> Self {
    Self { yaw, pitch }
  }

  /// Accumulates a look delta. Returns false when the input is below the
  /// dead zone and nothing changed.
  pub fn apply_look(&mut self, look: Vec2, dt: f32, config: &OrientationConfig) -> bool {
    if look.length_squared() < config.look_threshold {
      return false;
    }
    let scale = config.sensitivity * dt;
    self.yaw = normalize_angle(self.yaw + look.x * scale);
    self.pitch = clamp_pitch(self.pitch + look.y * scale, config.min_pitch, config.max_pitch);
    true
  }

  pub fn rotation(&self) -> Quat {
    look_rotation(self.yaw, self.pitch)
  }
}

/// Independent pitch offset applied by reticle aiming while the tool UI is
/// shown.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq)]
pub struct ReticleAim {
  pub pitch: f32,
}

impl ReticleAim {
  /// Moves the reticle by a look delta and returns the yaw in degrees the
  /// body should turn by.
  pub fn apply_move(&mut self, look: Vec2, dt: f32, config: &OrientationConfig) -> f32 {
    let scale = config.reticle_sensitivity * dt;
    self.pitch = clamp_pitch(self.pitch + look.y * scale, config.min_pitch, config.max_pitch);
    look.x * scale
  }

  /// Tool camera rotation for a base orientation combined with this offset.
  pub fn tool_rotation(&self, orientation: &Orientation, config: &OrientationConfig) -> Quat {
    let pitch = clamp_pitch(
      orientation.pitch + self.pitch,
      config.min_pitch,
      config.max_pitch,
    );
    look_rotation(orientation.yaw, pitch)
  }
}

/// Applies look input to the orientation model and writes the result to
/// whichever camera the current mode drives.
pub fn apply_look_input(
  rig: Option<Res<CameraRig>>,
  mode: Res<CameraModeState>,
  ui: Res<ToolUi>,
  time: Res<Time>,
  mut bodies: Query<
    (
      &CharacterInput,
      &OrientationConfig,
      &mut Orientation,
      &mut ReticleAim,
      &mut Transform,
    ),
    With<CharacterBody>,
  >,
  mut cameras: Query<&mut Transform, Without<CharacterBody>>,
) {
  let Some(rig) = rig else { return };
  let Ok((input, config, mut orientation, mut reticle, mut body_transform)) =
    bodies.get_mut(rig.body)
  else {
    return;
  };
  let dt = time.delta_secs();

  orientation.apply_look(input.look, dt, config);

  if ui.shown && input.look.length_squared() >= config.look_threshold {
    let turn = reticle.apply_move(input.look, dt, config);
    // Carried by the orientation so the tool camera and strafing keep it
    orientation.yaw = normalize_angle(orientation.yaw + turn);
    body_transform.rotation = yaw_rotation(turn) * body_transform.rotation;
  }

  match mode.mode() {
    CameraMode::ToolActive => {
      if let Ok(mut tool) = cameras.get_mut(rig.tool_camera) {
        tool.rotation = reticle.tool_rotation(&orientation, config);
      }
    }
    CameraMode::ThirdPerson => {
      if let Ok(mut follow) = cameras.get_mut(rig.follow_camera) {
        follow.rotation = orientation.rotation();
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pitch_stays_in_range_for_any_accumulation() {
    let config = OrientationConfig::default();
    let mut orientation = Orientation::default();
    let deltas = [37.0, -120.0, 500.0, -900.0, 3.5, 1_000.0, -0.5, 260.0];
    for (i, dy) in deltas.iter().cycle().take(400).enumerate() {
      let dx = if i % 3 == 0 { 40.0 } else { -13.0 };
      orientation.apply_look(Vec2::new(dx, *dy), 0.016 * (1 + i % 7) as f32, &config);
      assert!(
        (config.min_pitch..=config.max_pitch).contains(&orientation.pitch),
        "pitch {} escaped range at step {i}",
        orientation.pitch
      );
      assert!((-180.0..180.0).contains(&orientation.yaw));
    }
  }

  #[test]
  fn small_look_input_is_ignored() {
    let config = OrientationConfig::default();
    let mut orientation = Orientation::new(10.0, 5.0);
    assert!(!orientation.apply_look(Vec2::new(0.05, 0.05), 1.0, &config));
    assert_eq!(orientation, Orientation::new(10.0, 5.0));
  }

  #[test]
  fn look_scales_by_time_and_sensitivity() {
    let config = OrientationConfig::default();
    let mut orientation = Orientation::default();
    orientation.apply_look(Vec2::new(2.0, 1.0), 0.1, &config);
    assert!((orientation.yaw - 5.0).abs() < 1e-4);
    assert!((orientation.pitch - 2.5).abs() < 1e-4);
  }

  #[test]
  fn reticle_pitch_wraps_before_clamping() {
    let config = OrientationConfig {
      reticle_sensitivity: 1.0,
      ..default()
    };
    let mut aim = ReticleAim { pitch: 60.0 };
    // +300 lands on 360 which wraps to 0 rather than pinning at the max
    aim.apply_move(Vec2::new(0.0, 300.0), 1.0, &config);
    assert!((aim.pitch - 0.0).abs() < 1e-4, "{}", aim.pitch);
  }

  #[test]
  fn reticle_move_reports_body_turn() {
    let config = OrientationConfig::default();
    let mut aim = ReticleAim::default();
    let turn = aim.apply_move(Vec2::new(4.0, 0.0), 0.5, &config);
    assert!((turn - 10.0).abs() < 1e-4);
    assert_eq!(aim.pitch, 0.0);
  }

  #[test]
  fn tool_rotation_clamps_combined_pitch() {
    let config = OrientationConfig::default();
    let aim = ReticleAim { pitch: 50.0 };
    let rotation = aim.tool_rotation(&Orientation::new(0.0, 50.0), &config);
    let expected = look_rotation(0.0, config.max_pitch);
    assert!(rotation.abs_diff_eq(expected, 1e-5));
  }
}
