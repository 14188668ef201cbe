//! Locomotion state machine: speed blending and heading.
//!
//! The movement scheme follows the camera mode. With the tool active the
//! character strafes: it faces where the camera looks and moves relative to
//! the camera. Otherwise it turns toward the input direction and always
//! moves forward along its own heading.

mod systems;

use bevy::prelude::*;
use serde::Deserialize;
pub use systems::{apply_direct_motion, update_locomotion};

use crate::angles::{smooth_damp_angle, yaw_rotation};
use crate::camera_mode::CameraMode;

#[derive(Component, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
  pub walk_speed: f32,
  pub sprint_speed: f32,
  /// How fast speed and the animation blend approach their target.
  pub speed_change_rate: f32,
  /// Dead band around the target speed inside which speed snaps.
  pub speed_offset: f32,
  /// Time constant of the heading spring.
  pub rotation_smooth_time: f32,
  /// Animation blend values below this decay to zero.
  pub blend_floor: f32,
}

impl Default for LocomotionConfig {
  fn default() -> Self {
    Self {
      walk_speed: 2.0,
      sprint_speed: 5.335,
      speed_change_rate: 10.0,
      speed_offset: 0.1,
      rotation_smooth_time: 0.12,
      blend_floor: 0.01,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementScheme {
  /// Face the camera heading, move camera-relative.
  Strafing,
  /// Turn toward the input direction, move along the body heading.
  FacingDirection,
}

impl From<CameraMode> for MovementScheme {
  fn from(mode: CameraMode) -> Self {
    match mode {
      CameraMode::ToolActive => Self::Strafing,
      CameraMode::ThirdPerson => Self::FacingDirection,
    }
  }
}

/// This frame's movement request.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MoveIntent {
  pub axis: Vec2,
  pub sprint: bool,
  pub analog: bool,
}

impl MoveIntent {
  /// Scale applied to speed: stick magnitude for analog input, else 1.
  pub fn magnitude(&self) -> f32 {
    if self.analog { self.axis.length() } else { 1.0 }
  }
}

/// Result of one locomotion step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionStep {
  /// New body yaw in degrees.
  pub body_yaw: f32,
  /// Horizontal displacement for this frame.
  pub displacement: Vec3,
  /// Value for the animation `motion speed` parameter.
  pub motion_speed: f32,
}

#[derive(Component, Default, Debug, Clone, Copy, PartialEq)]
pub struct Locomotion {
  pub speed: f32,
  pub animation_blend: f32,
  /// Heading the body is turning toward, in degrees.
  pub target_yaw: f32,
  /// Smoothing accumulator for the heading spring.
  pub rotation_velocity: f32,
}

impl Locomotion {
  pub fn target_speed(intent: &MoveIntent, config: &LocomotionConfig) -> f32 {
    if intent.axis == Vec2::ZERO {
      0.0
    } else if intent.sprint {
      config.sprint_speed
    } else {
      config.walk_speed
    }
  }

  /// Advances speed, blend and heading by one frame.
  pub fn step(
    &mut self,
    scheme: MovementScheme,
    intent: &MoveIntent,
    body_yaw: f32,
    camera_yaw: f32,
    dt: f32,
    config: &LocomotionConfig,
  ) -> LocomotionStep {
    let target_speed = Self::target_speed(intent, config);
    let magnitude = intent.magnitude();

    self.speed = smooth_speed(self.speed, target_speed, magnitude, dt, config);
    self.animation_blend = blend_toward(self.animation_blend, target_speed, dt, config);

    let (body_yaw, direction) = match scheme {
      MovementScheme::Strafing => {
        self.target_yaw = camera_yaw;
        let yaw = smooth_damp_angle(
          body_yaw,
          camera_yaw,
          &mut self.rotation_velocity,
          config.rotation_smooth_time,
          dt,
        );
        (yaw, strafe_direction(camera_yaw, intent.axis))
      }
      MovementScheme::FacingDirection => {
        let yaw = if intent.axis != Vec2::ZERO {
          self.target_yaw = facing_target_yaw(intent.axis, camera_yaw);
          smooth_damp_angle(
            body_yaw,
            self.target_yaw,
            &mut self.rotation_velocity,
            config.rotation_smooth_time,
            dt,
          )
        } else {
          body_yaw
        };
        (yaw, yaw_rotation(yaw) * Vec3::NEG_Z)
      }
    };

    LocomotionStep {
      body_yaw,
      displacement: direction * (self.speed * dt),
      motion_speed: magnitude,
    }
  }
}

/// Moves `current` toward `target * magnitude`, snapping inside the dead
/// band around `target`. Rounded to three decimals outside the band.
pub fn smooth_speed(
  current: f32,
  target: f32,
  magnitude: f32,
  dt: f32,
  config: &LocomotionConfig,
) -> f32 {
  let outside_band =
    current < target - config.speed_offset || current > target + config.speed_offset;
  if !outside_band {
    return target;
  }
  let t = (dt * config.speed_change_rate).clamp(0.0, 1.0);
  let speed = current + (target * magnitude - current) * t;
  (speed * 1000.0).round() / 1000.0
}

/// Unclamped blend toward `target` that drops to exactly zero below the
/// floor.
pub fn blend_toward(current: f32, target: f32, dt: f32, config: &LocomotionConfig) -> f32 {
  let t = (dt * config.speed_change_rate).clamp(0.0, 1.0);
  let blend = current + (target - current) * t;
  if blend < config.blend_floor { 0.0 } else { blend }
}

/// Camera-relative movement direction on the ground plane.
pub fn strafe_direction(camera_yaw: f32, axis: Vec2) -> Vec3 {
  let rotation = yaw_rotation(camera_yaw);
  let right = rotation * Vec3::X;
  let forward = rotation * Vec3::NEG_Z;
  let direction = right * axis.x + forward * axis.y;
  Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}

/// Heading that points the body along the input direction as seen from the
/// camera.
pub fn facing_target_yaw(axis: Vec2, camera_yaw: f32) -> f32 {
  axis.x.atan2(axis.y).to_degrees() + camera_yaw
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::angles::normalize_angle;

  const DT: f32 = 1.0 / 60.0;

  #[test]
  fn speed_approaches_target_then_snaps() {
    let config = LocomotionConfig::default();
    let mut speed = 0.0;
    let mut snapped = false;

    for _ in 0..120 {
      let was_in_band = (speed - 5.0f32).abs() <= config.speed_offset;
      let next = smooth_speed(speed, 5.0, 1.0, DT, &config);
      assert!(next >= speed, "speed went backwards: {speed} -> {next}");
      assert!(next <= 5.0, "speed overshot: {next}");
      if was_in_band {
        assert_eq!(next, 5.0);
        snapped = true;
      }
      speed = next;
    }

    assert!(snapped);
    assert_eq!(speed, 5.0);
  }

  #[test]
  fn speed_is_rounded_to_three_decimals() {
    let config = LocomotionConfig::default();
    let speed = smooth_speed(0.0, 5.335, 1.0, 0.0123, &config);
    assert_eq!((speed * 1000.0).round() / 1000.0, speed);
  }

  #[test]
  fn blend_decays_to_exact_zero() {
    let config = LocomotionConfig::default();
    let mut blend = 2.0;
    for _ in 0..200 {
      blend = blend_toward(blend, 0.0, DT, &config);
    }
    assert_eq!(blend, 0.0);
  }

  #[test]
  fn analog_magnitude_scales_target() {
    let intent = MoveIntent {
      axis: Vec2::new(0.0, 0.5),
      sprint: false,
      analog: true,
    };
    assert!((intent.magnitude() - 0.5).abs() < 1e-6);

    let digital = MoveIntent {
      analog: false,
      ..intent
    };
    assert_eq!(digital.magnitude(), 1.0);
  }

  #[test]
  fn target_speed_follows_sprint_modifier() {
    let config = LocomotionConfig::default();
    let mut intent = MoveIntent::default();
    assert_eq!(Locomotion::target_speed(&intent, &config), 0.0);
    intent.axis = Vec2::Y;
    assert_eq!(Locomotion::target_speed(&intent, &config), config.walk_speed);
    intent.sprint = true;
    assert_eq!(Locomotion::target_speed(&intent, &config), config.sprint_speed);
  }

  #[test]
  fn strafing_right_with_camera_east_moves_along_positive_z() {
    let config = LocomotionConfig::default();
    let intent = MoveIntent {
      axis: Vec2::new(1.0, 0.0),
      ..default()
    };

    for body_yaw in [0.0, 45.0, -135.0, 179.0] {
      let mut locomotion = Locomotion {
        speed: 2.0,
        ..default()
      };
      let step = locomotion.step(
        MovementScheme::Strafing,
        &intent,
        body_yaw,
        90.0,
        DT,
        &config,
      );
      let direction = step.displacement.normalize();
      assert!(direction.abs_diff_eq(Vec3::Z, 1e-5), "{direction} from yaw {body_yaw}");
    }
  }

  #[test]
  fn strafing_turns_body_toward_camera() {
    let config = LocomotionConfig::default();
    let mut locomotion = Locomotion::default();
    let mut body_yaw = 0.0;
    for _ in 0..300 {
      body_yaw = locomotion
        .step(
          MovementScheme::Strafing,
          &MoveIntent::default(),
          body_yaw,
          120.0,
          DT,
          &config,
        )
        .body_yaw;
    }
    assert!((normalize_angle(body_yaw) - 120.0).abs() < 0.01);
  }

  #[test]
  fn facing_forward_converges_and_moves_along_heading() {
    let config = LocomotionConfig::default();
    let intent = MoveIntent {
      axis: Vec2::new(0.0, 1.0),
      ..default()
    };
    let mut locomotion = Locomotion::default();
    let mut body_yaw = 70.0;
    let mut step = None;

    for _ in 0..300 {
      let next = locomotion.step(
        MovementScheme::FacingDirection,
        &intent,
        body_yaw,
        0.0,
        DT,
        &config,
      );
      body_yaw = next.body_yaw;
      step = Some(next);
    }

    let step = step.unwrap();
    assert_eq!(locomotion.target_yaw, 0.0);
    assert!(body_yaw.abs() < 0.01, "{body_yaw}");
    let direction = step.displacement.normalize();
    assert!(direction.abs_diff_eq(Vec3::NEG_Z, 1e-3), "{direction}");
  }

  #[test]
  fn facing_keeps_heading_without_input() {
    let config = LocomotionConfig::default();
    let mut locomotion = Locomotion {
      speed: 1.0,
      target_yaw: 30.0,
      ..default()
    };
    let step = locomotion.step(
      MovementScheme::FacingDirection,
      &MoveIntent::default(),
      30.0,
      -90.0,
      DT,
      &config,
    );
    assert_eq!(step.body_yaw, 30.0);
    assert_eq!(locomotion.target_yaw, 30.0);
  }

  #[test]
  fn facing_target_adds_camera_yaw() {
    assert!((facing_target_yaw(Vec2::new(1.0, 0.0), 0.0) - 90.0).abs() < 1e-4);
    assert!((facing_target_yaw(Vec2::new(0.0, 1.0), 45.0) - 45.0).abs() < 1e-4);
    assert!((facing_target_yaw(Vec2::new(0.0, -1.0), 0.0).abs() - 180.0).abs() < 1e-4);
  }
}
