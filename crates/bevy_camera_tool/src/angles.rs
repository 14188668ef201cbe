//! Angle helpers shared by the orientation and locomotion state machines.
//!
//! Conventions used throughout the crate:
//! - Yaw is in degrees, clockwise when seen from above. Yaw 0 faces `-Z`
//!   (Bevy forward), yaw 90 faces `+X`.
//! - Pitch is in degrees, positive looks up.

use bevy::prelude::*;

/// Wraps an angle in degrees into `[-180, 180)`.
pub fn normalize_angle(degrees: f32) -> f32 {
  let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
  // rem_euclid can round up to the divisor for tiny negative inputs
  if wrapped >= 180.0 { -180.0 } else { wrapped }
}

/// Shortest signed difference `target - current` in degrees, in `(-180, 180]`.
pub fn delta_angle(current: f32, target: f32) -> f32 {
  let delta = (target - current).rem_euclid(360.0);
  if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Normalizes then clamps a pitch angle.
pub fn clamp_pitch(pitch: f32, min: f32, max: f32) -> f32 {
  normalize_angle(pitch).clamp(min, max)
}

/// Critically damped spring toward `target`.
///
/// `velocity` is the smoothing accumulator carried between frames. The
/// result never passes `target`; when it would, it lands exactly on it and
/// the velocity is reset accordingly.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
  if dt <= 0.0 {
    return current;
  }

  let smooth_time = smooth_time.max(0.0001);
  let omega = 2.0 / smooth_time;
  let x = omega * dt;
  let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

  let change = current - target;
  let temp = (*velocity + omega * change) * dt;
  *velocity = (*velocity - omega * temp) * decay;
  let mut output = target + (change + temp) * decay;

  if (target - current > 0.0) == (output > target) {
    output = target;
    *velocity = (output - target) / dt;
  }

  output
}

/// [`smooth_damp`] for angles in degrees, taking the short way around.
pub fn smooth_damp_angle(
  current: f32,
  target: f32,
  velocity: &mut f32,
  smooth_time: f32,
  dt: f32,
) -> f32 {
  let target = current + delta_angle(current, target);
  smooth_damp(current, target, velocity, smooth_time, dt)
}

/// Rotation about world up for a yaw in degrees.
pub fn yaw_rotation(yaw: f32) -> Quat {
  Quat::from_rotation_y(-yaw.to_radians())
}

/// Rotation for a yaw/pitch pair in degrees (no roll).
pub fn look_rotation(yaw: f32, pitch: f32) -> Quat {
  yaw_rotation(yaw) * Quat::from_rotation_x(pitch.to_radians())
}

/// Yaw in degrees of the horizontal heading of `rotation`.
pub fn yaw_of(rotation: Quat) -> f32 {
  let forward = rotation * Vec3::NEG_Z;
  forward.x.atan2(-forward.z).to_degrees()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_wraps_into_half_open_range() {
    assert_eq!(normalize_angle(180.0), -180.0);
    assert_eq!(normalize_angle(-180.0), -180.0);
    assert!((normalize_angle(190.0) - -170.0).abs() < 1e-4);
    assert!((normalize_angle(-190.0) - 170.0).abs() < 1e-4);
    assert!((normalize_angle(725.0) - 5.0).abs() < 1e-4);
  }

  #[test]
  fn delta_angle_takes_short_way() {
    assert!((delta_angle(170.0, -170.0) - 20.0).abs() < 1e-4);
    assert!((delta_angle(-170.0, 170.0) - -20.0).abs() < 1e-4);
    assert!((delta_angle(0.0, 90.0) - 90.0).abs() < 1e-4);
  }

  #[test]
  fn clamp_pitch_normalizes_before_clamping() {
    // 350 is -10 after wrapping, which is inside the range
    assert!((clamp_pitch(350.0, -40.0, 70.0) - -10.0).abs() < 1e-4);
    assert_eq!(clamp_pitch(100.0, -40.0, 70.0), 70.0);
    assert_eq!(clamp_pitch(-100.0, -40.0, 70.0), -40.0);
  }

  #[test]
  fn smooth_damp_approaches_without_overshoot() {
    let mut value = 0.0;
    let mut velocity = 0.0;
    let mut previous = value;
    for _ in 0..600 {
      value = smooth_damp(value, 10.0, &mut velocity, 0.12, 1.0 / 60.0);
      assert!(value <= 10.0, "overshot: {value}");
      assert!(value >= previous, "went backwards: {value} < {previous}");
      previous = value;
    }
    assert!((value - 10.0).abs() < 1e-3);
  }

  #[test]
  fn smooth_damp_with_zero_dt_is_identity() {
    let mut velocity = 3.0;
    assert_eq!(smooth_damp(1.0, 5.0, &mut velocity, 0.1, 0.0), 1.0);
    assert_eq!(velocity, 3.0);
  }

  #[test]
  fn smooth_damp_angle_crosses_wrap_boundary() {
    let mut velocity = 0.0;
    let mut value = 170.0;
    for _ in 0..600 {
      value = smooth_damp_angle(value, -170.0, &mut velocity, 0.12, 1.0 / 60.0);
    }
    // Travels up through 180 rather than down through 0
    assert!((normalize_angle(value) - -170.0).abs() < 1e-2, "{value}");
    assert!(value > 170.0);
  }

  #[test]
  fn yaw_convention_matches_headings() {
    let east = yaw_rotation(90.0) * Vec3::NEG_Z;
    assert!(east.abs_diff_eq(Vec3::X, 1e-5), "{east}");
    let right_of_east = yaw_rotation(90.0) * Vec3::X;
    assert!(right_of_east.abs_diff_eq(Vec3::Z, 1e-5), "{right_of_east}");
    assert!((yaw_of(yaw_rotation(-45.0)) - -45.0).abs() < 1e-3);
    assert!((yaw_of(look_rotation(30.0, 20.0)) - 30.0).abs() < 1e-3);
  }

  #[test]
  fn positive_pitch_looks_up() {
    let forward = look_rotation(0.0, 30.0) * Vec3::NEG_Z;
    assert!(forward.y > 0.0);
  }
}
