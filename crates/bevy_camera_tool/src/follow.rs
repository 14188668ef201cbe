//! Late-update camera placement, run after all body movement for the frame.

use bevy::prelude::*;

use crate::rig::{CameraRig, CharacterBody, FollowCamera, ToolCamera};

/// Blend factor for exponential smoothing, independent of frame rate.
pub fn follow_blend(smoothness: f32, dt: f32) -> f32 {
  1.0 - (-smoothness * dt).exp()
}

/// Trails the follow camera's pivot behind the body and backs the camera
/// off along its current view direction.
pub fn follow_body(
  rig: Option<Res<CameraRig>>,
  time: Res<Time>,
  bodies: Query<&Transform, With<CharacterBody>>,
  mut cameras: Query<(&mut FollowCamera, &mut Transform), Without<CharacterBody>>,
) {
  let Some(rig) = rig else { return };
  let Ok(body) = bodies.get(rig.body) else {
    return;
  };
  let Ok((mut follow, mut transform)) = cameras.get_mut(rig.follow_camera) else {
    return;
  };

  let target = body.translation + follow.pivot_offset;
  let pivot = match follow.pivot {
    Some(pivot) => pivot.lerp(target, follow_blend(follow.smoothness, time.delta_secs())),
    None => target,
  };
  follow.pivot = Some(pivot);
  transform.translation = pivot + transform.rotation * Vec3::Z * follow.distance;
}

/// Keeps the tool camera at its mount point on the body.
pub fn mount_tool_camera(
  rig: Option<Res<CameraRig>>,
  bodies: Query<&Transform, With<CharacterBody>>,
  mut cameras: Query<(&ToolCamera, &mut Transform), Without<CharacterBody>>,
) {
  let Some(rig) = rig else { return };
  let Ok(body) = bodies.get(rig.body) else {
    return;
  };
  let Ok((tool, mut transform)) = cameras.get_mut(rig.tool_camera) else {
    return;
  };
  transform.translation = body.translation + body.rotation * tool.mount_offset;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blend_is_frame_rate_independent() {
    let smoothness = 8.0;
    let once = follow_blend(smoothness, 0.1);
    let half = follow_blend(smoothness, 0.05);
    let twice = 1.0 - (1.0 - half) * (1.0 - half);
    assert!((once - twice).abs() < 1e-5);
  }

  #[test]
  fn blend_stays_in_unit_range() {
    assert_eq!(follow_blend(8.0, 0.0), 0.0);
    assert!(follow_blend(8.0, 10.0) <= 1.0);
  }
}
