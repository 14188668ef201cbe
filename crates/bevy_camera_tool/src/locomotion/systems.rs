use bevy::prelude::*;

use super::{Locomotion, LocomotionConfig, MoveIntent, MovementScheme};
use crate::angles::{yaw_of, yaw_rotation};
use crate::animation::{AnimationParam, AnimationSink, AnimatorParams};
use crate::camera_mode::CameraModeState;
use crate::input::CharacterInput;
use crate::rig::{CameraRig, CharacterBody, CharacterMotion, DirectMotion};
use crate::vertical::VerticalMotion;

/// Steers every character body and composes its frame motion.
///
/// Headings are relative to the render camera. Skipped for the frame when the
/// rig or its render camera is missing.
pub fn update_locomotion(
  time: Res<Time>,
  rig: Option<Res<CameraRig>>,
  mode: Res<CameraModeState>,
  cameras: Query<&Transform, Without<CharacterBody>>,
  mut bodies: Query<
    (
      &CharacterInput,
      &LocomotionConfig,
      &VerticalMotion,
      &mut Locomotion,
      &mut Transform,
      &mut CharacterMotion,
      Option<&mut AnimatorParams>,
    ),
    With<CharacterBody>,
  >,
) {
  let Some(rig) = rig else { return };
  let Ok(camera) = cameras.get(rig.view_camera) else {
    return;
  };
  let camera_yaw = yaw_of(camera.rotation);
  let scheme = MovementScheme::from(mode.mode());
  let dt = time.delta_secs();

  for (input, config, vertical, mut locomotion, mut transform, mut motion, animator) in &mut bodies
  {
    let intent = MoveIntent {
      axis: input.move_axis,
      sprint: input.sprint,
      analog: input.analog_movement,
    };
    let step = locomotion.step(
      scheme,
      &intent,
      yaw_of(transform.rotation),
      camera_yaw,
      dt,
      config,
    );

    transform.rotation = yaw_rotation(step.body_yaw);
    motion.0 = step.displacement + Vec3::Y * (vertical.vertical_velocity * dt);

    if let Some(mut animator) = animator {
      animator.set_float(AnimationParam::Speed, locomotion.animation_blend);
      animator.set_float(AnimationParam::MotionSpeed, step.motion_speed);
    }
  }
}

/// Moves bodies without a physics controller straight by their frame motion.
pub fn apply_direct_motion(
  mut bodies: Query<(&CharacterMotion, &mut Transform), (With<CharacterBody>, With<DirectMotion>)>,
) {
  for (motion, mut transform) in &mut bodies {
    transform.translation += motion.0;
  }
}

