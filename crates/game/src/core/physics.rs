//! Bridges the camera tool's per-frame motion to the rapier character
//! controller and reads ground contact back.

use bevy::prelude::*;
use bevy_camera_tool::{CameraToolSet, CharacterBody, CharacterMotion, Grounded};
use bevy_rapier3d::prelude::*;

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
      .configure_sets(PostUpdate, CameraToolSet::Follow.after(PhysicsSet::Writeback))
      .add_systems(
        Update,
        (
          sync_grounded_from_physics.before(CameraToolSet::Vertical),
          forward_motion_to_controller.in_set(CameraToolSet::Motion),
        ),
      );
  }
}

/// Ground contact as reported by last frame's controller move.
pub fn sync_grounded_from_physics(
  mut bodies: Query<
    (&mut Grounded, Option<&KinematicCharacterControllerOutput>),
    With<CharacterBody>,
  >,
) {
  for (mut grounded, output) in &mut bodies {
    let physics_grounded = output.is_some_and(|o| o.grounded);
    if grounded.0 != physics_grounded {
      trace!("Grounded -> {physics_grounded}");
      grounded.0 = physics_grounded;
    }
  }
}

pub fn forward_motion_to_controller(
  mut bodies: Query<(&CharacterMotion, &mut KinematicCharacterController), With<CharacterBody>>,
) {
  for (motion, mut controller) in &mut bodies {
    controller.translation = Some(motion.0);
  }
}
