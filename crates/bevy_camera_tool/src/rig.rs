//! Explicit registration of the entities the camera tool drives.

use bevy::prelude::*;

/// Entities making up one character's camera setup.
///
/// Inserted by whoever spawns the scene. Systems look entities up through
/// this resource and skip their step for the frame when it (or the entity
/// they need) is missing.
#[derive(Resource, Clone, Copy, Debug)]
pub struct CameraRig {
  /// The character body (locomotion, orientation and input live here).
  pub body: Entity,
  /// Third-person follow virtual camera.
  pub follow_camera: Entity,
  /// Free-look tool virtual camera.
  pub tool_camera: Entity,
  /// The real render camera that copies the active virtual camera.
  pub view_camera: Entity,
  /// Optional deployable tripod (entity carrying a [`Tripod`]).
  pub tripod: Option<Entity>,
}

/// Marker for character bodies driven by this crate.
#[derive(Component, Default)]
pub struct CharacterBody;

/// Displacement requested for the current frame, horizontal plus vertical.
///
/// Consumed by the physics character controller, or by
/// [`apply_direct_motion`](crate::locomotion::apply_direct_motion) for
/// bodies tagged [`DirectMotion`].
#[derive(Component, Default, Debug, Clone, Copy, PartialEq)]
pub struct CharacterMotion(pub Vec3);

/// Body moved by writing its transform directly.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct DirectMotion;

/// Third-person follow camera state, advanced in the late update phase.
#[derive(Component, Clone, Debug)]
pub struct FollowCamera {
  /// Offset from the body origin to the point the camera orbits.
  pub pivot_offset: Vec3,
  /// Distance behind the pivot.
  pub distance: f32,
  /// Higher is snappier.
  pub smoothness: f32,
  /// Smoothed pivot position. `None` until the first follow step.
  pub pivot: Option<Vec3>,
}

impl Default for FollowCamera {
  fn default() -> Self {
    Self {
      pivot_offset: Vec3::new(0.0, 1.4, 0.0),
      distance: 4.0,
      smoothness: 8.0,
      pivot: None,
    }
  }
}

/// Tool camera mounted on the body at eye height.
#[derive(Component, Clone, Debug)]
pub struct ToolCamera {
  /// Mount point in body space.
  pub mount_offset: Vec3,
}

impl Default for ToolCamera {
  fn default() -> Self {
    Self {
      mount_offset: Vec3::new(0.0, 1.5, -0.2),
    }
  }
}

/// Deployable tripod with its own virtual camera.
#[derive(Component, Clone, Copy, Debug)]
pub struct Tripod {
  pub deployed: bool,
  /// Virtual camera entity owned by the tripod.
  pub camera: Entity,
}
