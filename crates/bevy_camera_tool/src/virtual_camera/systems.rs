//! Systems for virtual camera selection and following.

use bevy::prelude::*;

use super::components::VirtualCamera;
use super::resources::ActiveVirtualCamera;
use crate::rig::CameraRig;

/// System: Selects the active virtual camera based on priority.
///
/// Selection rules:
/// 1. Disabled cameras are skipped
/// 2. Highest priority wins
/// 3. On tie: prefer currently active (hysteresis)
/// 4. On tie with no current: lowest Entity (deterministic)
pub fn select_active_virtual_camera(
  mut active: ResMut<ActiveVirtualCamera>,
  cameras: Query<(Entity, &VirtualCamera)>,
) {
  let current_active = active.entity;

  let best = cameras
    .iter()
    .filter(|(_, vc)| vc.enabled)
    .max_by_key(|(entity, vc)| {
      let is_active = current_active == Some(*entity);
      // Invert entity bits so lower Entity compares higher
      let inverse_entity = !entity.to_bits();
      (vc.priority, is_active, inverse_entity)
    });

  let selected = best.map(|(e, _)| e);
  if selected != active.entity {
    debug!("Active virtual camera: {:?} -> {:?}", active.entity, selected);
    active.entity = selected;
  }
}

/// System: Copies the active virtual camera's pose to the render camera.
///
/// Runs in the late update phase after every body and camera write.
pub fn follow_virtual_camera(
  rig: Option<Res<CameraRig>>,
  active: Res<ActiveVirtualCamera>,
  mut transforms: Query<&mut Transform>,
) {
  let Some(rig) = rig else { return };
  let Some(active_entity) = active.entity else {
    return;
  };
  let Ok(vc_transform) = transforms.get(active_entity).copied() else {
    return;
  };
  let Ok(mut camera_transform) = transforms.get_mut(rig.view_camera) else {
    return;
  };

  camera_transform.translation = vc_transform.translation;
  camera_transform.rotation = vc_transform.rotation;
}
