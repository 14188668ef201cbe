use bevy::ecs::message::MessageWriter;
use bevy::ecs::system::Command;
use bevy::prelude::*;

use super::query::{FocusQueryService, ProjectedCandidate, VisibleNotables};
use super::{FocusChanged, FocusNotification, FocusTracker, Notable, Snapshot};
use crate::camera_mode::{CameraModeState, ToolUi};
use crate::rig::CameraRig;

/// Projects every [`Notable`] into the render camera's viewport.
///
/// Cleared while the tool is inactive. Left untouched for the frame when the
/// render camera has no usable projection yet.
pub fn project_notables(
  rig: Option<Res<CameraRig>>,
  mode: Res<CameraModeState>,
  cameras: Query<(&Camera, &GlobalTransform)>,
  notables: Query<(Entity, &GlobalTransform), With<Notable>>,
  mut visible: ResMut<VisibleNotables>,
) {
  if !mode.is_tool_active() {
    if !visible.is_empty() {
      visible.candidates.clear();
    }
    return;
  }

  let Some(rig) = rig else { return };
  let Ok((camera, camera_transform)) = cameras.get(rig.view_camera) else {
    return;
  };
  let Some(viewport) = camera.logical_viewport_size() else {
    return;
  };

  let eye = camera_transform.translation();
  let forward = camera_transform.forward();

  visible.candidates.clear();
  for (entity, transform) in &notables {
    let position = transform.translation();
    let depth = (position - eye).dot(*forward);
    if depth <= 0.0 {
      continue;
    }
    let Ok(screen) = camera.world_to_viewport(camera_transform, position) else {
      continue;
    };
    if screen.cmplt(Vec2::ZERO).any() || screen.cmpgt(viewport).any() {
      continue;
    }
    visible.candidates.push(ProjectedCandidate {
      entity,
      screen,
      depth,
    });
  }
}

/// Resolves the focus under the reticle and issues the frame's
/// notifications.
pub fn poll_focus(
  mode: Res<CameraModeState>,
  ui: Res<ToolUi>,
  service: Res<FocusQueryService>,
  visible: Res<VisibleNotables>,
  mut tracker: ResMut<FocusTracker>,
  mut notifications: MessageWriter<FocusNotification>,
  mut changed: MessageWriter<FocusChanged>,
) {
  if !mode.is_tool_active() {
    return;
  }

  let resolved = service.resolve(ui.reticle_position(), &visible.candidates);
  let previous = tracker.held();
  let step = tracker.advance(resolved);

  if previous != resolved {
    debug!("Focus {:?} -> {:?}", previous, resolved);
  }
  notifications.write_batch(step.notifications());
  changed.write(FocusChanged { focused: resolved });
}

/// Sends a capture notification to the focused object. Does nothing when
/// nothing is focused.
pub struct CaptureFocus;

impl Command for CaptureFocus {
  fn apply(self, world: &mut World) {
    let Some(subject) = world
      .get_resource::<FocusTracker>()
      .and_then(FocusTracker::capture_target)
    else {
      return;
    };

    let in_frame = world
      .get_resource::<VisibleNotables>()
      .map(VisibleNotables::entities)
      .unwrap_or_default();

    debug!("Captured {:?} with {} object(s) in frame", subject, in_frame.len());
    world.write_message(FocusNotification::Captured(subject));
    world.write_message(Snapshot { subject, in_frame });
  }
}

/// Drops the held focus, telling the object it left the view.
pub fn release_focus(world: &mut World) {
  let Some(released) = world
    .get_resource_mut::<FocusTracker>()
    .and_then(|mut tracker| tracker.release())
  else {
    return;
  };

  debug!("Focus released from {:?}", released);
  world.write_message(FocusNotification::Exited(released));
  world.write_message(FocusChanged { focused: None });
}
