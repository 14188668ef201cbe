use bevy::prelude::*;

use super::{CameraModeState, ToggleCameraTool, ToggleTripod, ToolUi};
use crate::focus::CaptureFocus;
use crate::input::CharacterInput;
use crate::rig::CameraRig;

/// Consumes the toggle and capture edges from the body's input.
///
/// Capture only goes through while the tool UI is shown. The tripod can only
/// be deployed or packed away from the follow camera.
pub fn handle_mode_input(
  mut commands: Commands,
  rig: Option<Res<CameraRig>>,
  mode: Res<CameraModeState>,
  ui: Res<ToolUi>,
  mut inputs: Query<&mut CharacterInput>,
) {
  let Some(rig) = rig else { return };
  let Ok(mut input) = inputs.get_mut(rig.body) else {
    return;
  };

  if std::mem::take(&mut input.toggle_tool) {
    commands.queue(ToggleCameraTool);
  }

  if std::mem::take(&mut input.toggle_tripod) && !mode.is_tool_active() {
    commands.queue(ToggleTripod);
  }

  if std::mem::take(&mut input.capture) && ui.shown {
    commands.queue(CaptureFocus);
  }
}

/// Keeps the reticle at the centre of the render camera's viewport.
pub fn center_reticle(
  rig: Option<Res<CameraRig>>,
  mut ui: ResMut<ToolUi>,
  cameras: Query<&Camera>,
) {
  let Some(rig) = rig else { return };
  let Some(size) = cameras
    .get(rig.view_camera)
    .ok()
    .and_then(|camera| camera.logical_viewport_size())
  else {
    return;
  };

  let center = size * 0.5;
  if ui.reticle != center {
    ui.reticle = center;
  }
}
