//! Camera mode state machine: third-person follow camera vs. the free-look
//! camera tool.
//!
//! [`CameraModeState`] is a plain state machine that turns activate /
//! deactivate / toggle requests into [`ModeEffects`]. The commands in
//! [`commands`] apply those effects to the world: virtual camera priorities,
//! the tripod camera, the tool UI, pointer capture, and focus release.
//!
//! # Usage
//!
//! ```ignore
//! fn enter_photo_mode(mut commands: Commands) {
//!     commands.queue(ActivateCameraTool);
//! }
//! ```

pub mod commands;
mod systems;

use bevy::prelude::*;
use serde::Deserialize;
pub use commands::{
  ActivateCameraTool, DeactivateCameraTool, DeployTripod, RetractTripod, ToggleCameraTool,
  ToggleTripod,
};
pub use systems::{center_reticle, handle_mode_input};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
  #[default]
  ThirdPerson,
  ToolActive,
}

/// Render priorities handed to the virtual cameras on each transition.
#[derive(Resource, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct CameraPriorities {
  /// Follow camera in normal play.
  pub follow: i32,
  /// Follow camera while a tripod camera has taken over.
  pub follow_dropped: i32,
  /// Tool camera while the tool is not in use.
  pub tool_idle: i32,
  /// Tool camera while the tool is in use. Must exceed `follow`.
  pub tool_active: i32,
  /// Tripod camera while enabled.
  pub tripod: i32,
}

impl Default for CameraPriorities {
  fn default() -> Self {
    Self {
      follow: 10,
      follow_dropped: 0,
      tool_idle: -10,
      tool_active: 20,
      tripod: 15,
    }
  }
}

/// What a transition asks the world to do. `None` means "leave as is".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeEffects {
  pub mode: CameraMode,
  pub follow_priority: Option<i32>,
  pub tool_priority: Option<i32>,
  /// `Some(true)` enables the tripod camera, `Some(false)` disables it.
  pub tripod_camera: Option<bool>,
  pub show_ui: bool,
  pub lock_cursor: bool,
  /// Drop the focused object, notifying it that it left the view.
  pub release_focus: bool,
}

/// Which camera drives the view. Exactly one mode is active at a time.
#[derive(Resource, Default, Debug)]
pub struct CameraModeState {
  mode: CameraMode,
  /// Whether the current tool session started on a deployed tripod. Decided
  /// at activation so deactivation undoes exactly what activation did.
  tripod_session: bool,
}

impl CameraModeState {
  pub fn mode(&self) -> CameraMode {
    self.mode
  }

  pub fn is_tool_active(&self) -> bool {
    self.mode == CameraMode::ToolActive
  }

  /// Switches to the tool camera. Safe to call when already active; the
  /// effects are absolute so re-applying them changes nothing.
  pub fn activate(&mut self, priorities: &CameraPriorities, tripod_deployed: bool) -> ModeEffects {
    if self.mode != CameraMode::ToolActive {
      self.tripod_session = tripod_deployed;
    }
    self.mode = CameraMode::ToolActive;
    let (follow_priority, tool_priority, tripod_camera) = if self.tripod_session {
      (Some(priorities.follow_dropped), None, Some(true))
    } else {
      (None, Some(priorities.tool_active), None)
    };
    ModeEffects {
      mode: self.mode,
      follow_priority,
      tool_priority,
      tripod_camera,
      show_ui: true,
      lock_cursor: true,
      release_focus: false,
    }
  }

  /// Returns to the follow camera. Safe to call when already inactive.
  pub fn deactivate(&mut self, priorities: &CameraPriorities) -> ModeEffects {
    self.mode = CameraMode::ThirdPerson;
    let tripod_session = std::mem::take(&mut self.tripod_session);
    let (follow_priority, tool_priority, tripod_camera) = if tripod_session {
      (None, None, Some(false))
    } else {
      (Some(priorities.follow), Some(priorities.tool_idle), None)
    };
    ModeEffects {
      mode: self.mode,
      follow_priority,
      tool_priority,
      tripod_camera,
      show_ui: false,
      lock_cursor: false,
      release_focus: true,
    }
  }

  pub fn toggle(&mut self, priorities: &CameraPriorities, tripod_deployed: bool) -> ModeEffects {
    match self.mode {
      CameraMode::ThirdPerson => self.activate(priorities, tripod_deployed),
      CameraMode::ToolActive => self.deactivate(priorities),
    }
  }
}

/// Tool UI sink: visibility plus the reticle's viewport position.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct ToolUi {
  pub shown: bool,
  pub reticle: Vec2,
}

impl ToolUi {
  pub fn reticle_position(&self) -> Vec2 {
    self.reticle
  }
}

/// Written whenever a mode transition is applied.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraModeChanged {
  pub mode: CameraMode,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toggle_twice_restores_follow_priority() {
    let priorities = CameraPriorities::default();
    let mut state = CameraModeState::default();

    let on = state.toggle(&priorities, false);
    assert_eq!(on.mode, CameraMode::ToolActive);
    assert_eq!(on.tool_priority, Some(priorities.tool_active));
    assert!(on.tool_priority > Some(priorities.follow));
    assert!(on.show_ui && on.lock_cursor);

    let off = state.toggle(&priorities, false);
    assert_eq!(off.mode, CameraMode::ThirdPerson);
    assert_eq!(off.follow_priority, Some(priorities.follow));
    assert_eq!(off.tool_priority, Some(priorities.tool_idle));
    assert!(off.release_focus);
    assert!(!off.show_ui);
    assert_eq!(state.mode(), CameraMode::ThirdPerson);
  }

  #[test]
  fn tripod_drops_follow_without_raising_tool() {
    let priorities = CameraPriorities::default();
    let mut state = CameraModeState::default();

    let on = state.activate(&priorities, true);
    assert_eq!(on.follow_priority, Some(priorities.follow_dropped));
    assert_eq!(on.tool_priority, None);
    assert_eq!(on.tripod_camera, Some(true));

    let off = state.deactivate(&priorities);
    assert_eq!(off.follow_priority, None);
    assert_eq!(off.tool_priority, None);
    assert_eq!(off.tripod_camera, Some(false));
  }

  #[test]
  fn direct_calls_are_idempotent() {
    let priorities = CameraPriorities::default();
    let mut state = CameraModeState::default();

    let first = state.activate(&priorities, false);
    let second = state.activate(&priorities, false);
    assert_eq!(first, second);
    assert!(state.is_tool_active());

    let first = state.deactivate(&priorities);
    let second = state.deactivate(&priorities);
    assert_eq!(first, second);
    assert!(!state.is_tool_active());
  }

  #[test]
  fn deactivate_undoes_the_session_activation_started() {
    let priorities = CameraPriorities::default();
    let mut state = CameraModeState::default();

    // Plain session; a tripod deployed mid-session does not change the exit
    state.activate(&priorities, false);
    let again = state.activate(&priorities, true);
    assert_eq!(again.tool_priority, Some(priorities.tool_active));
    let off = state.deactivate(&priorities);
    assert_eq!(off.follow_priority, Some(priorities.follow));
    assert_eq!(off.tool_priority, Some(priorities.tool_idle));
    assert_eq!(off.tripod_camera, None);
  }
}
