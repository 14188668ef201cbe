//! Camera tool - third-person character with a free-look photo camera.
//!
//! The character walks under a smoothed follow camera. Toggling the camera
//! tool hands the view to a free-look camera, switches locomotion to
//! strafing, and starts tracking which notable object sits under the
//! reticle so it can be captured.
//!
//! All state machines are plain types that can be stepped without an `App`.
//! [`CameraToolPlugin`] wires them into the frame; [`CameraToolInputPlugin`]
//! adds default keyboard, mouse and gamepad bindings.

use bevy::prelude::*;
use bevy::transform::TransformSystems;

pub mod angles;
pub mod animation;
pub mod audio;
pub mod camera_mode;
pub mod focus;
pub mod follow;
pub mod input;
pub mod locomotion;
pub mod orientation;
pub mod rig;
pub mod schedule;
pub mod vertical;
pub mod virtual_camera;

pub use animation::{AnimationParam, AnimationSink, AnimatorParams};
pub use audio::{AnimationCue, CharacterAudio, CueKind, PlayClipAt};
pub use camera_mode::{
  ActivateCameraTool, CameraMode, CameraModeChanged, CameraModeState, CameraPriorities,
  DeactivateCameraTool, DeployTripod, RetractTripod, ToggleCameraTool, ToggleTripod, ToolUi,
};
pub use focus::{
  CaptureFocus, FocusChanged, FocusNotification, FocusQuery, FocusQueryService, FocusTracker,
  NearestToReticle, Notable, Snapshot, VisibleNotables,
};
pub use input::{CameraToolInputPlugin, CharacterInput, DetachInput, PlayerInput};
pub use locomotion::{Locomotion, LocomotionConfig};
pub use orientation::{Orientation, OrientationConfig, ReticleAim};
pub use rig::{
  CameraRig, CharacterBody, CharacterMotion, DirectMotion, FollowCamera, ToolCamera, Tripod,
};
pub use schedule::CameraToolSet;
pub use vertical::{Grounded, JumpConfig, VerticalMotion, VerticalState};
pub use virtual_camera::{ActiveVirtualCamera, VirtualCamera};

/// Everything a character body needs besides its transform and input.
#[derive(Bundle, Default)]
pub struct CharacterBundle {
  pub body: CharacterBody,
  pub input: CharacterInput,
  pub orientation: Orientation,
  pub reticle: ReticleAim,
  pub orientation_config: OrientationConfig,
  pub locomotion: Locomotion,
  pub locomotion_config: LocomotionConfig,
  pub vertical: VerticalMotion,
  pub jump_config: JumpConfig,
  pub grounded: Grounded,
  pub motion: CharacterMotion,
  pub animator: AnimatorParams,
}

/// Core camera tool systems. Does not add input bindings; see
/// [`CameraToolInputPlugin`].
pub struct CameraToolPlugin;

impl Plugin for CameraToolPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<CameraModeState>()
      .init_resource::<CameraPriorities>()
      .init_resource::<ToolUi>()
      .init_resource::<FocusTracker>()
      .init_resource::<FocusQueryService>()
      .init_resource::<VisibleNotables>()
      .init_resource::<ActiveVirtualCamera>()
      .add_message::<CameraModeChanged>()
      .add_message::<FocusNotification>()
      .add_message::<FocusChanged>()
      .add_message::<Snapshot>()
      .add_message::<AnimationCue>()
      .add_message::<PlayClipAt>();

    app.configure_sets(
      Update,
      (
        CameraToolSet::Input,
        CameraToolSet::Mode,
        CameraToolSet::Orientation,
        CameraToolSet::Focus,
        CameraToolSet::Vertical,
        CameraToolSet::Locomotion,
        CameraToolSet::Motion,
      )
        .chain(),
    );
    app.configure_sets(
      PostUpdate,
      CameraToolSet::Follow.before(TransformSystems::Propagate),
    );

    app.add_systems(
      Update,
      (
        (camera_mode::handle_mode_input, camera_mode::center_reticle)
          .chain()
          .in_set(CameraToolSet::Mode),
        orientation::apply_look_input.in_set(CameraToolSet::Orientation),
        (focus::project_notables, focus::poll_focus)
          .chain()
          .in_set(CameraToolSet::Focus),
        vertical::update_vertical_motion.in_set(CameraToolSet::Vertical),
        locomotion::update_locomotion.in_set(CameraToolSet::Locomotion),
        (
          locomotion::apply_direct_motion,
          audio::handle_animation_cues,
          audio::play_clip_requests,
        )
          .chain()
          .in_set(CameraToolSet::Motion),
      ),
    );

    app.add_systems(
      PostUpdate,
      (
        follow::follow_body,
        follow::mount_tool_camera,
        virtual_camera::select_active_virtual_camera,
        virtual_camera::follow_virtual_camera,
      )
        .chain()
        .in_set(CameraToolSet::Follow),
    );
  }
}
