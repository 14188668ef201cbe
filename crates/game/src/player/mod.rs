pub mod cues;
mod spawn;


use bevy::prelude::*;
use bevy_camera_tool::{CameraToolSet, audio};

pub use cues::StrideTracker;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(
        Startup,
        spawn::spawn_player
          .after(crate::core::camera::setup_camera)
          .after(crate::world::spawn_world),
      )
      .add_systems(
        Update,
        cues::emit_animation_cues
          .in_set(CameraToolSet::Motion)
          .before(audio::handle_animation_cues),
      );
  }
}
