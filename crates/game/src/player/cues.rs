//! Footstep and landing cues derived from how far the body actually moved.

use bevy::prelude::*;
use bevy_camera_tool::{AnimationCue, CharacterMotion, CueKind, VerticalMotion, VerticalState};
use bevy_rapier3d::prelude::KinematicCharacterControllerOutput;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct StrideTracker {
  pub stride_length: f32,
  travelled: f32,
  was_grounded: bool,
}

impl StrideTracker {
  pub fn new(stride_length: f32) -> Self {
    Self {
      stride_length,
      travelled: 0.0,
      was_grounded: true,
    }
  }

  /// Accumulates ground distance and reports the cue due this frame, if any.
  /// Landing takes precedence over a footstep on the same frame.
  pub fn advance(&mut self, distance: f32, grounded: bool) -> Option<CueKind> {
    let previous_grounded = std::mem::replace(&mut self.was_grounded, grounded);
    if !grounded {
      return None;
    }
    if !previous_grounded {
      self.travelled = 0.0;
      return Some(CueKind::Land);
    }

    self.travelled += distance;
    if self.stride_length > 0.0 && self.travelled >= self.stride_length {
      self.travelled -= self.stride_length;
      return Some(CueKind::Footstep);
    }
    None
  }
}

/// Horizontal distance the controller really moved the body last step.
/// Bodies without a controller output fall back to the requested motion.
pub fn ground_distance(
  output: Option<&KinematicCharacterControllerOutput>,
  motion: &CharacterMotion,
) -> f32 {
  let moved = output.map_or(motion.0, |o| o.effective_translation);
  Vec2::new(moved.x, moved.z).length()
}

pub fn emit_animation_cues(
  mut bodies: Query<(
    Entity,
    &mut StrideTracker,
    &CharacterMotion,
    &VerticalMotion,
    Option<&KinematicCharacterControllerOutput>,
  )>,
  mut cues: MessageWriter<AnimationCue>,
) {
  for (entity, mut tracker, motion, vertical, output) in &mut bodies {
    let distance = ground_distance(output, motion);
    let grounded = vertical.state == VerticalState::Grounded;
    if let Some(kind) = tracker.advance(distance, grounded) {
      cues.write(AnimationCue { entity, kind });
    }
  }
}
