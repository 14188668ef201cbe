//! Schedule labels for camera tool systems.
//!
//! Per-frame logic runs in [`Update`] within the chained [`CameraToolSet`]
//! phases. Camera placement runs in [`PostUpdate`] under
//! [`CameraToolSet::Follow`], after every body has moved and before
//! transforms propagate.
//!
//! ```text
//! Input → Mode → Orientation → Focus → Vertical → Locomotion → Motion
//! ```
//!
//! # Usage
//!
//! ```ignore
//! app.add_systems(Update, sync_ground_contact.before(CameraToolSet::Vertical));
//! ```

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CameraToolSet {
  /// Raw input copied into `CharacterInput`.
  Input,
  /// Toggle and capture requests. Queued commands apply before `Orientation`.
  Mode,
  /// Look input applied to the driven camera.
  Orientation,
  /// Notable projection and the focus poll.
  Focus,
  /// Jump, timers and gravity.
  Vertical,
  /// Heading, speed and frame motion.
  Locomotion,
  /// Motion application and audio cues.
  Motion,
  /// Late update: follow smoothing and virtual camera selection.
  Follow,
}
