//! Components for the virtual camera system.

use bevy::prelude::*;

/// A camera candidate. The enabled one with the highest priority drives the
/// render camera.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VirtualCamera {
  pub priority: i32,
  /// Disabled cameras are never selected regardless of priority.
  pub enabled: bool,
}

impl VirtualCamera {
  pub fn new(priority: i32) -> Self {
    Self {
      priority,
      enabled: true,
    }
  }

  pub fn disabled(priority: i32) -> Self {
    Self {
      priority,
      enabled: false,
    }
  }
}
