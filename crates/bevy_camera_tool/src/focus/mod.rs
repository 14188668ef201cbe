//! Focus tracking for the camera tool.
//!
//! While the tool is active the focus query resolves the notable object under
//! the reticle once per frame. [`FocusTracker`] is the one place that decides
//! which notifications go out, so an object always hears that it left the
//! view before its successor hears that it is on target.
//!
//! Notifications for objects go through a single [`FocusNotification`]
//! message queue to keep their relative order. [`FocusChanged`] is written
//! after them for listeners that only care about the current focus.

mod query;
mod systems;

use bevy::prelude::*;
pub use query::{FocusQuery, FocusQueryService, NearestToReticle, ProjectedCandidate, VisibleNotables};
pub use systems::{CaptureFocus, poll_focus, project_notables, release_focus};

/// Marker for objects the camera tool can focus and capture.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct Notable;

/// Per-object notifications, in the order they were issued.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusNotification {
  /// The object is no longer the focus.
  Exited(Entity),
  /// The object is under the reticle this frame.
  OnTarget(Entity),
  /// The object was captured.
  Captured(Entity),
}

/// The current focus, published every frame the tool is active.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChanged {
  pub focused: Option<Entity>,
}

/// Capture book-keeping: the focused subject plus everything else in frame.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
  pub subject: Entity,
  pub in_frame: Vec<Entity>,
}

/// Outcome of one focus poll.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FocusStep {
  /// Previous holder that must be told it left the view.
  pub exited: Option<Entity>,
  /// Current holder to re-affirm this frame.
  pub on_target: Option<Entity>,
}

impl FocusStep {
  /// Notifications in issue order.
  pub fn notifications(&self) -> impl Iterator<Item = FocusNotification> {
    self
      .exited
      .map(FocusNotification::Exited)
      .into_iter()
      .chain(self.on_target.map(FocusNotification::OnTarget))
  }
}

/// Holds at most one focused object.
#[derive(Resource, Default, Debug)]
pub struct FocusTracker {
  held: Option<Entity>,
}

impl FocusTracker {
  pub fn held(&self) -> Option<Entity> {
    self.held
  }

  /// Adopts this frame's query result.
  pub fn advance(&mut self, resolved: Option<Entity>) -> FocusStep {
    let exited = if resolved != self.held {
      std::mem::replace(&mut self.held, resolved)
    } else {
      None
    };
    FocusStep {
      exited,
      on_target: resolved,
    }
  }

  /// Drops the held object, returning it so it can be notified.
  pub fn release(&mut self) -> Option<Entity> {
    self.held.take()
  }

  /// The object a capture request applies to, if any.
  pub fn capture_target(&self) -> Option<Entity> {
    self.held
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entities() -> (Entity, Entity) {
    let mut world = World::new();
    (world.spawn_empty().id(), world.spawn_empty().id())
  }

  #[test]
  fn switching_focus_exits_before_entering() {
    let (a, b) = entities();
    let mut tracker = FocusTracker::default();

    let first = tracker.advance(Some(a));
    assert_eq!(
      first.notifications().collect::<Vec<_>>(),
      vec![FocusNotification::OnTarget(a)]
    );

    let second = tracker.advance(Some(b));
    assert_eq!(
      second.notifications().collect::<Vec<_>>(),
      vec![FocusNotification::Exited(a), FocusNotification::OnTarget(b)]
    );
    assert_eq!(tracker.held(), Some(b));
  }

  #[test]
  fn same_focus_is_reaffirmed_every_frame() {
    let (a, _) = entities();
    let mut tracker = FocusTracker::default();
    tracker.advance(Some(a));

    for _ in 0..3 {
      let step = tracker.advance(Some(a));
      assert_eq!(step.exited, None);
      assert_eq!(step.on_target, Some(a));
    }
  }

  #[test]
  fn losing_focus_exits_without_entering() {
    let (a, _) = entities();
    let mut tracker = FocusTracker::default();
    tracker.advance(Some(a));

    let step = tracker.advance(None);
    assert_eq!(
      step.notifications().collect::<Vec<_>>(),
      vec![FocusNotification::Exited(a)]
    );
    assert_eq!(tracker.held(), None);

    let idle = tracker.advance(None);
    assert_eq!(idle.notifications().count(), 0);
  }

  #[test]
  fn release_hands_back_holder_once() {
    let (a, _) = entities();
    let mut tracker = FocusTracker::default();
    tracker.advance(Some(a));

    assert_eq!(tracker.release(), Some(a));
    assert_eq!(tracker.release(), None);
    assert_eq!(tracker.capture_target(), None);
  }
}
