//! The focus query service: which notable object is the reticle on.

use bevy::prelude::*;

/// A notable object projected into the render camera's viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedCandidate {
  pub entity: Entity,
  /// Logical viewport position, origin top-left.
  pub screen: Vec2,
  /// Distance from the camera along its view direction.
  pub depth: f32,
}

/// Every notable object currently in view, refreshed each frame the tool is
/// active. Doubles as the bulk "what is visible right now" query.
#[derive(Resource, Default, Debug, Clone)]
pub struct VisibleNotables {
  pub candidates: Vec<ProjectedCandidate>,
}

impl VisibleNotables {
  pub fn entities(&self) -> Vec<Entity> {
    self.candidates.iter().map(|c| c.entity).collect()
  }

  pub fn is_empty(&self) -> bool {
    self.candidates.is_empty()
  }
}

/// Picks the single most relevant candidate for a screen point.
pub trait FocusQuery: Send + Sync + 'static {
  fn resolve(&self, point: Vec2, visible: &[ProjectedCandidate]) -> Option<Entity>;
}

/// Pluggable focus query used by the focus poll.
#[derive(Resource)]
pub struct FocusQueryService(pub Box<dyn FocusQuery>);

impl FocusQueryService {
  pub fn new(query: impl FocusQuery) -> Self {
    Self(Box::new(query))
  }

  pub fn resolve(&self, point: Vec2, visible: &[ProjectedCandidate]) -> Option<Entity> {
    self.0.resolve(point, visible)
  }
}

impl Default for FocusQueryService {
  fn default() -> Self {
    Self::new(NearestToReticle::default())
  }
}

/// Chooses the candidate closest to the point on screen, within
/// `max_distance` logical pixels. Ties go to the nearer object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestToReticle {
  pub max_distance: f32,
}

impl Default for NearestToReticle {
  fn default() -> Self {
    Self { max_distance: 96.0 }
  }
}

impl FocusQuery for NearestToReticle {
  fn resolve(&self, point: Vec2, visible: &[ProjectedCandidate]) -> Option<Entity> {
    visible
      .iter()
      .map(|c| (c, c.screen.distance(point)))
      .filter(|(_, distance)| *distance <= self.max_distance)
      .min_by(|(a, da), (b, db)| da.total_cmp(db).then(a.depth.total_cmp(&b.depth)))
      .map(|(c, _)| c.entity)
  }
}
