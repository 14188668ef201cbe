use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy_camera_tool::{FocusNotification, Notable, Snapshot};
use bevy_rapier3d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::WorldConfig;

/// Idle and focused looks shared by every notable prop.
#[derive(Resource, Clone)]
pub struct NotableMaterials {
  pub idle: Handle<StandardMaterial>,
  pub focused: Handle<StandardMaterial>,
}

/// Where one notable prop goes and what it looks like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotablePlacement {
  pub position: Vec3,
  pub height: f32,
  pub round: bool,
}

/// Jittered ring around the spawn point, reproducible from the seed.
pub fn notable_layout(world: &WorldConfig) -> Vec<NotablePlacement> {
  let mut rng = StdRng::seed_from_u64(world.seed);
  let count = world.notable_count.max(1);
  (0..world.notable_count)
    .map(|i| {
      let angle = (i as f32 / count as f32) * TAU + rng.random_range(-0.3..0.3);
      let radius = world.notable_ring_radius * rng.random_range(0.8..1.2);
      let height = rng.random_range(0.5..2.0);
      NotablePlacement {
        position: Vec3::new(angle.sin() * radius, height / 2.0, -angle.cos() * radius),
        height,
        round: rng.random_bool(0.5),
      }
    })
    .collect()
}

pub fn spawn_notables(
  commands: &mut Commands,
  world: &WorldConfig,
  meshes: &mut Assets<Mesh>,
  materials: &mut Assets<StandardMaterial>,
) {
  let look = NotableMaterials {
    idle: materials.add(Color::srgb_u8(124, 144, 255)),
    focused: materials.add(StandardMaterial {
      base_color: Color::srgb_u8(255, 210, 90),
      emissive: LinearRgba::rgb(1.5, 1.0, 0.2),
      ..default()
    }),
  };

  for (i, placement) in notable_layout(world).into_iter().enumerate() {
    let height = placement.height;
    let (mesh, collider) = if placement.round {
      let radius = height / 2.0;
      (meshes.add(Sphere::new(radius)), Collider::ball(radius))
    } else {
      (
        meshes.add(Cuboid::new(1.0, height, 1.0)),
        Collider::cuboid(0.5, height / 2.0, 0.5),
      )
    };

    commands.spawn((
      Notable,
      Name::new(format!("Notable {i}")),
      Mesh3d(mesh),
      MeshMaterial3d(look.idle.clone()),
      Transform::from_translation(placement.position),
      RigidBody::Fixed,
      collider,
    ));
  }

  info!("Spawned {} notables", world.notable_count);
  commands.insert_resource(look);
}

pub fn highlight_focus(
  mut notifications: MessageReader<FocusNotification>,
  look: Option<Res<NotableMaterials>>,
  mut notables: Query<&mut MeshMaterial3d<StandardMaterial>, With<Notable>>,
) {
  let Some(look) = look else { return };
  for notification in notifications.read() {
    let (entity, handle) = match *notification {
      FocusNotification::OnTarget(entity) => (entity, &look.focused),
      FocusNotification::Exited(entity) => (entity, &look.idle),
      FocusNotification::Captured(_) => continue,
    };
    if let Ok(mut material) = notables.get_mut(entity) {
      if material.0 != *handle {
        material.0 = handle.clone();
      }
    }
  }
}

pub fn log_captures(
  mut notifications: MessageReader<FocusNotification>,
  mut snapshots: MessageReader<Snapshot>,
  names: Query<&Name>,
) {
  let name_of = |entity: Entity| {
    names
      .get(entity)
      .map(|name| name.as_str().to_owned())
      .unwrap_or_else(|_| format!("{entity:?}"))
  };

  for notification in notifications.read() {
    if let FocusNotification::Captured(entity) = notification {
      info!("Captured {}", name_of(*entity));
    }
  }
  for snapshot in snapshots.read() {
    debug!(
      "Snapshot of {} with {} other notable(s) in frame",
      name_of(snapshot.subject),
      snapshot.in_frame.len()
    );
  }
}
