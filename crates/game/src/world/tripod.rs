use bevy::prelude::*;
use bevy_camera_tool::{CameraRig, CharacterBody, Tripod, VirtualCamera};

/// Stand-off from the body when the tripod is set down.
const PLACEMENT_DISTANCE: f32 = 1.5;
const CAMERA_HEIGHT: f32 = 1.6;

/// Spawns the packed tripod together with its disabled camera.
pub fn spawn_tripod(
  commands: &mut Commands,
  priority: i32,
  meshes: &mut Assets<Mesh>,
  materials: &mut Assets<StandardMaterial>,
) -> Entity {
  let camera = commands
    .spawn((
      Name::new("Tripod Camera"),
      VirtualCamera::disabled(priority),
      Transform::default(),
    ))
    .id();

  commands
    .spawn((
      Name::new("Tripod"),
      Tripod {
        deployed: false,
        camera,
      },
      Mesh3d(meshes.add(Cylinder::new(0.08, CAMERA_HEIGHT))),
      MeshMaterial3d(materials.add(Color::srgb_u8(60, 60, 60))),
      Transform::from_xyz(0.0, CAMERA_HEIGHT / 2.0, 0.0),
      Visibility::Hidden,
    ))
    .id()
}

/// Sets a freshly deployed tripod down in front of the body, its camera
/// looking back at it. Hides the tripod again once packed.
pub fn place_deployed_tripod(
  rig: Option<Res<CameraRig>>,
  bodies: Query<&Transform, With<CharacterBody>>,
  mut tripods: Query<
    (&Tripod, &mut Transform, &mut Visibility),
    (Changed<Tripod>, Without<CharacterBody>),
  >,
  mut cameras: Query<
    &mut Transform,
    (With<VirtualCamera>, Without<Tripod>, Without<CharacterBody>),
  >,
) {
  let Some(rig) = rig else { return };
  let Some(entity) = rig.tripod else { return };
  let Ok((tripod, mut transform, mut visibility)) = tripods.get_mut(entity) else {
    return;
  };

  if !tripod.deployed {
    *visibility = Visibility::Hidden;
    return;
  }
  let Ok(body) = bodies.get(rig.body) else {
    return;
  };

  let forward = body.rotation * Vec3::NEG_Z;
  let ground = body.translation.with_y(0.0);
  let base = ground + forward * PLACEMENT_DISTANCE;
  transform.translation = base + Vec3::Y * (CAMERA_HEIGHT / 2.0);
  *visibility = Visibility::Inherited;

  if let Ok(mut camera) = cameras.get_mut(tripod.camera) {
    let eye = base + Vec3::Y * CAMERA_HEIGHT;
    *camera = Transform::from_translation(eye).looking_at(body.translation + Vec3::Y, Vec3::Y);
  }
  debug!("Tripod placed at {base:?}");
}
