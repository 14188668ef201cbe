//! Commands that apply camera mode transitions to the world.

use bevy::ecs::system::Command;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use super::{CameraModeChanged, CameraModeState, CameraPriorities, ModeEffects, ToolUi};
use crate::focus;
use crate::rig::{CameraRig, Tripod};
use crate::virtual_camera::VirtualCamera;

/// Switches to the camera tool. Safe to queue in any mode.
pub struct ActivateCameraTool;

/// Switches back to the follow camera. Safe to queue in any mode.
pub struct DeactivateCameraTool;

/// Activates or deactivates depending on the current mode.
pub struct ToggleCameraTool;

/// Marks the registered tripod as deployed. Its camera takes over the next
/// time the tool is activated.
pub struct DeployTripod;

/// Packs the registered tripod away, disabling its camera and handing the
/// view back to the follow camera.
pub struct RetractTripod;

/// Deploys the tripod if packed, packs it away if deployed.
pub struct ToggleTripod;

#[derive(Clone, Copy)]
enum Transition {
  Activate,
  Deactivate,
  Toggle,
}

impl Command for ActivateCameraTool {
  fn apply(self, world: &mut World) {
    apply_transition(world, Transition::Activate);
  }
}

impl Command for DeactivateCameraTool {
  fn apply(self, world: &mut World) {
    apply_transition(world, Transition::Deactivate);
  }
}

impl Command for ToggleCameraTool {
  fn apply(self, world: &mut World) {
    apply_transition(world, Transition::Toggle);
  }
}

impl Command for DeployTripod {
  fn apply(self, world: &mut World) {
    let Some((entity, _)) = registered_tripod(world) else {
      return;
    };
    if let Some(mut tripod) = world.get_mut::<Tripod>(entity) {
      tripod.deployed = true;
    }
    info!("Tripod deployed");
  }
}

impl Command for RetractTripod {
  fn apply(self, world: &mut World) {
    let Some((entity, tripod)) = registered_tripod(world) else {
      return;
    };
    if let Some(mut tripod) = world.get_mut::<Tripod>(entity) {
      tripod.deployed = false;
    }
    set_camera_enabled(world, tripod.camera, false);

    let priorities = priorities(world);
    if let Some(rig) = world.get_resource::<CameraRig>().copied() {
      set_priority(world, rig.follow_camera, priorities.follow);
    }
    info!("Tripod retracted");
  }
}

impl Command for ToggleTripod {
  fn apply(self, world: &mut World) {
    match registered_tripod(world) {
      Some((_, tripod)) if tripod.deployed => RetractTripod.apply(world),
      Some(_) => DeployTripod.apply(world),
      None => debug!("Tripod toggle ignored: no tripod registered"),
    }
  }
}

fn registered_tripod(world: &World) -> Option<(Entity, Tripod)> {
  let entity = world.get_resource::<CameraRig>()?.tripod?;
  world.get::<Tripod>(entity).map(|tripod| (entity, *tripod))
}

fn priorities(world: &World) -> CameraPriorities {
  world
    .get_resource::<CameraPriorities>()
    .copied()
    .unwrap_or_default()
}

fn apply_transition(world: &mut World, transition: Transition) {
  let priorities = priorities(world);
  let tripod = registered_tripod(world);
  let deployed = tripod.is_some_and(|(_, t)| t.deployed);

  let Some(mut state) = world.get_resource_mut::<CameraModeState>() else {
    warn!("Camera mode transition requested without CameraToolPlugin");
    return;
  };
  let effects = match transition {
    Transition::Activate => state.activate(&priorities, deployed),
    Transition::Deactivate => state.deactivate(&priorities),
    Transition::Toggle => state.toggle(&priorities, deployed),
  };

  apply_effects(world, effects, tripod.map(|(_, t)| t), &priorities);
}

fn apply_effects(
  world: &mut World,
  effects: ModeEffects,
  tripod: Option<Tripod>,
  priorities: &CameraPriorities,
) {
  if let Some(rig) = world.get_resource::<CameraRig>().copied() {
    if let Some(priority) = effects.follow_priority {
      set_priority(world, rig.follow_camera, priority);
    }
    if let Some(priority) = effects.tool_priority {
      set_priority(world, rig.tool_camera, priority);
    }
  }

  if let (Some(enabled), Some(tripod)) = (effects.tripod_camera, tripod) {
    if enabled {
      set_priority(world, tripod.camera, priorities.tripod);
    }
    set_camera_enabled(world, tripod.camera, enabled);
  }

  if let Some(mut ui) = world.get_resource_mut::<ToolUi>() {
    ui.shown = effects.show_ui;
  }

  let mut windows = world.query_filtered::<&mut CursorOptions, With<PrimaryWindow>>();
  if let Ok(mut cursor) = windows.single_mut(world) {
    cursor.grab_mode = if effects.lock_cursor {
      CursorGrabMode::Locked
    } else {
      CursorGrabMode::None
    };
    cursor.visible = !effects.lock_cursor;
  }

  if effects.release_focus {
    focus::release_focus(world);
  }

  world.write_message(CameraModeChanged { mode: effects.mode });
  info!("Camera mode: {:?}", effects.mode);
}

fn set_priority(world: &mut World, entity: Entity, priority: i32) {
  if let Some(mut camera) = world.get_mut::<VirtualCamera>(entity) {
    camera.priority = priority;
  }
}

fn set_camera_enabled(world: &mut World, entity: Entity, enabled: bool) {
  if let Some(mut camera) = world.get_mut::<VirtualCamera>(entity) {
    camera.enabled = enabled;
  }
}
