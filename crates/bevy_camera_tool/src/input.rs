//! Input for the character and the camera tool.
//!
//! The state machines only read [`CharacterInput`]. [`CameraToolInputPlugin`]
//! fills it from `bevy_enhanced_input` actions; tests and scripted drivers
//! can write it directly instead.

use bevy::ecs::system::EntityCommand;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use crate::CameraToolSet;

/// Per-frame input snapshot for one character.
///
/// `jump`, `toggle_tool`, `toggle_tripod` and `capture` are latched on the press edge and
/// stay set until the system that handles them clears them.
#[derive(Component, Default, Debug, Clone)]
pub struct CharacterInput {
  pub move_axis: Vec2,
  pub look: Vec2,
  pub sprint: bool,
  pub jump: bool,
  /// Scale motion speed by stick magnitude instead of a flat 1.0.
  pub analog_movement: bool,
  pub toggle_tool: bool,
  pub toggle_tripod: bool,
  pub capture: bool,
  previous: HeldButtons,
}

/// Raw held state of the edge-triggered buttons for one frame.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldButtons {
  pub jump: bool,
  pub toggle_tool: bool,
  pub toggle_tripod: bool,
  pub capture: bool,
}

impl CharacterInput {
  /// Latches press edges from this frame's held buttons.
  pub fn record_buttons(&mut self, held: HeldButtons) {
    if held.jump && !self.previous.jump {
      self.jump = true;
    }
    if held.toggle_tool && !self.previous.toggle_tool {
      self.toggle_tool = true;
    }
    if held.toggle_tripod && !self.previous.toggle_tripod {
      self.toggle_tripod = true;
    }
    if held.capture && !self.previous.capture {
      self.capture = true;
    }
    self.previous = held;
  }
}

#[derive(Component)]
pub struct PlayerInput;

#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct Move;

#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct Look;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Sprint;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Jump;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct CameraToolToggle;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct TripodToggle;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Capture;

/// Default bindings, spawned as action entities related to the body.
pub fn player_input_actions() -> impl Bundle {
  actions!(PlayerInput[
      (
          Action::<Move>::new(),
          Bindings::spawn((Cardinal::wasd_keys(), Axial::left_stick())),
      ),
      (
          Action::<Look>::new(),
          Bindings::spawn((Spawn(Binding::mouse_motion()), Axial::right_stick())),
      ),
      (
          Action::<Sprint>::new(),
          bindings![KeyCode::ShiftLeft, GamepadButton::LeftThumb],
      ),
      (
          Action::<Jump>::new(),
          bindings![KeyCode::Space, GamepadButton::South],
      ),
      (
          Action::<CameraToolToggle>::new(),
          bindings![MouseButton::Right, GamepadButton::LeftTrigger2],
      ),
      (
          Action::<TripodToggle>::new(),
          bindings![KeyCode::KeyT, GamepadButton::North],
      ),
      (
          Action::<Capture>::new(),
          bindings![MouseButton::Left, GamepadButton::RightTrigger2],
      ),
  ])
}

/// Releases the body's input bindings. Running it on an already detached
/// entity does nothing.
pub struct DetachInput;

impl EntityCommand for DetachInput {
  fn apply(self, mut entity: EntityWorldMut) {
    if !entity.contains::<PlayerInput>() {
      return;
    }
    entity.despawn_related::<Actions<PlayerInput>>();
    entity.remove::<PlayerInput>();
    debug!("Input detached from {:?}", entity.id());
  }
}

/// Stick deflection at or below this counts as released.
const STICK_DEADZONE: f32 = 0.1;

/// Movement is analog while any gamepad's left stick is deflected. Keyboard
/// movement stays digital.
pub fn analog_movement_active(left_sticks: impl IntoIterator<Item = Vec2>) -> bool {
  left_sticks
    .into_iter()
    .any(|stick| stick.length() > STICK_DEADZONE)
}

pub struct CameraToolInputPlugin;

impl Plugin for CameraToolInputPlugin {
  fn build(&self, app: &mut App) {
    if !app.is_plugin_added::<EnhancedInputPlugin>() {
      app.add_plugins(EnhancedInputPlugin);
    }
    app
      .add_input_context::<PlayerInput>()
      .add_systems(Update, collect_player_input.in_set(CameraToolSet::Input));
  }
}

fn active_value<A: InputAction>(
  actions: &Actions<PlayerInput>,
  query: &Query<(&Action<A>, &ActionState)>,
) -> Option<A::Output> {
  actions.iter().find_map(|action_entity| {
    let (action, state) = query.get(action_entity).ok()?;
    matches!(state, ActionState::Fired | ActionState::Ongoing).then_some(**action)
  })
}

/// Copies this frame's action values into [`CharacterInput`].
pub fn collect_player_input(
  mut players: Query<(&Actions<PlayerInput>, &mut CharacterInput)>,
  moves: Query<(&Action<Move>, &ActionState)>,
  looks: Query<(&Action<Look>, &ActionState)>,
  sprints: Query<(&Action<Sprint>, &ActionState)>,
  jumps: Query<(&Action<Jump>, &ActionState)>,
  toggles: Query<(&Action<CameraToolToggle>, &ActionState)>,
  tripods: Query<(&Action<TripodToggle>, &ActionState)>,
  captures: Query<(&Action<Capture>, &ActionState)>,
  gamepads: Query<&Gamepad>,
) {
  let stick_moving = analog_movement_active(gamepads.iter().map(Gamepad::left_stick));

  for (actions, mut input) in &mut players {
    input.move_axis = active_value(actions, &moves).unwrap_or_default();
    input.analog_movement = stick_moving && input.move_axis != Vec2::ZERO;
    // Screen-space y grows downward; pitch grows upward
    let look = active_value(actions, &looks).unwrap_or_default();
    input.look = Vec2::new(look.x, -look.y);
    input.sprint = active_value(actions, &sprints).unwrap_or_default();

    let held = HeldButtons {
      jump: active_value(actions, &jumps).unwrap_or_default(),
      toggle_tool: active_value(actions, &toggles).unwrap_or_default(),
      toggle_tripod: active_value(actions, &tripods).unwrap_or_default(),
      capture: active_value(actions, &captures).unwrap_or_default(),
    };
    input.record_buttons(held);

    if input.move_axis != Vec2::ZERO || input.look != Vec2::ZERO {
      trace!("Input: move={:?} look={:?}", input.move_axis, input.look);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn buttons_latch_on_press_edge_only() {
    let mut input = CharacterInput::default();
    let pressed = HeldButtons {
      jump: true,
      ..default()
    };

    input.record_buttons(pressed);
    assert!(input.jump);

    // Consumer clears it; holding the button must not re-latch
    input.jump = false;
    input.record_buttons(pressed);
    assert!(!input.jump);

    input.record_buttons(HeldButtons::default());
    input.record_buttons(pressed);
    assert!(input.jump);
  }

  #[test]
  fn edges_are_tracked_per_button() {
    let mut input = CharacterInput::default();
    input.record_buttons(HeldButtons {
      toggle_tool: true,
      ..default()
    });
    input.record_buttons(HeldButtons {
      toggle_tool: true,
      capture: true,
      ..default()
    });
    assert!(input.toggle_tool);
    assert!(input.capture);
    assert!(!input.jump);
  }

  #[test]
  fn only_a_deflected_stick_counts_as_analog() {
    assert!(!analog_movement_active([]));
    assert!(!analog_movement_active([Vec2::new(0.05, 0.05)]));
    assert!(analog_movement_active([Vec2::ZERO, Vec2::new(0.0, 0.5)]));
  }

  #[test]
  fn detaching_input_releases_bindings_once() {
    let mut app = App::new();
    app
      .add_plugins(MinimalPlugins)
      .add_plugins(bevy::input::InputPlugin)
      .add_plugins(EnhancedInputPlugin)
      .add_input_context::<PlayerInput>();
    app.finish();

    let body = app
      .world_mut()
      .spawn((PlayerInput, player_input_actions()))
      .id();
    let actions: Vec<Entity> = app
      .world()
      .get::<Actions<PlayerInput>>(body)
      .unwrap()
      .iter()
      .collect();
    assert_eq!(actions.len(), 7);

    DetachInput.apply(app.world_mut().entity_mut(body));
    assert!(!app.world().entity(body).contains::<PlayerInput>());
    assert!(app.world().get::<Actions<PlayerInput>>(body).is_none());
    for action in &actions {
      assert!(app.world().get_entity(*action).is_err());
    }

    // Already detached: nothing left to release
    DetachInput.apply(app.world_mut().entity_mut(body));
    assert!(app.world().get_entity(body).is_ok());
  }
}
