//! Jump and gravity state machine.

use bevy::prelude::*;
use serde::Deserialize;

use crate::animation::{AnimationParam, AnimationSink, AnimatorParams};
use crate::input::CharacterInput;
use crate::rig::CharacterBody;

#[derive(Component, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct JumpConfig {
  pub jump_height: f32,
  /// Negative; units per second squared.
  pub gravity: f32,
  /// Delay after landing before another jump is allowed.
  pub jump_timeout: f32,
  /// Time airborne before the character counts as free falling.
  pub fall_timeout: f32,
  pub terminal_velocity: f32,
  /// Small downward velocity held while grounded to keep contact.
  pub grounded_velocity: f32,
}

impl Default for JumpConfig {
  fn default() -> Self {
    Self {
      jump_height: 1.2,
      gravity: -15.0,
      jump_timeout: 0.5,
      fall_timeout: 0.15,
      terminal_velocity: 53.0,
      grounded_velocity: -2.0,
    }
  }
}

/// Ground contact reported by the physics layer.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grounded(pub bool);

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalState {
  #[default]
  Grounded,
  Airborne,
}

/// Animation flags raised by one vertical step. `None` leaves the current
/// value alone.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalFlags {
  pub grounded: bool,
  pub jump: Option<bool>,
  pub free_fall: Option<bool>,
}

impl VerticalFlags {
  pub fn write_to(&self, sink: &mut impl AnimationSink) {
    sink.set_bool(AnimationParam::Grounded, self.grounded);
    if let Some(jump) = self.jump {
      sink.set_bool(AnimationParam::Jump, jump);
    }
    if let Some(free_fall) = self.free_fall {
      sink.set_bool(AnimationParam::FreeFall, free_fall);
    }
  }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct VerticalMotion {
  pub state: VerticalState,
  pub vertical_velocity: f32,
  pub jump_timeout_remaining: f32,
  pub fall_timeout_remaining: f32,
}

impl Default for VerticalMotion {
  fn default() -> Self {
    Self::new(&JumpConfig::default())
  }
}

impl VerticalMotion {
  pub fn new(config: &JumpConfig) -> Self {
    Self {
      state: VerticalState::Grounded,
      vertical_velocity: 0.0,
      jump_timeout_remaining: config.jump_timeout,
      fall_timeout_remaining: config.fall_timeout,
    }
  }

  /// Takes the jump from `jump_requested` when allowed and runs the timers.
  /// Does not apply gravity.
  pub fn update_state(
    &mut self,
    grounded: bool,
    jump_requested: &mut bool,
    dt: f32,
    config: &JumpConfig,
  ) -> VerticalFlags {
    let mut flags = VerticalFlags {
      grounded,
      ..default()
    };

    if grounded {
      self.state = VerticalState::Grounded;
      self.fall_timeout_remaining = config.fall_timeout;
      flags.jump = Some(false);
      flags.free_fall = Some(false);

      if self.vertical_velocity < 0.0 {
        self.vertical_velocity = config.grounded_velocity;
      }

      if *jump_requested && self.jump_timeout_remaining <= 0.0 {
        self.vertical_velocity = (config.jump_height * -2.0 * config.gravity).sqrt();
        *jump_requested = false;
        flags.jump = Some(true);
      } else if self.jump_timeout_remaining > 0.0 {
        self.jump_timeout_remaining = (self.jump_timeout_remaining - dt).max(0.0);
      }
    } else {
      self.state = VerticalState::Airborne;
      self.jump_timeout_remaining = config.jump_timeout;

      if self.fall_timeout_remaining >= 0.0 {
        self.fall_timeout_remaining -= dt;
      } else {
        flags.free_fall = Some(true);
        // A press during the fall must not fire on landing
        *jump_requested = false;
      }
    }

    flags
  }

  /// Accelerates downward, capped at terminal velocity.
  pub fn integrate_gravity(&mut self, dt: f32, config: &JumpConfig) {
    if self.vertical_velocity > -config.terminal_velocity {
      self.vertical_velocity = (self.vertical_velocity + config.gravity * dt)
        .max(-config.terminal_velocity);
    }
  }

  pub fn tick(
    &mut self,
    grounded: bool,
    jump_requested: &mut bool,
    dt: f32,
    config: &JumpConfig,
  ) -> VerticalFlags {
    let flags = self.update_state(grounded, jump_requested, dt, config);
    self.integrate_gravity(dt, config);
    flags
  }
}

pub fn update_vertical_motion(
  time: Res<Time>,
  mut bodies: Query<
    (
      &Grounded,
      &JumpConfig,
      &mut VerticalMotion,
      &mut CharacterInput,
      Option<&mut AnimatorParams>,
    ),
    With<CharacterBody>,
  >,
) {
  let dt = time.delta_secs();
  for (grounded, config, mut motion, mut input, animator) in &mut bodies {
    let was = motion.state;
    let flags = motion.tick(grounded.0, &mut input.jump, dt, config);

    if flags.jump == Some(true) {
      debug!("Jump at {:.2} m/s", motion.vertical_velocity);
    }
    if was != motion.state {
      trace!("Vertical state {:?} -> {:?}", was, motion.state);
    }
    if let Some(mut animator) = animator {
      flags.write_to(animator.as_mut());
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const DT: f32 = 1.0 / 60.0;

  #[test]
  fn jump_velocity_matches_height() {
    let config = JumpConfig::default();
    let mut motion = VerticalMotion {
      jump_timeout_remaining: 0.0,
      ..VerticalMotion::new(&config)
    };
    let mut jump = true;

    let flags = motion.update_state(true, &mut jump, DT, &config);

    assert_eq!(motion.vertical_velocity, (1.2f32 * -2.0 * -15.0).sqrt());
    assert!((motion.vertical_velocity - 6.0).abs() < 1e-5);
    assert!(!jump, "jump should be consumed");
    assert_eq!(flags.jump, Some(true));
  }

  #[test]
  fn jump_waits_for_timeout_and_stays_latched() {
    let config = JumpConfig::default();
    let mut motion = VerticalMotion::new(&config);
    let mut jump = true;

    motion.tick(true, &mut jump, 0.2, &config);
    assert!(jump);
    assert!(motion.vertical_velocity < 0.0);

    motion.tick(true, &mut jump, 0.4, &config);
    assert_eq!(motion.jump_timeout_remaining, 0.0);

    let flags = motion.tick(true, &mut jump, DT, &config);
    assert_eq!(flags.jump, Some(true));
    assert!(motion.vertical_velocity > 0.0);
  }

  #[test]
  fn gravity_accumulates_while_airborne() {
    let config = JumpConfig::default();
    let mut motion = VerticalMotion::new(&config);
    let mut jump = false;

    let frames = 30;
    for _ in 0..frames {
      motion.tick(false, &mut jump, DT, &config);
    }

    let expected = config.gravity * DT * frames as f32;
    assert!((motion.vertical_velocity - expected).abs() < 1e-3);
    assert_eq!(motion.state, VerticalState::Airborne);
  }

  #[test]
  fn velocity_never_exceeds_terminal() {
    let config = JumpConfig::default();
    let mut motion = VerticalMotion::new(&config);
    let mut jump = false;

    for _ in 0..2000 {
      motion.tick(false, &mut jump, DT, &config);
      assert!(motion.vertical_velocity >= -config.terminal_velocity);
    }
    assert_eq!(motion.vertical_velocity, -config.terminal_velocity);
  }

  #[test]
  fn grounded_holds_small_downward_velocity() {
    let config = JumpConfig::default();
    let mut motion = VerticalMotion {
      vertical_velocity: -20.0,
      ..VerticalMotion::new(&config)
    };
    let mut jump = false;

    let flags = motion.update_state(true, &mut jump, DT, &config);

    assert_eq!(motion.vertical_velocity, config.grounded_velocity);
    assert_eq!(flags.free_fall, Some(false));
    assert_eq!(flags.jump, Some(false));
  }

  #[test]
  fn free_fall_raises_after_timeout_and_clears_jump() {
    let config = JumpConfig::default();
    let mut motion = VerticalMotion::new(&config);
    let mut jump = false;

    let mut raised_at = None;
    for frame in 0..30 {
      if frame == 3 {
        jump = true;
      }
      let flags = motion.tick(false, &mut jump, DT, &config);
      if flags.free_fall == Some(true) && raised_at.is_none() {
        raised_at = Some(frame);
      }
    }

    let raised_at = raised_at.expect("free fall never raised");
    assert!(raised_at as f32 * DT >= config.fall_timeout);
    assert!(!jump, "buffered jump should be dropped while falling");
  }

  #[test]
  fn landing_resets_fall_timeout() {
    let config = JumpConfig::default();
    let mut motion = VerticalMotion::new(&config);
    let mut jump = false;

    for _ in 0..5 {
      motion.tick(false, &mut jump, DT, &config);
    }
    assert!(motion.fall_timeout_remaining < config.fall_timeout);
    assert_eq!(motion.jump_timeout_remaining, config.jump_timeout);

    motion.tick(true, &mut jump, DT, &config);
    assert_eq!(motion.fall_timeout_remaining, config.fall_timeout);
    assert_eq!(motion.state, VerticalState::Grounded);
  }

  #[test]
  fn flags_leave_unset_params_alone() {
    let mut animator = AnimatorParams::default();
    animator.set_bool(AnimationParam::Jump, true);

    VerticalFlags {
      grounded: false,
      jump: None,
      free_fall: Some(true),
    }
    .write_to(&mut animator);

    assert!(animator.flag(AnimationParam::Jump));
    assert!(animator.flag(AnimationParam::FreeFall));
    assert!(!animator.flag(AnimationParam::Grounded));
  }
}
