//! Animation parameter sink.
//!
//! The state machines only write named parameters. Whatever drives the
//! character's animation graph reads them back from [`AnimatorParams`] or
//! provides its own [`AnimationSink`].

use bevy::prelude::*;

/// Parameters written by locomotion and the vertical machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationParam {
  Speed,
  MotionSpeed,
  Grounded,
  Jump,
  FreeFall,
}

impl AnimationParam {
  pub const ALL: [Self; 5] = [
    Self::Speed,
    Self::MotionSpeed,
    Self::Grounded,
    Self::Jump,
    Self::FreeFall,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Self::Speed => "Speed",
      Self::MotionSpeed => "MotionSpeed",
      Self::Grounded => "Grounded",
      Self::Jump => "Jump",
      Self::FreeFall => "FreeFall",
    }
  }

  const fn index(self) -> usize {
    self as usize
  }
}

impl std::fmt::Display for AnimationParam {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

pub trait AnimationSink {
  fn set_float(&mut self, param: AnimationParam, value: f32);
  fn set_bool(&mut self, param: AnimationParam, value: bool);
}

/// Last written value of every parameter.
#[derive(Component, Default, Debug, Clone, PartialEq)]
pub struct AnimatorParams {
  floats: [f32; AnimationParam::ALL.len()],
  flags: [bool; AnimationParam::ALL.len()],
}

impl AnimatorParams {
  pub fn float(&self, param: AnimationParam) -> f32 {
    self.floats[param.index()]
  }

  pub fn flag(&self, param: AnimationParam) -> bool {
    self.flags[param.index()]
  }
}

impl AnimationSink for AnimatorParams {
  fn set_float(&mut self, param: AnimationParam, value: f32) {
    self.floats[param.index()] = value;
  }

  fn set_bool(&mut self, param: AnimationParam, value: bool) {
    let flag = &mut self.flags[param.index()];
    if *flag != value {
      trace!("Animator {param} -> {value}");
    }
    *flag = value;
  }
}
