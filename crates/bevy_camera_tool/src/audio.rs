//! Footstep and landing sounds driven by animation cues.

use bevy::audio::{AudioSource, PlaybackSettings, Volume};
use bevy::prelude::*;
use rand::Rng;

use crate::locomotion::Locomotion;
use crate::vertical::{VerticalMotion, VerticalState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
  Footstep,
  Land,
}

/// Raised by the animation layer when a foot plants or the character lands.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCue {
  pub entity: Entity,
  pub kind: CueKind,
}

/// One-shot clip at a world position.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct PlayClipAt {
  pub clip: Handle<AudioSource>,
  pub position: Vec3,
  pub volume: f32,
}

#[derive(Component, Clone, Debug)]
pub struct CharacterAudio {
  /// Picked at random per step.
  pub footsteps: Vec<Handle<AudioSource>>,
  pub landing: Option<Handle<AudioSource>>,
  pub volume: f32,
  /// Footstep cues below this speed are blend noise and stay silent.
  pub min_footstep_speed: f32,
}

impl Default for CharacterAudio {
  fn default() -> Self {
    Self {
      footsteps: Vec::new(),
      landing: None,
      volume: 0.5,
      min_footstep_speed: 0.1,
    }
  }
}

impl CharacterAudio {
  pub fn footstep(&self, rng: &mut impl Rng) -> Option<Handle<AudioSource>> {
    if self.footsteps.is_empty() {
      return None;
    }
    let index = rng.random_range(0..self.footsteps.len());
    Some(self.footsteps[index].clone())
  }
}

/// Turns cues into clip requests. Footsteps only sound while grounded and
/// actually moving.
pub fn handle_animation_cues(
  mut cues: MessageReader<AnimationCue>,
  bodies: Query<(&CharacterAudio, &VerticalMotion, &Locomotion, &Transform)>,
  mut clips: MessageWriter<PlayClipAt>,
) {
  let mut rng = rand::rng();
  for cue in cues.read() {
    let Ok((audio, vertical, locomotion, transform)) = bodies.get(cue.entity) else {
      continue;
    };

    let clip = match cue.kind {
      CueKind::Footstep => {
        if vertical.state != VerticalState::Grounded
          || locomotion.speed <= audio.min_footstep_speed
        {
          continue;
        }
        audio.footstep(&mut rng)
      }
      CueKind::Land => audio.landing.clone(),
    };

    if let Some(clip) = clip {
      clips.write(PlayClipAt {
        clip,
        position: transform.translation,
        volume: audio.volume,
      });
    }
  }
}

pub fn play_clip_requests(mut commands: Commands, mut requests: MessageReader<PlayClipAt>) {
  for request in requests.read() {
    trace!("Clip at {:?}", request.position);
    commands.spawn((
      AudioPlayer::new(request.clip.clone()),
      PlaybackSettings::DESPAWN
        .with_volume(Volume::Linear(request.volume))
        .with_spatial(true),
      Transform::from_translation(request.position),
    ));
  }
}
