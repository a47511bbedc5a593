//! Engine audio state (idle / driving)
//!
//! Воспроизведение звука — внешнее. Симуляция решает только КАКОЙ клип
//! должен играть и с каким pitch, и сообщает о смене через EngineClipChanged.

use bevy::prelude::*;
use rand::Rng;

use crate::components::{Dead, TankInput};
use crate::config::TankTuning;
use crate::DeterministicRng;

/// Порог input, ниже которого танк считается стоящим
pub const ENGINE_INPUT_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum EngineClip {
    Idling,
    Driving,
}

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct EngineAudio {
    pub clip: EngineClip,
    pub pitch: f32,
    pub original_pitch: f32,
    pub pitch_range: f32,
}

impl Default for EngineAudio {
    fn default() -> Self {
        Self::from_tuning(&TankTuning::default())
    }
}

impl EngineAudio {
    pub fn from_tuning(tuning: &TankTuning) -> Self {
        Self {
            clip: EngineClip::Idling,
            pitch: tuning.original_pitch,
            original_pitch: tuning.original_pitch,
            pitch_range: tuning.pitch_range,
        }
    }
}

/// Event: клип двигателя сменился (для внешнего audio)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EngineClipChanged {
    pub tank: Entity,
    pub clip: EngineClip,
    pub pitch: f32,
}

/// Какой клип должен играть для данного input
pub fn desired_clip(input: &TankInput) -> EngineClip {
    let idle = input.movement.abs() < ENGINE_INPUT_THRESHOLD
        && input.turn.abs() < ENGINE_INPUT_THRESHOLD
        && input.turret_turn.abs() < ENGINE_INPUT_THRESHOLD;

    if idle {
        EngineClip::Idling
    } else {
        EngineClip::Driving
    }
}

/// System: переключение клипа двигателя (Update, после sample_tank_input)
///
/// При каждой смене клипа pitch выбирается случайно в
/// `[original_pitch - pitch_range, original_pitch + pitch_range]` (seeded RNG).
pub fn update_engine_audio(
    mut tanks: Query<(Entity, &TankInput, &mut EngineAudio), Without<Dead>>,
    mut rng: ResMut<DeterministicRng>,
    mut changes: EventWriter<EngineClipChanged>,
) {
    for (entity, input, mut audio) in tanks.iter_mut() {
        let clip = desired_clip(input);
        if clip == audio.clip {
            continue;
        }

        let low = audio.original_pitch - audio.pitch_range;
        let high = audio.original_pitch + audio.pitch_range;
        let pitch = rng.rng.gen_range(low..=high);

        audio.clip = clip;
        audio.pitch = pitch;

        changes.write(EngineClipChanged {
            tank: entity,
            clip,
            pitch,
        });
    }
}
