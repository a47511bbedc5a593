//! Tank module: шасси, башня, input, lifecycle, звук двигателя, камера
//!
//! Порядок в FixedUpdate (SimulationSet::Tanks):
//! 1. reset_spawned_tanks — OnEnable: обнулить input/targeting
//! 2. sync_enemy_rosters — пересборка roster при spawn/death
//! 3. acquire_targets — TargetTracker
//! 4. drive_tanks — движение, поворот корпуса, ручной поворот башни
//! 5. aim_turrets — AimController
//! 6. follow_turret_with_camera_rig
//!
//! Update (variable rate): sample_tank_input → update_engine_audio
//! SimulationSet::Lifecycle: disable_dead_tanks

use bevy::prelude::*;

pub mod camera;
pub mod engine_audio;
pub mod lifecycle;
pub mod movement;
pub mod spawn;

pub use camera::{follow_turret_with_camera_rig, CameraRig, CAMERA_RIG_SMOOTHING};
pub use engine_audio::{desired_clip, update_engine_audio, EngineAudio, EngineClip, EngineClipChanged};
pub use lifecycle::{disable_dead_tanks, reset_spawned_tanks};
pub use movement::{drive_tanks, sample_tank_input};
pub use spawn::spawn_tank;

use crate::components::InputAxes;
use crate::targeting::{acquire_targets, sync_enemy_rosters, TargetChanged};
use crate::{aim, DeterministicRng, SimulationSet};

/// Tank Plugin
pub struct TankPlugin;

impl Plugin for TankPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.init_resource::<InputAxes>()
            .add_event::<TargetChanged>()
            .add_event::<EngineClipChanged>();

        // Input семплируется раз в кадр
        app.add_systems(Update, (sample_tank_input, update_engine_audio).chain());

        app.add_systems(
            FixedUpdate,
            (
                reset_spawned_tanks,
                sync_enemy_rosters,
                acquire_targets,
                drive_tanks,
                aim::aim_turrets,
                follow_turret_with_camera_rig,
            )
                .chain()
                .in_set(SimulationSet::Tanks),
        );

        app.add_systems(FixedUpdate, disable_dead_tanks.in_set(SimulationSet::Lifecycle));
    }
}
