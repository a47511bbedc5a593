//! Снаряды: state machine, fuse (timeout alarm), пушка танка
//!
//! Жизненный цикл снаряда:
//! `Armed → (impact ИЛИ fuse timeout, кто первый) → Resolving → Resolved`
//!
//! Из Resolved переходов нет. Повторные триггеры (второй impact, fuse после
//! impact, impact после despawn) молча игнорируются.

use std::time::Duration;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::combat::{BlastHit, BlastSpec};
use crate::config::{ShellTuning, TankTuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ShellState {
    Armed,
    Resolving,
    Resolved,
}

/// Timeout alarm снаряда (detonate-by-timeout без попадания)
///
/// Взводится при spawn на `max_lifetime`. Отменённый fuse никогда не срабатывает.
#[derive(Debug, Clone)]
pub struct Fuse {
    timer: Timer,
    cancelled: bool,
}

impl Fuse {
    pub fn new(lifetime_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(lifetime_secs, TimerMode::Once),
            cancelled: false,
        }
    }

    /// Продвинуть таймер. true ровно один раз — в tick, когда время вышло.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.cancelled {
            return false;
        }

        self.timer.tick(delta);
        self.timer.just_finished()
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn remaining_secs(&self) -> f32 {
        self.timer.remaining_secs()
    }
}

/// Снаряд в полёте
#[derive(Component, Debug, Clone)]
pub struct Shell {
    /// Танк, выпустивший снаряд (получает ShellConsumed)
    pub owner: Entity,
    pub blast: BlastSpec,
    state: ShellState,
    fuse: Fuse,
}

impl Shell {
    pub fn new(owner: Entity, tuning: &ShellTuning) -> Self {
        Self {
            owner,
            blast: BlastSpec::from_tuning(tuning),
            state: ShellState::Armed,
            fuse: Fuse::new(tuning.max_lifetime),
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == ShellState::Armed
    }

    /// Single-shot guard: Armed → Resolving.
    ///
    /// true только для первого триггера, все последующие получают false.
    pub fn try_begin(&mut self) -> bool {
        if self.state != ShellState::Armed {
            return false;
        }

        self.state = ShellState::Resolving;
        self.fuse.cancel();
        true
    }

    /// Resolving → Resolved (terminal)
    pub fn finish(&mut self) {
        if self.state == ShellState::Resolving {
            self.state = ShellState::Resolved;
        }
    }

    pub fn fuse(&self) -> &Fuse {
        &self.fuse
    }

    pub fn fuse_mut(&mut self) -> &mut Fuse {
        &mut self.fuse
    }
}

/// Пушка танка: сколько снарядов сейчас в полёте
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Cannon {
    pub shells_in_flight: u32,
    pub max_shells_in_flight: u32,
    /// Начальная скорость снаряда (units/sec)
    pub launch_speed: f32,
}

impl Default for Cannon {
    fn default() -> Self {
        Self::from_tuning(&TankTuning::default())
    }
}

impl Cannon {
    pub fn from_tuning(tuning: &TankTuning) -> Self {
        Self {
            shells_in_flight: 0,
            max_shells_in_flight: tuning.max_shells_in_flight,
            launch_speed: tuning.launch_speed,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.shells_in_flight < self.max_shells_in_flight
    }

    pub fn shell_fired(&mut self) {
        self.shells_in_flight += 1;
    }

    pub fn shell_consumed(&mut self) {
        self.shells_in_flight = self.shells_in_flight.saturating_sub(1);
    }
}

/// Как сработал снаряд
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetonationCause {
    Impact,
    Timeout,
}

/// Event: танк хочет выстрелить (AI, игрок, тест)
#[derive(Event, Debug, Clone)]
pub struct FireShellIntent {
    pub tank: Entity,
}

/// Event: снаряд коснулся коллайдера (collision-entry trigger)
///
/// Пишется из rapier CollisionEvent (forward_rapier_contacts) или напрямую хостом.
#[derive(Event, Debug, Clone)]
pub struct ShellImpact {
    pub shell: Entity,
    pub other: Entity,
}

/// Event: снаряд взорвался (ровно один раз на снаряд)
#[derive(Event, Debug, Clone)]
pub struct ShellDetonated {
    pub shell: Entity,
    pub owner: Entity,
    pub origin: Vec3,
    pub cause: DetonationCause,
    pub hits: Vec<BlastHit>,
}

/// Event: снаряд израсходован, owner может вернуть его в пул / пополнить боезапас
#[derive(Event, Debug, Clone)]
pub struct ShellConsumed {
    pub owner: Entity,
    pub shell: Entity,
}

/// Spawn снаряда: rapier sensor-тело с начальной скоростью + взведённый fuse
pub fn spawn_shell(
    commands: &mut Commands,
    owner: Entity,
    position: Vec3,
    velocity: Vec3,
    tuning: &ShellTuning,
) -> Entity {
    commands
        .spawn((
            Shell::new(owner, tuning),
            Transform::from_translation(position),
            RigidBody::Dynamic,
            Collider::ball(tuning.collision_radius),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            Velocity::linear(velocity),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_begin_is_single_shot() {
        let mut shell = Shell::new(Entity::from_raw(1), &ShellTuning::default());
        assert!(shell.is_armed());

        assert!(shell.try_begin());
        assert_eq!(shell.state(), ShellState::Resolving);
        assert!(!shell.try_begin());

        shell.finish();
        assert_eq!(shell.state(), ShellState::Resolved);
        assert!(!shell.try_begin());
        assert_eq!(shell.state(), ShellState::Resolved);
    }

    #[test]
    fn test_finish_requires_resolving() {
        let mut shell = Shell::new(Entity::from_raw(1), &ShellTuning::default());
        shell.finish();
        assert!(shell.is_armed());
    }

    #[test]
    fn test_fuse_fires_once_at_lifetime() {
        let mut fuse = Fuse::new(2.0);
        let step = Duration::from_millis(500);

        assert!(!fuse.tick(step));
        assert!(!fuse.tick(step));
        assert!(!fuse.tick(step));
        assert!(fuse.tick(step)); // t = 2.0
        assert!(!fuse.tick(step));
        assert!(!fuse.tick(step));
    }

    #[test]
    fn test_cancelled_fuse_never_fires() {
        let mut fuse = Fuse::new(1.0);
        fuse.cancel();
        assert!(fuse.is_cancelled());
        assert!(!fuse.tick(Duration::from_secs(5)));
    }

    #[test]
    fn test_detonation_disarms_fuse() {
        let mut shell = Shell::new(Entity::from_raw(1), &ShellTuning::default());
        assert!(shell.try_begin());
        assert!(!shell.fuse_mut().tick(Duration::from_secs(10)));
    }

    #[test]
    fn test_cannon_capacity() {
        let mut cannon = Cannon::default();
        assert_eq!(cannon.max_shells_in_flight, 3);

        for _ in 0..3 {
            assert!(cannon.can_fire());
            cannon.shell_fired();
        }
        assert!(!cannon.can_fire());

        cannon.shell_consumed();
        assert!(cannon.can_fire());

        cannon.shells_in_flight = 0;
        cannon.shell_consumed(); // не уходит в минус
        assert_eq!(cannon.shells_in_flight, 0);
    }
}
