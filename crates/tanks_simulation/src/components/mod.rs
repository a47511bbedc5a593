//! ECS Components для танков
//!
//! Организация по доменам:
//! - actor: идентичность и здоровье (Tank, Health, Dead)
//! - turret: башня и параметры движения (TurretState, TankDrive)
//! - input: входные оси (TankInput, InputAxisNames, InputAxes)
//!
//! Targeting и combat компоненты живут в своих модулях.

pub mod actor;
pub mod input;
pub mod turret;

// Re-exports для удобного импорта
pub use actor::*;
pub use input::*;
pub use turret::*;
