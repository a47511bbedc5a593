//! Targeting: захват ближайшего врага + signed bearing для auto-aim
//!
//! - tracker: чистый алгоритм (nearest-in-radius + tie-break + bearing)
//! - components: EnemyRoster, TargetingState, TargetChanged
//! - systems: acquire_targets (каждый fixed tick), sync_enemy_rosters

pub mod components;
pub mod systems;
pub mod tracker;


pub use components::{EnemyRoster, TargetChanged, TargetingState, DEFAULT_SEARCH_RADIUS};
pub use systems::{acquire_targets, sync_enemy_rosters};
pub use tracker::{acquire_target, find_nearest_enemy, EnemySighting, TargetLock};
