//! Logger: уровни сообщений симуляции

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use tanks_simulation::combat::spawn_shell;
use tanks_simulation::{
    create_combat_app, set_log_level, set_logger, spawn_tank, CombatConfig, Dead, Health, LogLevel, LogPrinter,
    ShellImpact,
};

struct CapturePrinter(Arc<Mutex<Vec<(LogLevel, String)>>>);

impl LogPrinter for CapturePrinter {
    fn log(&self, level: LogLevel, message: &str) {
        self.0.lock().unwrap().push((level, message.to_string()));
    }
}

#[test]
fn test_dead_tank_disable_logged_at_info() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    set_logger(Box::new(CapturePrinter(lines.clone())));
    set_log_level(LogLevel::Info);

    let config = CombatConfig::default();
    let mut app = create_combat_app(42, config.clone()).expect("valid config");
    app.update();

    let world = app.world_mut();
    let mut commands = world.commands();
    let owner = spawn_tank(&mut commands, 1, Vec3::new(100.0, 0.0, 0.0), 0.0, &config);
    let target = spawn_tank(&mut commands, 2, Vec3::new(1.0, 0.0, 0.0), 0.0, &config);
    let shell = spawn_shell(&mut commands, owner, Vec3::ZERO, Vec3::ZERO, &config.shell);
    world.flush();
    world.get_mut::<Health>(target).unwrap().current = 10.0;

    world.send_event(ShellImpact { shell, other: target });
    app.update();
    app.update();
    assert!(app.world().get::<Dead>(target).is_some());

    let lines = lines.lock().unwrap();
    let disabled: Vec<&(LogLevel, String)> = lines
        .iter()
        .filter(|(_, message)| message.contains("Disabled dead tank"))
        .collect();

    assert_eq!(disabled.len(), 1);
    assert_eq!(disabled[0].0, LogLevel::Info);
    assert!(!disabled[0].1.contains("INFO:"));

    // Debug-сообщения отфильтрованы уровнем
    assert!(lines.iter().all(|(level, _)| *level >= LogLevel::Info));
}
