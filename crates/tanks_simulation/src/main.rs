//! Headless дуэль двух танков
//!
//! Запускает Bevy App без рендера и без rapier step: баллистику снарядов
//! (и collision-entry) здесь эмулирует простая система хоста.
//!
//! Использование: `tanks_simulation [config.json]`

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;
use tanks_simulation::{
    create_combat_app, spawn_tank, CollisionSphere, CombatConfig, ConfigError, Dead, FireShellIntent, Health,
    InputAxes, Shell, ShellImpact, SimulationSet, Tank,
};

const TICKS: u32 = 900;
const FIRE_EVERY: u32 = 90;

fn main() -> Result<(), ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => CombatConfig::load(path)?,
        None => CombatConfig::default(),
    };

    let seed = 42;
    println!("Starting tanks headless duel (seed: {})", seed);

    let shell_radius = config.shell.collision_radius;
    let mut app = create_combat_app(seed, config.clone())?;
    app.insert_resource(ShellContactRadius(shell_radius))
        .add_systems(FixedUpdate, fly_shells.before(SimulationSet::Combat));

    let world = app.world_mut();
    let mut commands = world.commands();
    let first = spawn_tank(&mut commands, 1, Vec3::ZERO, 0.0, &config);
    let second = spawn_tank(&mut commands, 2, Vec3::new(10.0, 0.0, -10.0), 180.0, &config);
    world.flush();

    // Оба игрока держат aim "к цели"
    let mut axes = world.resource_mut::<InputAxes>();
    axes.set("Aim1", 1.0);
    axes.set("Aim2", 1.0);

    for tick in 0..TICKS {
        if tick > 0 && tick % FIRE_EVERY == 0 {
            app.world_mut().send_event(FireShellIntent { tank: first });
            app.world_mut().send_event(FireShellIntent { tank: second });
        }

        app.update();

        if tick % 100 == 0 {
            let world = app.world_mut();
            let mut tanks = world.query::<(Entity, &Tank, &Health, Has<Dead>)>();
            for (entity, tank, health, dead) in tanks.iter(world) {
                println!(
                    "Tick {}: tank {:?} (player {}) health {:.1}{}",
                    tick,
                    entity,
                    tank.player_number,
                    health.current,
                    if dead { " [destroyed]" } else { "" }
                );
            }
        }
    }

    println!("Simulation complete!");
    Ok(())
}

/// Радиус сенсора снаряда (shell.collision_radius)
#[derive(Resource)]
struct ShellContactRadius(f32);

/// Host physics: снаряды летят по Velocity, касание CollisionSphere → ShellImpact
fn fly_shells(
    mut shells: Query<(Entity, &Shell, &Velocity, &mut Transform)>,
    bodies: Query<(Entity, &Transform, &CollisionSphere), Without<Shell>>,
    mut impacts: EventWriter<ShellImpact>,
    contact_radius: Res<ShellContactRadius>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();

    for (entity, shell, velocity, mut transform) in shells.iter_mut() {
        transform.translation += velocity.linvel * dt;

        for (body, body_transform, sphere) in bodies.iter() {
            if body == shell.owner {
                continue;
            }

            if touches(transform.translation, contact_radius.0, body_transform.translation, sphere.radius) {
                impacts.write(ShellImpact {
                    shell: entity,
                    other: body,
                });
                break;
            }
        }
    }
}

/// Касание сенсора снаряда и сферы тела
fn touches(shell_position: Vec3, shell_radius: f32, body_position: Vec3, body_radius: f32) -> bool {
    shell_position.distance(body_position) < body_radius + shell_radius
}
