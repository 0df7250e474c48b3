//! Headless симуляция мехов
//!
//! Запуск: `mech_simulation [path/to/mech.json]`
//! Один wander-мех бродит по полю, второй стоит и держит в прицеле манекен.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use mech_simulation::{
    create_headless_app, logger, spawn_mech, spawn_target_dummy, AimMaster, DeterministicRng,
    EnergyPool, FireControl, Mech, MechConfig, MechInput, WanderBrain,
};

const TICKS: u32 = 1200;
const REPORT_EVERY: u32 = 120;

#[derive(Resource)]
struct DemoConfig(MechConfig);

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match MechConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                logger::init_logger();
                logger::log_error(&format!("{err}"));
                std::process::exit(1);
            }
        },
        None => MechConfig::default(),
    };

    let seed = 42;
    println!("Starting mech headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )))
    .insert_resource(DemoConfig(config))
    .add_systems(Startup, spawn_demo_scene);

    for tick in 0..TICKS {
        app.update();

        if tick % REPORT_EVERY == 0 {
            report(app.world_mut(), tick);
        }
    }

    println!("Simulation complete!");
}

fn spawn_demo_scene(
    mut commands: Commands,
    config: Res<DemoConfig>,
    mut world_rng: ResMut<DeterministicRng>,
) {
    let config = &config.0;

    let wanderer = spawn_mech(&mut commands, Vec3::ZERO, config);
    commands
        .entity(wanderer)
        .insert(WanderBrain::from_world_rng(&mut world_rng));

    // Стоит на месте, смотрит вперёд (+Z)
    let sentry = spawn_mech(&mut commands, Vec3::new(20.0, 0.0, 0.0), config);
    commands.entity(sentry).insert((
        MechInput {
            facing: Some(Vec3::Z),
            ..default()
        },
        AimMaster {
            rotation: Some(Quat::IDENTITY),
        },
    ));

    spawn_target_dummy(&mut commands, Vec3::new(20.0, 1.5, 80.0));
}

fn report(world: &mut World, tick: u32) {
    let mut query = world.query_filtered::<(Entity, &Transform, &EnergyPool, &FireControl), With<Mech>>();
    let mut rows: Vec<_> = query.iter(world).collect();
    rows.sort_by_key(|(entity, ..)| entity.index());

    for (entity, transform, energy, fire_control) in rows {
        let snapshot = energy.snapshot();
        println!(
            "Tick {}: {:?} pos={:.1?} energy={:.0}/{:.0}{} lock={:?} target={:?}",
            tick,
            entity,
            transform.translation,
            snapshot.current,
            snapshot.max,
            if snapshot.depleted { " (DEPLETED)" } else { "" },
            fire_control.lock.phase(),
            fire_control.lock.current_target,
        );
    }
}
