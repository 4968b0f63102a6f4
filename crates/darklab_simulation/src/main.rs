//! Headless симуляция DarkLab
//!
//! Демо-сцена: Darkness, игрок и пара ламп. Печатает уведомления Darkness.

use std::path::PathBuf;

use anyhow::Context;
use bevy::prelude::*;
use clap::Parser;
use darklab_simulation::logger::{self, LogLevel};
use darklab_simulation::{
    create_headless_app, darkness_bundle, player_bundle, DarknessConfig, DarknessController,
    DarknessNotification, DarknessState, LightSource, FIXED_HZ,
};

#[derive(Parser, Debug)]
#[command(name = "darklab_simulation", about = "Headless Darkness AI simulation")]
struct Args {
    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Сколько fixed тиков прогнать
    #[arg(long, default_value_t = 3600)]
    ticks: u32,

    /// DarknessConfig в RON
    #[arg(long)]
    config: Option<PathBuf>,

    /// debug / info / warn / error
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Напечатать конфиг в RON и выйти
    #[arg(long)]
    dump_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DarknessConfig::load(path)
            .with_context(|| format!("loading darkness config from {}", path.display()))?,
        None => DarknessConfig::default(),
    };

    if args.dump_config {
        println!("{}", config.to_ron_string()?);
        return Ok(());
    }

    let level = LogLevel::parse(&args.log_level)
        .with_context(|| format!("unknown log level {:?}", args.log_level))?;
    logger::set_log_level(level);

    println!(
        "Starting DarkLab headless simulation (seed: {}, ticks: {})",
        args.seed, args.ticks
    );

    let mut app = create_headless_app(args.seed);
    let world = app.world_mut();

    let player = world.spawn(player_bundle(Vec3::new(0.0, 0.0, 0.0), 3)).id();
    let darkness = world
        .spawn(darkness_bundle(Vec3::new(20.0, 0.0, 20.0), config))
        .id();
    let controller = world
        .spawn(DarknessController::new(darkness).with_player(player))
        .id();
    world.spawn((
        Transform::from_translation(Vec3::new(2.0, 2.0, 0.0)),
        LightSource::new(0.4, 6.0),
    ));
    world.spawn((
        Transform::from_translation(Vec3::new(15.0, 2.0, 10.0)),
        LightSource::new(1.5, 5.0),
    ));

    let mut last_state = None;
    let mut cursor = app
        .world()
        .resource::<Events<DarknessNotification>>()
        .get_cursor();

    for tick in 0..args.ticks {
        app.update();

        let world = app.world();
        for notification in cursor.read(world.resource::<Events<DarknessNotification>>()) {
            println!(
                "Tick {} ({:.1}s): {:?}",
                tick,
                tick as f64 / FIXED_HZ,
                notification.kind
            );
        }

        let state = world.get::<DarknessController>(controller).map(|c| c.state);
        if state != last_state {
            if let Some(state) = state {
                println!("Tick {}: Darkness → {:?}", tick, state);
            }
            last_state = state;
        }

        if tick % 600 == 0 {
            if let Some(transform) = world.get::<Transform>(darkness) {
                println!("Tick {}: Darkness at {:?}", tick, transform.translation);
            }
        }
    }

    let hunting = last_state == Some(DarknessState::Hunting);
    println!("Simulation complete! (hunting at end: {})", hunting);
    Ok(())
}
