//! DarkLab Simulation Core
//!
//! ECS-симуляция на Bevy 0.16. Darkness (тьма) охотится за игроком
//! и боится света.
//!
//! - light: освещённость, light resistance, damping factor
//! - ai: FSM Passive / Hunting / Retreating, телепорт, реакции
//! - movement: адаптер движения (MovementInput → Transform, телепорт)
//! - schedule: отложенные задачи (enrage после black card)
//!
//! Рендер, input, инвентарь: во внешнем хосте, симуляция общается с ним
//! через компоненты и events.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod config;
pub mod light;
pub mod logger;
pub mod movement;
pub mod player;
pub mod schedule;

// Re-export основных типов
pub use ai::{
    darkness_bundle, BlackCardFound, Darkness, DarknessAIPlugin, DarknessController,
    DarknessNotification, DarknessState, NotificationKind, PlayerCaught, Tracking,
};
pub use config::{ConfigError, DarknessConfig};
pub use light::{
    damping_factor, should_retreat, ExternalLightSample, LightExposure, LightPlugin,
    LightResistance, LightSource,
};
pub use movement::{
    DarknessTeleported, Enraged, MovementInput, MovementPlugin, MovementSpeed, TeleportIntent,
};
pub use player::{player_bundle, Player, PlayerLives};
pub use schedule::{SchedulePlugin, ScheduledTasks};

/// Частота simulation tick
pub const FIXED_HZ: f64 = 60.0;

/// Фазы одного simulation tick (FixedUpdate), выполняются строго по порядку
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Первый тик controller'ов (до любых реакций на events)
    Setup,
    /// Сэмпл света, time in dark, light resistance
    Light,
    /// Поимка игрока
    Detection,
    /// PlayerCaught / BlackCardFound
    Reactions,
    /// Darkness FSM
    Controller,
    /// Телепорты и интеграция движения
    Movement,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Setup,
                    SimulationSet::Light,
                    SimulationSet::Detection,
                    SimulationSet::Reactions,
                    SimulationSet::Controller,
                    SimulationSet::Movement,
                )
                    .chain(),
            )
            .register_type::<DarknessConfig>()
            .add_plugins((LightPlugin, MovementPlugin, DarknessAIPlugin, SchedulePlugin));

        // Детерминистичный RNG (seed по умолчанию), если хост не поставил свой
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Длительность одного fixed тика
pub fn fixed_timestep() -> Duration {
    Duration::from_secs_f64(1.0 / FIXED_HZ)
}

/// Создаёт headless Bevy App с полной симуляцией Darkness
///
/// Время ручное: каждый `app.update()` = ровно один fixed тик (первый update
/// только инициализирует часы). Результат зависит только от seed.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(fixed_timestep()))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
