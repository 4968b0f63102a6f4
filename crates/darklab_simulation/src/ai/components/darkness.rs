//! Darkness agent компоненты: tracking и persistent режим

use bevy::prelude::*;

use crate::config::DarknessConfig;
use crate::light::{LightExposure, LightResistance};
use crate::movement::{MovementInput, MovementSpeed};

/// Что сейчас отслеживает Darkness (взаимоисключающие режимы)
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub enum Tracking {
    #[default]
    None,
    /// Фиксированная точка в мире
    Location(Vec3),
    /// Следовать за entity (позиция читается каждый тик)
    Actor(Entity),
}

/// Darkness, тьма, охотящаяся за игроком
///
/// Про своё FSM состояние agent ничего не знает: им владеет DarknessController.
/// Здесь только то, что controller "говорит" agent'у делать.
///
/// Автоматически добавляет light/movement компоненты через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    DarknessConfig,
    LightExposure,
    LightResistance,
    MovementInput,
    MovementSpeed
)]
pub struct Darkness {
    pub tracking: Tracking,
    /// Выставляется навсегда после black card: охота без лимита времени
    pub is_persistent: bool,
}

impl Darkness {
    pub fn move_to_location(&mut self, location: Vec3) {
        self.tracking = Tracking::Location(location);
    }

    pub fn move_to_actor(&mut self, actor: Entity) {
        self.tracking = Tracking::Actor(actor);
    }

    pub fn stop(&mut self) {
        self.tracking = Tracking::None;
    }

    pub fn is_tracking(&self) -> bool {
        !matches!(self.tracking, Tracking::None)
    }
}

/// Компоненты agent'а в точке `position`
///
/// Скорость берётся из конфига, остальное: Required Components.
pub fn darkness_bundle(position: Vec3, config: DarknessConfig) -> impl Bundle {
    (
        Transform::from_translation(position),
        MovementSpeed {
            speed: config.move_speed,
        },
        config,
        Darkness::default(),
    )
}
