//! Movement events

use bevy::prelude::*;

/// Event: мгновенно переместить entity (`teleportAgent`)
///
/// Генерируется:
/// - darkness_controller_tick (телепорт к игроку во время охоты)
///
/// Обрабатывается:
/// - apply_teleport_intents
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TeleportIntent {
    pub entity: Entity,
    pub destination: Vec3,
}

/// Event: телепорт выполнен
///
/// Для рендера (спрятать частицы на время телепорта): симуляция его не читает.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DarknessTeleported {
    pub entity: Entity,
    pub from: Vec3,
    pub to: Vec3,
}
