//! AI Events: входящие триггеры и исходящие уведомления Darkness
//!
//! Входящие (от хоста / своих систем):
//! - PlayerCaught: Darkness настигла игрока → отступление
//! - BlackCardFound: игрок нашёл чёрную карту → persistent охота
//!
//! Исходящие (для нарратива / HUD):
//! - DarknessNotification

use bevy::prelude::*;

/// Darkness настигла игрока (`onDisabling`)
///
/// Генерируется detect_player_caught, хост может слать сам (например из overlap).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerCaught {
    pub controller: Entity,
    pub darkness: Entity,
    pub player: Entity,
}

/// Игрок нашёл чёрную карту (`onPlayerFindsBlackCard`)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BlackCardFound {
    pub player: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    HuntStarted,
    RetreatStarted,
    Enraged,
}

/// Fire-and-forget уведомление для нарратива / HUD
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DarknessNotification {
    pub darkness: Entity,
    pub kind: NotificationKind,
}

impl DarknessNotification {
    pub fn new(darkness: Entity, kind: NotificationKind) -> Self {
        Self { darkness, kind }
    }
}
