//! Player компоненты: marker и оставшиеся жизни
//!
//! Сам игрок (input, инвентарь, HUD) живёт во внешнем хосте. Симуляции нужно
//! только знать где он и сколько у него жизней.

use bevy::prelude::*;

/// Marker component для player character
///
/// Darkness охотится за entity с этим компонентом. Controller получает
/// конкретный Entity при создании (`DarknessController::with_player`),
/// а не ищет игрока глобально.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Жизни игрока
///
/// Охота не начинается, если жизней не осталось.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct PlayerLives {
    pub remaining: u32,
}

impl Default for PlayerLives {
    fn default() -> Self {
        Self::new(3)
    }
}

impl PlayerLives {
    pub fn new(remaining: u32) -> Self {
        Self { remaining }
    }

    pub fn has_lives(&self) -> bool {
        self.remaining > 0
    }

    /// Возвращает оставшиеся жизни (saturating)
    pub fn lose_life(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

/// Компоненты player character в точке `position`
pub fn player_bundle(position: Vec3, lives: u32) -> impl Bundle {
    (Transform::from_translation(position), Player, PlayerLives::new(lives))
}
