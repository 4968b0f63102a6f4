//! Телепорт к игроку во время охоты
//!
//! Гейты (по порядку):
//! 1. cooldown: since_last_teleport < min_time_between_teleports
//! 2. игрок и так близко: горизонтальная дистанция < min_teleport_distance
//! 3. не "перезарядились" в темноте: time_in_dark < min_time_in_dark (persistent игнорирует)
//!
//! Точка назначения: случайная точка на окружности радиуса
//! min_teleport_distance вокруг игрока (горизонтальная плоскость XZ).

use bevy::prelude::*;
use rand::Rng;

use crate::config::DarknessConfig;

/// Короче этого вектор не нормализуем (rejection sampling)
pub const MIN_DIRECTION_LENGTH_SQUARED: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeleportBlock {
    Cooldown,
    TooClose,
    NotRecharged,
}

/// Дистанция в горизонтальной плоскости (Y вверх)
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Почему телепорт сейчас запрещён (None: можно)
pub fn teleport_block(
    since_last_teleport: f32,
    distance_to_player: f32,
    time_in_dark: f32,
    is_persistent: bool,
    config: &DarknessConfig,
) -> Option<TeleportBlock> {
    if since_last_teleport < config.min_time_between_teleports {
        return Some(TeleportBlock::Cooldown);
    }
    if distance_to_player < config.min_teleport_distance {
        return Some(TeleportBlock::TooClose);
    }
    if !is_persistent && time_in_dark < config.min_time_in_dark {
        return Some(TeleportBlock::NotRecharged);
    }
    None
}

/// Равномерное направление на окружности: rejection sampling в единичном круге
///
/// После `max_attempts` неудач берём последний кандидат как есть.
pub fn random_horizontal_direction<R: Rng + ?Sized>(rng: &mut R, max_attempts: u32) -> Vec2 {
    let mut candidate = Vec2::ZERO;

    for _ in 0..max_attempts.max(1) {
        candidate = Vec2::new(rng.gen::<f32>() * 2.0 - 1.0, rng.gen::<f32>() * 2.0 - 1.0);
        let length_squared = candidate.length_squared();
        if length_squared <= 1.0 && length_squared >= MIN_DIRECTION_LENGTH_SQUARED {
            return candidate / length_squared.sqrt();
        }
    }

    crate::logger::log_warning(&format!(
        "Teleport direction sampling did not converge after {} attempts, using {:?}",
        max_attempts, candidate
    ));
    candidate.try_normalize().unwrap_or(Vec2::X)
}

/// Точка телепорта: игрок + direction · distance (высота игрока)
pub fn teleport_destination(player_position: Vec3, direction: Vec2, distance: f32) -> Vec3 {
    player_position + Vec3::new(direction.x, 0.0, direction.y) * distance
}

/// Телепорт к игроку (`teleportToPlayer`): гейты + случайная точка вокруг игрока
///
/// Сам ничего не двигает: вызывающий шлёт TeleportIntent и сбрасывает cooldown.
pub fn teleport_to_player<R: Rng + ?Sized>(
    since_last_teleport: f32,
    agent_position: Vec3,
    player_position: Vec3,
    time_in_dark: f32,
    is_persistent: bool,
    config: &DarknessConfig,
    rng: &mut R,
) -> Result<Vec3, TeleportBlock> {
    if let Some(block) = teleport_block(
        since_last_teleport,
        horizontal_distance(player_position, agent_position),
        time_in_dark,
        is_persistent,
        config,
    ) {
        return Err(block);
    }

    let direction = random_horizontal_direction(rng, config.teleport_max_attempts);
    Ok(teleport_destination(
        player_position,
        direction,
        config.min_teleport_distance,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// RNG, который всегда отдаёт одно и то же значение
    struct ConstRng(u32);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.0) << 32 | u64::from(self.0)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.0.to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_gates_in_order() {
        let config = DarknessConfig::default();
        let ready = config.min_time_between_teleports;
        let far = config.min_teleport_distance + 1.0;
        let rested = config.min_time_in_dark;

        assert_eq!(teleport_block(0.0, far, rested, false, &config), Some(TeleportBlock::Cooldown));
        assert_eq!(teleport_block(ready, 1.0, rested, false, &config), Some(TeleportBlock::TooClose));
        assert_eq!(teleport_block(ready, far, 0.0, false, &config), Some(TeleportBlock::NotRecharged));
        assert_eq!(teleport_block(ready, far, rested, false, &config), None);
    }

    #[test]
    fn test_persistent_bypasses_darkness_gate() {
        let config = DarknessConfig::default();
        let ready = config.min_time_between_teleports;
        let far = config.min_teleport_distance + 1.0;

        assert_eq!(teleport_block(ready, far, 0.0, true, &config), None);
        // Cooldown и дистанция остаются
        assert_eq!(teleport_block(0.0, far, 0.0, true, &config), Some(TeleportBlock::Cooldown));
    }

    #[test]
    fn test_random_directions_are_unit() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..200 {
            let direction = random_horizontal_direction(&mut rng, 50);
            assert!((direction.length() - 1.0).abs() < 1e-4, "direction = {:?}", direction);
        }
    }

    #[test]
    fn test_sampling_falls_back_to_last_candidate() {
        // u32::MAX → gen::<f32>() ≈ 1.0 → кандидат (1, 1) всегда вне круга
        let mut rng = ConstRng(u32::MAX);
        let direction = random_horizontal_direction(&mut rng, 50);
        let expected = Vec2::ONE.normalize();
        assert!((direction - expected).length() < 1e-4, "direction = {:?}", direction);
    }

    #[test]
    fn test_sampling_zero_candidate_falls_back_to_x() {
        // 1 << 31 → gen::<f32>() = 0.5 → кандидат (0, 0)
        let mut rng = ConstRng(1 << 31);
        assert_eq!(random_horizontal_direction(&mut rng, 10), Vec2::X);
    }

    #[test]
    fn test_destination_at_teleport_distance() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let player = Vec3::new(4.0, 1.0, -2.0);
        for _ in 0..50 {
            let direction = random_horizontal_direction(&mut rng, 50);
            let destination = teleport_destination(player, direction, 12.0);
            assert!((destination.distance(player) - 12.0).abs() < 1e-3);
            assert_eq!(destination.y, player.y);
        }
    }

    #[test]
    fn test_teleport_to_player_respects_gates() {
        let config = DarknessConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let player = Vec3::new(0.0, 2.0, 0.0);
        let agent = Vec3::new(30.0, 0.0, 0.0);

        assert_eq!(
            teleport_to_player(0.0, agent, player, 100.0, false, &config, &mut rng),
            Err(TeleportBlock::Cooldown)
        );

        let destination = teleport_to_player(100.0, agent, player, 100.0, false, &config, &mut rng)
            .expect("all gates open");
        assert!((horizontal_distance(destination, player) - config.min_teleport_distance).abs() < 1e-3);
        assert_eq!(destination.y, 2.0);
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 10.0, 0.0);
        let b = Vec3::new(3.0, -5.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-6);
    }
}
