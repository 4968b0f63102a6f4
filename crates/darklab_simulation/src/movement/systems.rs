//! Movement adapter: MovementInput / TeleportIntent → Transform
//!
//! Никакой физики: translation += velocity * dt.

use bevy::prelude::*;

use super::components::{Enraged, MovementInput, MovementSpeed};
use super::events::{DarknessTeleported, TeleportIntent};
use crate::config::DarknessConfig;

/// Скорость за тик из накопленного input
pub fn movement_velocity(desired: Vec3, speed: f32, multiplier: f32) -> Vec3 {
    desired.clamp_length_max(1.0) * speed * multiplier
}

/// Система: применяет TeleportIntent events
pub fn apply_teleport_intents(
    mut intents: EventReader<TeleportIntent>,
    mut teleported: EventWriter<DarknessTeleported>,
    mut transforms: Query<&mut Transform>,
) {
    for intent in intents.read() {
        let Ok(mut transform) = transforms.get_mut(intent.entity) else {
            crate::logger::log_warning(&format!(
                "TeleportIntent: {:?} has no Transform, skipping",
                intent.entity
            ));
            continue;
        };

        let from = transform.translation;
        transform.translation = intent.destination;

        teleported.write(DarknessTeleported {
            entity: intent.entity,
            from,
            to: intent.destination,
        });
    }
}

/// Система: интеграция MovementInput → Transform
///
/// Enraged agent двигается быстрее (`DarknessConfig::enraged_speed_multiplier`).
pub fn integrate_movement_input(
    mut query: Query<(
        &mut MovementInput,
        &MovementSpeed,
        &mut Transform,
        Option<&DarknessConfig>,
        Has<Enraged>,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut input, speed, mut transform, config, enraged) in query.iter_mut() {
        let desired = input.take();
        if desired.length_squared() <= f32::EPSILON {
            continue;
        }

        let multiplier = match (enraged, config) {
            (true, Some(config)) => config.enraged_speed_multiplier,
            _ => 1.0,
        };

        transform.translation += movement_velocity(desired, speed.speed, multiplier) * delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_clamps_accumulated_input() {
        // Retreat может накопить |factor| = 9: скорость всё равно не больше speed
        let velocity = movement_velocity(Vec3::new(9.0, 0.0, 0.0), 3.0, 1.0);
        assert!((velocity.length() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_velocity_keeps_damped_input() {
        let velocity = movement_velocity(Vec3::new(0.0, 0.0, 0.5), 2.0, 1.0);
        assert!((velocity.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_enraged_multiplier() {
        let velocity = movement_velocity(Vec3::X, 2.0, 1.5);
        assert!((velocity.x - 3.0).abs() < 1e-6);
    }
}
