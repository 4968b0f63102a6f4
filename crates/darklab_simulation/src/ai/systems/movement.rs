//! Darkness movement behaviors (пишут в MovementInput)
//!
//! Вызываются из darkness_controller_tick. Сами ничего не перемещают:
//! движение применяет movement adapter в конце тика.

use bevy::prelude::*;

use crate::light::{advance_scale, damping_factor, LightExposure, LightResistance};
use crate::movement::MovementInput;

/// Направление от самого яркого источника света
fn away_from_light(position: Vec3, exposure: &LightExposure) -> Vec3 {
    (position - exposure.brightest_light_location).normalize_or_zero()
}

/// Свет слишком сильный → пятимся от источника со скоростью |factor|
///
/// Возвращает true если отступили (FSM в этом тике не работает).
pub fn retreat_from_light(
    position: Vec3,
    exposure: &LightExposure,
    resistance: &LightResistance,
    input: &mut MovementInput,
) -> bool {
    let factor = damping_factor(exposure.luminosity, resistance.value);
    if factor >= 0.0 {
        return false;
    }

    input.add(away_from_light(position, exposure), -factor);
    true
}

/// Движение в направлении `direction` с учётом света (медленнее на свету)
pub fn move_damped(
    direction: Vec3,
    exposure: &LightExposure,
    resistance: &LightResistance,
    input: &mut MovementInput,
) {
    input.add(direction, advance_scale(exposure.luminosity, resistance.value));
}

/// Движение к цели tracking'а. Рядом с целью стоим.
pub fn track(
    position: Vec3,
    target_position: Vec3,
    arrival_distance: f32,
    exposure: &LightExposure,
    resistance: &LightResistance,
    input: &mut MovementInput,
) {
    let offset = target_position - position;
    if offset.length() < arrival_distance {
        return;
    }

    move_damped(offset.normalize_or_zero(), exposure, resistance, input);
}

/// Уходим в темноту: от последнего яркого источника
pub fn into_darkness(
    position: Vec3,
    exposure: &LightExposure,
    resistance: &LightResistance,
    input: &mut MovementInput,
) {
    move_damped(away_from_light(position, exposure), exposure, resistance, input);
}
