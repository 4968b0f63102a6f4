//! Light avoidance model: реакция Darkness на свет
//!
//! Одна непрерывная формула для двух режимов:
//! - factor > 0: двигаемся к цели, но медленнее (скорость × factor)
//! - factor ≤ 0: свет слишком яркий, отступаем от самого яркого источника
//!
//! ```text
//! factor = 1 − 2·max(0, L − R/2) / (R + ε)
//! ```

/// ε в знаменателе (при нулевой resistance не делим на 0)
pub const LIGHT_EPSILON: f32 = 0.2;

/// Множитель движения для данной освещённости и resistance.
///
/// Не возрастает по `luminosity`, не убывает по `resistance`.
pub fn damping_factor(luminosity: f32, resistance: f32) -> f32 {
    1.0 - 2.0 * (luminosity - resistance / 2.0).max(0.0) / (resistance + LIGHT_EPSILON)
}

/// Свет слишком силён: agent должен отступать вместо движения к цели.
pub fn should_retreat(luminosity: f32, resistance: f32) -> bool {
    damping_factor(luminosity, resistance) < 0.0
}

/// Скорость "наступления": отрицательный factor обрезается до 0.
pub fn advance_scale(luminosity: f32, resistance: f32) -> f32 {
    damping_factor(luminosity, resistance).max(0.0)
}
