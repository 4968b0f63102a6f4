//! DarknessConfig: все настраиваемые параметры Darkness в одном месте
//!
//! Вешается на agent entity (как AIConfig у NPC). Грузится из RON:
//!
//! ```ron
//! (
//!     light_gain_speed: 0.7,
//!     min_time_passive: 5.0,
//!     max_time_passive: 12.0,
//! )
//! ```
//!
//! Отсутствующие поля берутся из `Default`.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    #[error("{name} must be non-negative (got {value})")]
    Negative { name: &'static str, value: f32 },

    #[error("invalid range {name}: min {min} > max {max}")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("teleport_max_attempts must be at least 1")]
    ZeroTeleportAttempts,
}

/// Параметры Darkness (light response + FSM + teleport)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct DarknessConfig {
    /// Рост light resistance в секунду, пока luminosity > resistance
    pub light_gain_speed: f32,
    /// Падение light resistance в секунду в полной темноте
    pub light_loss_speed: f32,
    /// Радиус сэмплирования света вокруг agent (метры)
    pub light_sample_radius: f32,

    /// Passive: диапазон времени до начала охоты (секунды)
    pub min_time_passive: f32,
    pub max_time_passive: f32,
    /// Hunting: диапазон длительности охоты (секунды)
    pub min_time_hunting: f32,
    pub max_time_hunting: f32,
    /// Retreating: максимум времени отступления
    pub max_time_retreating: f32,
    /// Сколько нужно провести в темноте, чтобы считаться "сбежавшим" (и для телепорта)
    pub min_time_in_dark: f32,

    /// Cooldown между телепортами
    pub min_time_between_teleports: f32,
    /// Дистанция телепорта от игрока (и минимальная дистанция, с которой он имеет смысл)
    pub min_teleport_distance: f32,
    /// Лимит попыток rejection sampling для случайного направления
    pub teleport_max_attempts: u32,

    /// Ближе этого к цели tracking не двигает agent
    pub arrival_distance: f32,
    /// Горизонтальный радиус, в котором охотящийся agent ловит игрока
    pub catch_radius: f32,
    /// Базовая скорость (м/с)
    pub move_speed: f32,

    /// Одноразовый бонус к light resistance после black card
    pub black_card_resistance_boost: f32,
    /// Задержка enraged уведомления после black card (секунды реального времени)
    pub enrage_delay: f32,
    /// Множитель скорости в enraged режиме
    pub enraged_speed_multiplier: f32,
}

impl Default for DarknessConfig {
    fn default() -> Self {
        Self {
            light_gain_speed: 0.7,
            light_loss_speed: 0.3, // gain ≈ 2.3× loss
            light_sample_radius: 1.3,

            min_time_passive: 10.0,
            max_time_passive: 20.0,
            min_time_hunting: 20.0,
            max_time_hunting: 40.0,
            max_time_retreating: 10.0,
            min_time_in_dark: 3.0,

            min_time_between_teleports: 8.0,
            min_teleport_distance: 12.0,
            teleport_max_attempts: 50,

            arrival_distance: 0.2,
            catch_radius: 1.0,
            move_speed: 3.0,

            black_card_resistance_boost: 1.0,
            enrage_delay: 2.0,
            enraged_speed_multiplier: 1.5,
        }
    }
}

impl DarknessConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("light_gain_speed", self.light_gain_speed),
            ("light_loss_speed", self.light_loss_speed),
            ("light_sample_radius", self.light_sample_radius),
            ("min_time_passive", self.min_time_passive),
            ("min_time_hunting", self.min_time_hunting),
            ("max_time_retreating", self.max_time_retreating),
            ("min_time_in_dark", self.min_time_in_dark),
            ("min_time_between_teleports", self.min_time_between_teleports),
            ("min_teleport_distance", self.min_teleport_distance),
            ("arrival_distance", self.arrival_distance),
            ("catch_radius", self.catch_radius),
            ("move_speed", self.move_speed),
            ("black_card_resistance_boost", self.black_card_resistance_boost),
            ("enrage_delay", self.enrage_delay),
            ("enraged_speed_multiplier", self.enraged_speed_multiplier),
        ];
        for (name, value) in non_negative {
            // `!(value >= 0.0)` ловит и NaN
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }

        let ranges = [
            ("time_passive", self.min_time_passive, self.max_time_passive),
            ("time_hunting", self.min_time_hunting, self.max_time_hunting),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(ConfigError::InvalidRange { name, min, max });
            }
        }

        if self.teleport_max_attempts == 0 {
            return Err(ConfigError::ZeroTeleportAttempts);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DarknessConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.light_gain_speed > config.light_loss_speed);
        assert_eq!(config.teleport_max_attempts, 50);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = DarknessConfig::from_ron_str("(min_time_passive: 1.0, max_time_passive: 2.0)")
            .expect("valid config");
        assert_eq!(config.min_time_passive, 1.0);
        assert_eq!(config.max_time_passive, 2.0);
        assert_eq!(config.min_teleport_distance, DarknessConfig::default().min_teleport_distance);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = DarknessConfig::from_ron_str("(min_time_hunting: 30.0, max_time_hunting: 5.0)");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRange { name: "time_hunting", .. })
        ));
    }

    #[test]
    fn test_negative_value_rejected() {
        let config = DarknessConfig {
            light_loss_speed: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { name: "light_loss_speed", .. })
        ));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = DarknessConfig {
            teleport_max_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTeleportAttempts)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let result = DarknessConfig::from_ron_str("(light_gain_speed: \"fast\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_ron_round_trip() {
        let config = DarknessConfig {
            catch_radius: 2.5,
            ..Default::default()
        };
        let text = config.to_ron_string().expect("serializable");
        let parsed = DarknessConfig::from_ron_str(&text).expect("parsable");
        assert_eq!(parsed, config);
    }
}
