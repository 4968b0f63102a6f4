//! Light компоненты: источники света, экспозиция и resistance agent'а

use bevy::prelude::*;

use super::sampling::LightSample;

/// Источник света (лампа, фонарик, зажигалка игрока)
///
/// Вклад в освещённость линейно падает до нуля на расстоянии `range`
/// от края области сэмплирования.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct LightSource {
    pub intensity: f32,
    /// Дальность (метры)
    pub range: f32,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            range: 8.0,
        }
    }
}

impl LightSource {
    pub fn new(intensity: f32, range: f32) -> Self {
        Self { intensity, range }
    }
}

/// Освещённость в точке agent'а (обновляется каждый тик окружением)
///
/// Инвариант: luminosity ≥ 0, time_in_dark ≥ 0
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct LightExposure {
    pub luminosity: f32,
    /// Где был самый яркий источник при последнем сэмпле (направление бегства)
    pub brightest_light_location: Vec3,
    /// Сколько секунд подряд agent в полной темноте
    pub time_in_dark: f32,
}

impl LightExposure {
    /// Применить сэмпл окружения. Без источников brightest остаётся прежним.
    pub fn apply_sample(&mut self, sample: LightSample) {
        self.luminosity = sample.luminosity.max(0.0);
        if let Some(location) = sample.brightest_location {
            self.brightest_light_location = location;
        }
    }

    /// Учёт времени в темноте: любой свет сбрасывает счётчик
    pub fn accumulate(&mut self, delta: f32) {
        if self.luminosity > 0.0 {
            self.time_in_dark = 0.0;
        } else {
            self.time_in_dark += delta;
        }
    }

    pub fn is_dark(&self) -> bool {
        self.luminosity <= 0.0
    }
}

/// Адаптивная устойчивость к свету
///
/// Растёт пока luminosity > resistance, падает только в полной темноте.
/// Инвариант: value ≥ 0
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LightResistance {
    pub value: f32,
}

impl LightResistance {
    pub fn new(value: f32) -> Self {
        Self {
            value: value.max(0.0),
        }
    }

    /// Ветки взаимоисключающие: за один тик resistance либо растёт, либо падает
    pub fn update(&mut self, luminosity: f32, delta: f32, gain_speed: f32, loss_speed: f32) {
        if luminosity > self.value {
            self.value += delta * gain_speed;
        } else if luminosity <= 0.0 && self.value > 0.0 {
            self.value -= delta * loss_speed;
        }

        if self.value < 0.0 {
            self.value = 0.0;
        }
    }

    /// Одноразовый бонус (black card)
    pub fn boost(&mut self, amount: f32) {
        self.value = (self.value + amount).max(0.0);
    }
}

/// Marker: luminosity пишет хост (движок), а не встроенный sampler
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ExternalLightSample;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resistance_gains_in_bright_light() {
        let mut resistance = LightResistance::new(0.0);
        resistance.update(1.0, 1.0, 0.7, 0.3);
        assert!((resistance.value - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_resistance_holds_in_dim_light() {
        // 0 < luminosity ≤ resistance: ни одна ветка не срабатывает
        let mut resistance = LightResistance::new(2.0);
        resistance.update(0.5, 1.0, 0.7, 0.3);
        assert_eq!(resistance.value, 2.0);
    }

    #[test]
    fn test_resistance_decays_in_darkness_and_clamps() {
        let mut resistance = LightResistance::new(0.2);
        resistance.update(0.0, 1.0, 0.7, 0.3);
        assert_eq!(resistance.value, 0.0);

        resistance.update(0.0, 1.0, 0.7, 0.3);
        assert_eq!(resistance.value, 0.0);
    }

    #[test]
    fn test_resistance_boost() {
        let mut resistance = LightResistance::new(0.5);
        resistance.boost(1.0);
        assert_eq!(resistance.value, 1.5);
    }

    #[test]
    fn test_time_in_dark_resets_on_light() {
        let mut exposure = LightExposure::default();
        exposure.accumulate(0.5);
        exposure.accumulate(0.25);
        assert!((exposure.time_in_dark - 0.75).abs() < 1e-6);

        exposure.apply_sample(LightSample {
            luminosity: 0.1,
            brightest_location: Some(Vec3::X),
        });
        exposure.accumulate(0.5);
        assert_eq!(exposure.time_in_dark, 0.0);
        assert_eq!(exposure.brightest_light_location, Vec3::X);
    }

    #[test]
    fn test_empty_sample_keeps_last_brightest_location() {
        let mut exposure = LightExposure {
            brightest_light_location: Vec3::new(3.0, 0.0, 4.0),
            ..default()
        };
        exposure.apply_sample(LightSample::default());
        assert_eq!(exposure.luminosity, 0.0);
        assert_eq!(exposure.brightest_light_location, Vec3::new(3.0, 0.0, 4.0));
    }
}
