//! Встроенный sampler освещённости (замена движкового light query для headless)

use bevy::prelude::*;

use super::components::LightSource;

/// Результат сэмплирования: суммарный свет + позиция самого яркого источника
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LightSample {
    pub luminosity: f32,
    pub brightest_location: Option<Vec3>,
}

/// Вклад одного источника в точку `position` со сферой сэмплирования `radius`
pub fn light_contribution(position: Vec3, radius: f32, light_position: Vec3, light: &LightSource) -> f32 {
    if light.intensity <= 0.0 {
        return 0.0;
    }

    let gap = (position.distance(light_position) - radius).max(0.0);
    if light.range <= 0.0 {
        // Точечный свет без дальности светит только внутри сферы
        return if gap == 0.0 { light.intensity } else { 0.0 };
    }

    light.intensity * (1.0 - (gap / light.range).min(1.0))
}

/// Суммарная освещённость в точке
pub fn sample_luminosity<'a>(
    position: Vec3,
    radius: f32,
    lights: impl IntoIterator<Item = (Vec3, &'a LightSource)>,
) -> LightSample {
    let mut sample = LightSample::default();
    let mut brightest = 0.0;

    for (light_position, light) in lights {
        let contribution = light_contribution(position, radius, light_position, light);
        if contribution <= 0.0 {
            continue;
        }

        sample.luminosity += contribution;
        if contribution > brightest {
            brightest = contribution;
            sample.brightest_location = Some(light_position);
        }
    }

    sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_lights_is_dark() {
        let sample = sample_luminosity(Vec3::ZERO, 1.0, std::iter::empty());
        assert_eq!(sample, LightSample::default());
    }

    #[test]
    fn test_light_inside_sample_sphere_is_full_intensity() {
        let lamp = LightSource::new(2.0, 5.0);
        let sample = sample_luminosity(Vec3::ZERO, 1.0, [(Vec3::new(0.5, 0.0, 0.0), &lamp)]);
        assert_eq!(sample.luminosity, 2.0);
        assert_eq!(sample.brightest_location, Some(Vec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_linear_falloff() {
        let lamp = LightSource::new(1.0, 4.0);
        // distance 3, radius 1 → gap 2 → 1 - 2/4 = 0.5
        let value = light_contribution(Vec3::ZERO, 1.0, Vec3::new(3.0, 0.0, 0.0), &lamp);
        assert!((value - 0.5).abs() < 1e-6);

        let out_of_range = light_contribution(Vec3::ZERO, 1.0, Vec3::new(10.0, 0.0, 0.0), &lamp);
        assert_eq!(out_of_range, 0.0);
    }

    #[test]
    fn test_brightest_source_wins_direction() {
        let weak = LightSource::new(0.5, 10.0);
        let strong = LightSource::new(3.0, 10.0);
        let weak_pos = Vec3::new(-2.0, 0.0, 0.0);
        let strong_pos = Vec3::new(0.0, 0.0, 4.0);

        let sample = sample_luminosity(Vec3::ZERO, 0.0, [(weak_pos, &weak), (strong_pos, &strong)]);
        assert_eq!(sample.brightest_location, Some(strong_pos));
        assert!(sample.luminosity > 3.0 * 0.6);
    }
}
