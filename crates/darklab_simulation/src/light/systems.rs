//! Light systems: сэмплирование окружения → экспозиция → resistance

use bevy::prelude::*;

use super::components::{ExternalLightSample, LightExposure, LightResistance, LightSource};
use super::sampling::sample_luminosity;
use crate::config::DarknessConfig;

/// Система: сэмплирует свет в позиции каждого agent'а
///
/// Agent'ы с `ExternalLightSample` пропускаются: их luminosity пишет хост.
pub fn sample_light_exposure(
    mut agents: Query<(&Transform, &DarknessConfig, &mut LightExposure), Without<ExternalLightSample>>,
    lights: Query<(&Transform, &LightSource)>,
) {
    for (transform, config, mut exposure) in agents.iter_mut() {
        let sample = sample_luminosity(
            transform.translation,
            config.light_sample_radius,
            lights.iter().map(|(light_transform, light)| (light_transform.translation, light)),
        );
        exposure.apply_sample(sample);
    }
}

/// Система: time in dark + адаптация light resistance
pub fn update_light_response(
    mut agents: Query<(&DarknessConfig, &mut LightExposure, &mut LightResistance)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (config, mut exposure, mut resistance) in agents.iter_mut() {
        exposure.accumulate(delta);
        resistance.update(
            exposure.luminosity,
            delta,
            config.light_gain_speed,
            config.light_loss_speed,
        );
    }
}
