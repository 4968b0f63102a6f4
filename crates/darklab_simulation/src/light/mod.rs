//! Light domain: освещённость и реакция Darkness на свет
//!
//! Содержит:
//! - LightSource, LightExposure, LightResistance (компоненты)
//! - damping_factor / should_retreat (light avoidance model)
//! - sample_luminosity (встроенный sampler для headless)

use bevy::prelude::*;

pub mod components;
pub mod model;
pub mod sampling;
pub mod systems;


pub use components::*;
pub use model::{advance_scale, damping_factor, should_retreat, LIGHT_EPSILON};
pub use sampling::{light_contribution, sample_luminosity, LightSample};
pub use systems::*;

use crate::SimulationSet;

/// Light Plugin
///
/// Порядок выполнения (FixedUpdate, SimulationSet::Light):
/// 1. sample_light_exposure: LightSource → LightExposure
/// 2. update_light_response: time in dark + resistance
pub struct LightPlugin;

impl Plugin for LightPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LightSource>()
            .register_type::<LightExposure>()
            .register_type::<LightResistance>();

        app.add_systems(
            FixedUpdate,
            (sample_light_exposure, update_light_response)
                .chain()
                .in_set(SimulationSet::Light),
        );
    }
}
