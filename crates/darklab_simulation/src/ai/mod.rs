//! Darkness AI module
//!
//! FSM Passive / Hunting / Retreating поверх light avoidance model.
//! Controller живёт на отдельной entity и управляет agent'ом (Darkness).

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::*;
pub use systems::*;

use crate::SimulationSet;

/// Darkness AI Plugin
///
/// Регистрирует AI системы в FixedUpdate. Порядок выполнения:
/// 1. initialize_darkness_controllers: первый переход в Passive (SimulationSet::Setup)
/// 2. detect_player_caught: охотящаяся тьма настигла игрока (SimulationSet::Detection)
/// 3. handle_player_caught: отступление + минус жизнь (SimulationSet::Reactions)
/// 4. handle_black_card_found: persistent охота (SimulationSet::Reactions)
/// 5. darkness_controller_tick: FSM (SimulationSet::Controller)
///
/// Инициализация идёт первой: black card, пришедшая до первого тика,
/// должна застать controller уже активным.
pub struct DarknessAIPlugin;

impl Plugin for DarknessAIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerCaught>()
            .add_event::<BlackCardFound>()
            .add_event::<DarknessNotification>()
            .register_type::<Darkness>()
            .register_type::<DarknessController>();

        app.add_systems(
            FixedUpdate,
            (
                initialize_darkness_controllers.in_set(SimulationSet::Setup),
                detect_player_caught.in_set(SimulationSet::Detection),
                (handle_player_caught, handle_black_card_found)
                    .chain()
                    .in_set(SimulationSet::Reactions),
                darkness_controller_tick.in_set(SimulationSet::Controller),
            ),
        );
    }
}
