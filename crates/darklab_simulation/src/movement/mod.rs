//! Movement domain: адаптер движения для Darkness
//!
//! Содержит:
//! - MovementInput (накопитель желаемого движения за тик)
//! - MovementSpeed, Enraged
//! - TeleportIntent / DarknessTeleported (events)

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export all components and events
pub use components::*;
pub use events::*;
pub use systems::*;

use crate::SimulationSet;

/// Movement Plugin
///
/// Порядок выполнения (FixedUpdate, SimulationSet::Movement):
/// 1. apply_teleport_intents: телепорты этого тика
/// 2. integrate_movement_input: накопленное движение → Transform
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TeleportIntent>()
            .add_event::<DarknessTeleported>()
            .register_type::<MovementInput>()
            .register_type::<MovementSpeed>();

        app.add_systems(
            FixedUpdate,
            (apply_teleport_intents, integrate_movement_input)
                .chain()
                .in_set(SimulationSet::Movement),
        );
    }
}
