//! Movement компоненты: накопитель желаемого движения и скорость

use bevy::prelude::*;

/// Желаемое движение за текущий тик (накапливается AI, потребляется адаптером)
///
/// Как у floating pawn: несколько `add` за тик складываются, при интеграции
/// сумма обрезается до единичной длины.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    pub desired: Vec3,
}

impl MovementInput {
    /// `moveAgent(direction, magnitude)`
    pub fn add(&mut self, direction: Vec3, magnitude: f32) {
        self.desired += direction * magnitude;
    }

    /// Забрать накопленное (сбрасывает до нуля)
    pub fn take(&mut self) -> Vec3 {
        std::mem::take(&mut self.desired)
    }

    pub fn is_idle(&self) -> bool {
        self.desired.length_squared() <= f32::EPSILON
    }
}

/// Скорость движения (метры/сек)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 3.0 }
    }
}

/// Marker: Darkness в ярости (после black card): двигается быстрее
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Enraged;
