//! Darkness FSM: состояния и controller
//!
//! Passive → Hunting → Retreating → Passive
//!
//! - Passive: ждём случайное время (min_time_passive..max_time_passive)
//! - Hunting: преследуем игрока, телепортируемся поближе
//! - Retreating: уходим в темноту до max_time_retreating или пока не скроемся

use bevy::prelude::*;
use rand::Rng;

use super::darkness::Darkness;
use crate::config::DarknessConfig;
use crate::light::LightResistance;

/// FSM состояния Darkness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum DarknessState {
    #[default]
    Passive,
    Hunting,
    Retreating,
}

/// Controller, "владеющий" Darkness agent'ом
///
/// Живёт на отдельной entity. Agent и игрок передаются явно при создании
/// (никаких глобальных поисков).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct DarknessController {
    /// Agent под управлением. None: agent не найден при инициализации, controller инертен
    pub agent: Option<Entity>,
    /// Player character, за которым охотимся
    pub player: Option<Entity>,

    pub state: DarknessState,
    pub since_last_state_change: f32,
    pub since_last_teleport: f32,

    /// Длительности, выбранные при входе в текущий Passive/Hunting
    pub current_max_time_passive: f32,
    pub current_max_time_hunting: f32,

    /// Первый переход в Passive уже выполнен
    pub initialized: bool,
}

impl DarknessController {
    pub fn new(agent: Entity) -> Self {
        Self {
            agent: Some(agent),
            player: None,
            state: DarknessState::Passive,
            since_last_state_change: 0.0,
            since_last_teleport: 0.0,
            current_max_time_passive: 0.0,
            current_max_time_hunting: 0.0,
            initialized: false,
        }
    }

    pub fn with_player(mut self, player: Entity) -> Self {
        self.player = Some(player);
        self
    }

    /// Controller проинициализирован и у него есть agent
    pub fn is_active(&self) -> bool {
        self.initialized && self.agent.is_some()
    }

    pub fn advance_timers(&mut self, delta: f32) {
        self.since_last_state_change += delta;
        self.since_last_teleport += delta;
    }

    pub fn passive_expired(&self) -> bool {
        self.since_last_state_change >= self.current_max_time_passive
    }

    /// Persistent охота не заканчивается по таймеру
    pub fn hunt_expired(&self, darkness: &Darkness) -> bool {
        !darkness.is_persistent && self.since_last_state_change >= self.current_max_time_hunting
    }

    pub fn retreat_finished(&self, time_in_dark: f32, config: &DarknessConfig) -> bool {
        self.since_last_state_change >= config.max_time_retreating
            || time_in_dark >= config.min_time_in_dark
    }

    /// Остановиться и ждать
    pub fn become_passive<R: Rng + ?Sized>(
        &mut self,
        darkness: &mut Darkness,
        config: &DarknessConfig,
        rng: &mut R,
    ) {
        self.state = DarknessState::Passive;
        darkness.stop();

        self.current_max_time_passive =
            draw_duration(rng, config.min_time_passive, config.max_time_passive);
        self.since_last_state_change = 0.0;

        crate::logger::log_info(&format!(
            "Darkness {:?}: entering passive state ({:.1}s)",
            self.agent, self.current_max_time_passive
        ));
    }

    /// Начать охоту за `target`
    ///
    /// Возвращает false (состояние не меняется), если игрок не найден или
    /// у него не осталось жизней.
    pub fn start_hunting<R: Rng + ?Sized>(
        &mut self,
        darkness: &mut Darkness,
        config: &DarknessConfig,
        target: Option<HuntTarget>,
        rng: &mut R,
    ) -> bool {
        let Some(target) = target else {
            crate::logger::log_warning(&format!(
                "Darkness {:?}: player not resolved, hunt postponed",
                self.agent
            ));
            return false;
        };

        if !target.has_lives {
            crate::logger::log(&format!(
                "Darkness {:?}: player has no lives left, not hunting",
                self.agent
            ));
            return false;
        }

        self.state = DarknessState::Hunting;
        self.current_max_time_hunting =
            draw_duration(rng, config.min_time_hunting, config.max_time_hunting);
        self.since_last_state_change = 0.0;
        darkness.move_to_actor(target.entity);

        crate::logger::log_info(&format!(
            "Darkness {:?}: starting the hunt for {:?} ({:.1}s, persistent: {})",
            self.agent, target.entity, self.current_max_time_hunting, darkness.is_persistent
        ));
        true
    }

    /// Прекратить преследование и уйти в темноту
    pub fn start_retreating(&mut self, darkness: &mut Darkness) {
        self.state = DarknessState::Retreating;
        darkness.stop();
        self.since_last_state_change = 0.0;

        crate::logger::log_info(&format!(
            "Darkness {:?}: retreating into darkness",
            self.agent
        ));
    }

    /// Darkness настигла игрока (`onDisabling`): отступаем из любого состояния
    pub fn on_disabling(&mut self, darkness: &mut Darkness) {
        self.start_retreating(darkness);
    }

    /// Игрок нашёл чёрную карту
    ///
    /// Agent становится persistent навсегда и сразу начинает охоту (если есть
    /// за кем). Бонус к resistance только при первой карте.
    pub fn on_player_finds_black_card<R: Rng + ?Sized>(
        &mut self,
        darkness: &mut Darkness,
        resistance: &mut LightResistance,
        config: &DarknessConfig,
        target: Option<HuntTarget>,
        rng: &mut R,
    ) -> BlackCardOutcome {
        let first_card = !darkness.is_persistent;
        darkness.is_persistent = true;

        let hunting = self.start_hunting(darkness, config, target, rng);

        if first_card {
            resistance.boost(config.black_card_resistance_boost);
        }

        BlackCardOutcome {
            hunting,
            first_card,
        }
    }
}

/// Результат реакции на чёрную карту
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlackCardOutcome {
    /// Охота (пере)запущена
    pub hunting: bool,
    /// Карта первая: нужно запланировать enrage
    pub first_card: bool,
}

/// Игрок, разрешённый для текущего тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HuntTarget {
    pub entity: Entity,
    pub position: Vec3,
    pub has_lives: bool,
}

/// Равномерно из [min, max]; при вырожденном диапазоне: min
pub fn draw_duration<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}
