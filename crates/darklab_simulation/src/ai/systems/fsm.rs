//! Darkness FSM systems (инициализация controller'ов, per-tick логика).

use bevy::prelude::*;

use super::movement::{into_darkness, retreat_from_light, track};
use super::teleport::teleport_to_player;
use crate::ai::{
    Darkness, DarknessController, DarknessNotification, DarknessState, HuntTarget,
    NotificationKind, Tracking,
};
use crate::config::DarknessConfig;
use crate::light::{LightExposure, LightResistance};
use crate::movement::{MovementInput, TeleportIntent};
use crate::player::{Player, PlayerLives};
use crate::DeterministicRng;

/// Query игрока: позиция + жизни (жизни опциональны: без компонента не ограничены)
pub type PlayerQuery<'w, 's> = Query<'w, 's, (&'static Transform, Option<&'static PlayerLives>), With<Player>>;

/// Разрешить игрока controller'а на этот тик
pub fn resolve_player(player: Option<Entity>, players: &PlayerQuery) -> Option<HuntTarget> {
    let entity = player?;
    let (transform, lives) = players.get(entity).ok()?;
    Some(HuntTarget {
        entity,
        position: transform.translation,
        has_lives: lives.map_or(true, PlayerLives::has_lives),
    })
}

/// Система: первый тик controller'а
///
/// Проверяет что agent существует и сразу переводит FSM в Passive.
/// Если agent не найден: логируем, controller остаётся инертным навсегда.
pub fn initialize_darkness_controllers(
    mut controllers: Query<(Entity, &mut DarknessController)>,
    mut agents: Query<(&mut Darkness, &DarknessConfig)>,
    mut rng: ResMut<DeterministicRng>,
) {
    for (entity, mut controller) in controllers.iter_mut() {
        if controller.initialized {
            continue;
        }
        controller.initialized = true;

        let agent = controller.agent.and_then(|agent| agents.get_mut(agent).ok());
        let Some((mut darkness, config)) = agent else {
            crate::logger::log_error(&format!(
                "DarknessController {:?}: no Darkness agent ({:?}), controller disabled",
                entity, controller.agent
            ));
            controller.agent = None;
            continue;
        };

        controller.become_passive(&mut darkness, config, &mut rng.rng);
    }
}

/// Система: per-tick Darkness FSM
///
/// Порядок (строго):
/// 1. таймеры += dt
/// 2. retreat from light: если свет слишком силён, FSM в этом тике не работает
/// 3. логика текущего состояния (Hunting: сначала телепорт, потом tracking)
pub fn darkness_controller_tick(
    mut controllers: Query<&mut DarknessController>,
    mut agents: Query<(
        Entity,
        &mut Darkness,
        &Transform,
        &LightExposure,
        &LightResistance,
        &DarknessConfig,
        &mut MovementInput,
    )>,
    players: PlayerQuery,
    positions: Query<&Transform>,
    mut notifications: EventWriter<DarknessNotification>,
    mut teleports: EventWriter<TeleportIntent>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for mut controller in controllers.iter_mut() {
        if !controller.is_active() {
            continue;
        }
        let Some(agent) = controller.agent else {
            continue;
        };
        let Ok((agent, mut darkness, transform, exposure, resistance, config, mut input)) =
            agents.get_mut(agent)
        else {
            crate::logger::log(&format!("DarknessController: agent {:?} is gone, skipping tick", agent));
            continue;
        };

        controller.advance_timers(delta);
        let mut position = transform.translation;

        // Свет сильнее FSM: пятимся, состояние не меняем
        if retreat_from_light(position, exposure, resistance, &mut input) {
            continue;
        }

        match controller.state {
            DarknessState::Passive => {
                if controller.passive_expired() {
                    let target = resolve_player(controller.player, &players);
                    if controller.start_hunting(&mut darkness, config, target, &mut rng.rng) {
                        notifications.write(DarknessNotification::new(agent, NotificationKind::HuntStarted));
                    }
                }
            }

            DarknessState::Hunting => {
                if controller.hunt_expired(&darkness) {
                    controller.start_retreating(&mut darkness);
                    notifications.write(DarknessNotification::new(agent, NotificationKind::RetreatStarted));
                } else {
                    // Пробуем телепортироваться поближе к игроку
                    if let Some(target) = resolve_player(controller.player, &players) {
                        let teleport = teleport_to_player(
                            controller.since_last_teleport,
                            position,
                            target.position,
                            exposure.time_in_dark,
                            darkness.is_persistent,
                            config,
                            &mut rng.rng,
                        );
                        if let Ok(destination) = teleport {
                            teleports.write(TeleportIntent {
                                entity: agent,
                                destination,
                            });
                            controller.since_last_teleport = 0.0;
                            position = destination;

                            crate::logger::log(&format!(
                                "Darkness {:?}: teleported to {:?} ({:.1}m from player)",
                                agent, destination, config.min_teleport_distance
                            ));
                        }
                    }

                    // Потом просто двигаемся к цели
                    let target_position = match darkness.tracking {
                        Tracking::None => None,
                        Tracking::Location(location) => Some(location),
                        Tracking::Actor(actor) => positions.get(actor).ok().map(|t| t.translation),
                    };
                    if let Some(target_position) = target_position {
                        track(
                            position,
                            target_position,
                            config.arrival_distance,
                            exposure,
                            resistance,
                            &mut input,
                        );
                    }
                }
            }

            DarknessState::Retreating => {
                if controller.retreat_finished(exposure.time_in_dark, config) {
                    controller.become_passive(&mut darkness, config, &mut rng.rng);
                } else {
                    into_darkness(position, exposure, resistance, &mut input);
                }
            }
        }
    }
}
