//! AI reaction systems (поимка игрока, black card).

use bevy::prelude::*;

use super::fsm::{resolve_player, PlayerQuery};
use super::teleport::horizontal_distance;
use crate::ai::{
    BlackCardFound, Darkness, DarknessController, DarknessNotification, DarknessState,
    NotificationKind, PlayerCaught,
};
use crate::config::DarknessConfig;
use crate::light::LightResistance;
use crate::player::{Player, PlayerLives};
use crate::schedule::{ScheduledTaskKind, ScheduledTasks};
use crate::DeterministicRng;

/// System: охотящаяся Darkness настигла игрока
///
/// Вне Hunting тьма безвредна. Горизонтальная дистанция ≤ catch_radius → PlayerCaught.
pub fn detect_player_caught(
    controllers: Query<(Entity, &DarknessController)>,
    agents: Query<(&Transform, &DarknessConfig), With<Darkness>>,
    players: Query<&Transform, With<Player>>,
    mut caught: EventWriter<PlayerCaught>,
) {
    for (controller_entity, controller) in controllers.iter() {
        if !controller.is_active() || controller.state != DarknessState::Hunting {
            continue;
        }
        let (Some(agent), Some(player)) = (controller.agent, controller.player) else {
            continue;
        };
        let Ok((agent_transform, config)) = agents.get(agent) else {
            continue;
        };
        let Ok(player_transform) = players.get(player) else {
            continue;
        };

        if horizontal_distance(agent_transform.translation, player_transform.translation)
            <= config.catch_radius
        {
            caught.write(PlayerCaught {
                controller: controller_entity,
                darkness: agent,
                player,
            });
        }
    }
}

/// System: реакция на PlayerCaught (`onDisabling`)
///
/// Игрок теряет жизнь, controller сразу уходит в Retreating, из любого состояния.
pub fn handle_player_caught(
    mut events: EventReader<PlayerCaught>,
    mut controllers: Query<&mut DarknessController>,
    mut agents: Query<&mut Darkness>,
    mut lives: Query<&mut PlayerLives>,
    mut notifications: EventWriter<DarknessNotification>,
) {
    for event in events.read() {
        if let Ok(mut player_lives) = lives.get_mut(event.player) {
            let remaining = player_lives.lose_life();
            crate::logger::log_info(&format!(
                "Player {:?} caught by {:?}: {} lives left",
                event.player, event.darkness, remaining
            ));
        }

        let Ok(mut controller) = controllers.get_mut(event.controller) else {
            crate::logger::log_warning(&format!(
                "PlayerCaught: controller {:?} not found",
                event.controller
            ));
            continue;
        };
        let Some(agent) = controller.agent else {
            continue;
        };
        let Ok(mut darkness) = agents.get_mut(agent) else {
            continue;
        };

        controller.on_disabling(&mut darkness);
        notifications.write(DarknessNotification::new(agent, NotificationKind::RetreatStarted));
    }
}

/// System: игрок нашёл чёрную карту (`onPlayerFindsBlackCard`)
///
/// Для каждого controller'а:
/// - persistent навсегда (охота без лимита)
/// - принудительная охота (всё ещё требует живого игрока с жизнями)
/// - одноразовый бонус к light resistance
/// - отложенное enraged уведомление (enrage_delay реального времени)
///
/// Повторная карта снова запускает охоту, но бонус и enrage не повторяются.
pub fn handle_black_card_found(
    mut events: EventReader<BlackCardFound>,
    mut controllers: Query<&mut DarknessController>,
    mut agents: Query<(&mut Darkness, &mut LightResistance, &DarknessConfig)>,
    players: PlayerQuery,
    mut tasks: ResMut<ScheduledTasks>,
    mut notifications: EventWriter<DarknessNotification>,
    mut rng: ResMut<DeterministicRng>,
    real_time: Res<Time<Real>>,
) {
    for event in events.read() {
        crate::logger::log_info(&format!("Player {:?} found the black card", event.player));

        for mut controller in controllers.iter_mut() {
            if !controller.is_active() {
                continue;
            }
            let Some(agent) = controller.agent else {
                continue;
            };
            let Ok((mut darkness, mut resistance, config)) = agents.get_mut(agent) else {
                continue;
            };

            let target = resolve_player(controller.player, &players);
            let outcome = controller.on_player_finds_black_card(
                &mut darkness,
                &mut resistance,
                config,
                target,
                &mut rng.rng,
            );
            if outcome.hunting {
                notifications.write(DarknessNotification::new(agent, NotificationKind::HuntStarted));
            }

            if outcome.first_card {
                tasks.schedule(
                    real_time.elapsed(),
                    config.enrage_delay,
                    agent,
                    ScheduledTaskKind::Enrage,
                );
            }
        }
    }
}
