//! Отложенные задачи (fire-and-forget)
//!
//! Задача держит только Entity цели (weak reference): если к моменту
//! срабатывания цель исчезла: задача просто выбрасывается.
//!
//! Время: `Time<Real>`, не fixed тики: задержка не зависит от скорости симуляции.
//! Система крутится в Update на том же потоке, что и FixedUpdate, гонок нет.

use std::time::Duration;

use bevy::prelude::*;

use crate::ai::{Darkness, DarknessNotification, NotificationKind};
use crate::movement::Enraged;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledTaskKind {
    /// Darkness впадает в ярость (после black card)
    Enrage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub fire_at: Duration,
    pub target: Entity,
    pub kind: ScheduledTaskKind,
}

/// Очередь отложенных задач
#[derive(Resource, Debug, Default)]
pub struct ScheduledTasks {
    tasks: Vec<ScheduledTask>,
}

impl ScheduledTasks {
    /// Запланировать `kind` для `target` через `delay_secs` от `now`
    pub fn schedule(&mut self, now: Duration, delay_secs: f32, target: Entity, kind: ScheduledTaskKind) {
        let delay = Duration::try_from_secs_f32(delay_secs.max(0.0)).unwrap_or_default();
        self.tasks.push(ScheduledTask {
            fire_at: now + delay,
            target,
            kind,
        });
    }

    /// Забрать все задачи с fire_at ≤ now (в порядке планирования)
    pub fn drain_due(&mut self, now: Duration) -> Vec<ScheduledTask> {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| task.fire_at <= now);
        self.tasks = pending;
        due
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// System: выполнение созревших задач
pub fn run_scheduled_tasks(
    mut commands: Commands,
    mut tasks: ResMut<ScheduledTasks>,
    agents: Query<(), With<Darkness>>,
    mut notifications: EventWriter<DarknessNotification>,
    real_time: Res<Time<Real>>,
) {
    if tasks.is_empty() {
        return;
    }

    for task in tasks.drain_due(real_time.elapsed()) {
        if agents.get(task.target).is_err() {
            crate::logger::log(&format!(
                "Scheduled {:?} for {:?} dropped: target is gone",
                task.kind, task.target
            ));
            continue;
        }

        match task.kind {
            ScheduledTaskKind::Enrage => {
                commands.entity(task.target).try_insert(Enraged);
                notifications.write(DarknessNotification::new(task.target, NotificationKind::Enraged));
                crate::logger::log_info(&format!("Darkness {:?} is enraged", task.target));
            }
        }
    }
}

/// Schedule Plugin: очередь + runner в Update
pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScheduledTasks>()
            .add_systems(Update, run_scheduled_tasks);
    }
}
