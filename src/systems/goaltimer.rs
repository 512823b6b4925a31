//! Goal timer systems.
//!
//! This module provides the systems and observer that drive
//! [`GoalTimer`](crate::components::goaltimer::GoalTimer) components:
//!
//! - [`init_goal_timers`] – draws the first goal of newly added timers and
//!   schedules the arm of active ones
//! - [`arm_goal_timers`] – un-pauses timers whose scheduled arm is due
//! - [`update_goal_timers`] – advances running timers, emits progress and
//!   completion events, applies the completion policy
//! - [`goal_timer_trigger_observer`] – re-arms timers on matching
//!   [`LogicEvent`](crate::events::logic::LogicEvent)s
//!
//! # System Ordering
//!
//! The three systems must run chained, after
//! [`update_world_time`](crate::systems::time::update_world_time) for the
//! frame. [`add_goal_timer_systems`] adds them in the right order:
//!
//! ```ignore
//! let mut update = Schedule::default();
//! add_goal_timer_systems(&mut update);
//! register_goal_timer_observers(&mut world);
//! ```
//!
//! An arm that becomes due on a frame lets the timer tick on that same frame.
//! Arm delays count down by the scaled frame delta, starting the frame after
//! they are registered.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::goaltimer::{GoalTimer, TimerDirection};
use crate::events::goaltimer::{TimerCompleteEvent, TimerProgressEvent};
use crate::events::logic::LogicEvent;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::armschedule::ArmSchedule;
use crate::resources::debugmode::DebugMode;
use crate::resources::randomsource::RandomSource;
use crate::resources::worldtime::WorldTime;
use crate::systems::eventlog::{record_complete_observer, record_progress_observer};

/// Add the goal timer systems to `schedule`, chained in execution order.
pub fn add_goal_timer_systems(schedule: &mut Schedule) {
    schedule.add_systems((init_goal_timers, arm_goal_timers, update_goal_timers).chain());
}

/// Register the trigger, debug toggle and event log observers on `world`.
pub fn register_goal_timer_observers(world: &mut World) {
    world.add_observer(goal_timer_trigger_observer);
    world.add_observer(switch_debug_observer);
    world.add_observer(record_progress_observer);
    world.add_observer(record_complete_observer);
    world.flush();
}

/// Initialize timers added since the last run.
///
/// Draws the first goal and, for active timers, registers an arm
/// `start_delay` seconds from now. Inactive timers stay paused until a
/// trigger event arrives.
pub fn init_goal_timers(
    time: Res<WorldTime>,
    mut rng: ResMut<RandomSource>,
    mut arms: ResMut<ArmSchedule>,
    debug_mode: Option<Res<DebugMode>>,
    mut query: Query<(Entity, &mut GoalTimer), Added<GoalTimer>>,
) {
    for (entity, mut timer) in query.iter_mut() {
        timer.set_goal(&mut rng);
        if timer.active {
            arms.schedule(entity, timer.start_delay, time.frame_count);
        }
        if debug_mode.is_some() || timer.debug {
            debug!(
                "Timer {:?} initialized: time {:.3}, goal {:.3}, start delay {:.3}, active {}",
                entity,
                timer.current_time,
                timer.current_goal,
                timer.start_delay,
                timer.active
            );
        }
    }
}

/// Fire every scheduled arm that is due.
///
/// Pending entries are counted down by the scaled frame delta first.
/// Entries for entities that no longer carry a [`GoalTimer`] are dropped.
pub fn arm_goal_timers(
    time: Res<WorldTime>,
    mut arms: ResMut<ArmSchedule>,
    debug_mode: Option<Res<DebugMode>>,
    mut query: Query<&mut GoalTimer>,
) {
    for entity in arms.take_due(time.delta, time.frame_count) {
        if let Ok(mut timer) = query.get_mut(entity) {
            timer.paused = false;
            if debug_mode.is_some() || timer.debug {
                debug!("Timer {:?} armed", entity);
            }
        }
    }
}

/// Advance every running timer by the frame delta.
///
/// For each unpaused timer:
/// - Moves `current_time` by `delta` (up or down)
/// - Triggers a [`TimerProgressEvent`] with `(current_time, duration)`
/// - If the goal is reached, triggers a [`TimerCompleteEvent`] and then resets
///   or stops the timer according to its policy
pub fn update_goal_timers(
    time: Res<WorldTime>,
    mut rng: ResMut<RandomSource>,
    debug_mode: Option<Res<DebugMode>>,
    mut query: Query<(Entity, &mut GoalTimer)>,
    mut commands: Commands,
) {
    let dt = time.delta; // delta is already scaled
    let force_trace = debug_mode.is_some();

    for (entity, mut timer) in query.iter_mut() {
        if !timer.advance(dt) {
            continue;
        }
        let trace = force_trace || timer.debug;
        if trace {
            debug!(
                "Timer {:?}: {:.3} / {:.3} ({:.0}%)",
                entity,
                timer.current_time,
                timer.target(),
                timer.fraction() * 100.0
            );
        }

        commands.trigger(TimerProgressEvent {
            entity,
            receivers: timer.progress_receivers.clone(),
            current: timer.current_time,
            target: timer.duration,
        });

        if timer.is_complete() {
            if trace {
                debug!("Timer {:?} complete", entity);
            }
            commands.trigger(TimerCompleteEvent {
                entity,
                receivers: timer.complete_receivers.clone(),
            });
            timer.finish_cycle(&mut rng);
        }
    }
}

/// Observer that re-arms timers listening for the event's kind.
///
/// Timers whose filter does not contain the kind, or that the event is not
/// addressed to, are left untouched. Matching timers get a new arm
/// `start_delay` seconds from now; count-down timers also draw a new goal
/// right away. Already pending arms are not cancelled.
pub fn goal_timer_trigger_observer(
    trigger: On<LogicEvent>,
    time: Res<WorldTime>,
    mut rng: ResMut<RandomSource>,
    mut arms: ResMut<ArmSchedule>,
    debug_mode: Option<Res<DebugMode>>,
    mut query: Query<(Entity, &mut GoalTimer)>,
) {
    let event = trigger.event();
    for (entity, mut timer) in query.iter_mut() {
        if !timer.accepts(&event.kind) || !event.is_addressed_to(entity) {
            continue;
        }
        arms.schedule(entity, timer.start_delay, time.frame_count);
        if timer.direction == TimerDirection::CountDown {
            timer.set_goal(&mut rng);
        }
        if debug_mode.is_some() || timer.debug {
            debug!(
                "Timer {:?} triggered by '{}', arming in {:.3}s ({} pending)",
                entity,
                event.kind,
                timer.start_delay,
                arms.pending_for(entity)
            );
        }
    }
}
