//! Goal timer notifications.
//!
//! [`update_goal_timers`](crate::systems::goaltimer::update_goal_timers)
//! triggers a [`TimerProgressEvent`] on every tick of a running timer and a
//! [`TimerCompleteEvent`] when the timer reaches its goal. Both carry the
//! receiver set configured on the timer; observers decide what to do with it.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<TimerProgressEvent>, mut bars: Query<&mut ProgressBar>| {
//!     let event = trigger.event();
//!     for receiver in &event.receivers {
//!         if let Ok(mut bar) = bars.get_mut(*receiver) {
//!             bar.set(event.current / event.target);
//!         }
//!     }
//! });
//! ```
//!
//! # Related
//!
//! - [`crate::components::goaltimer::GoalTimer`] – the timer component
//! - [`crate::systems::eventlog`] – observers that record these events

use bevy_ecs::prelude::*;

use crate::components::goaltimer::Receivers;

/// Emitted once per tick while a timer runs.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TimerProgressEvent {
    /// The timer entity.
    pub entity: Entity,
    /// Configured progress receivers.
    pub receivers: Receivers,
    /// Timer value after this tick.
    pub current: f32,
    /// Nominal duration of the timer.
    pub target: f32,
}

/// Emitted when a timer reaches its goal.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TimerCompleteEvent {
    /// The timer entity.
    pub entity: Entity,
    /// Configured completion receivers.
    pub receivers: Receivers,
}
