//! Generic trigger events.
//!
//! A [`LogicEvent`] is the bus message other components (or the host) send to
//! restart logic components. A [`GoalTimer`](crate::components::goaltimer::GoalTimer)
//! re-arms when the event's `kind` is in its `trigger_filter` and the event is
//! addressed to it.
//!
//! # Example
//!
//! ```ignore
//! // Broadcast to every timer listening for "restart"
//! world.trigger(LogicEvent::new("restart"));
//!
//! // Only the given timer
//! commands.trigger(LogicEvent::new("restart").to(timer_entity));
//! ```

use bevy_ecs::prelude::*;

use crate::components::goaltimer::Receivers;

/// Named trigger event delivered through observers.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LogicEvent {
    /// Event kind matched against subscription filters.
    pub kind: String,
    /// Entities this event is addressed to. Empty means broadcast.
    pub receivers: Receivers,
}

impl LogicEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        LogicEvent {
            kind: kind.into(),
            receivers: Receivers::new(),
        }
    }

    /// Address the event to `receiver` (builder pattern).
    pub fn to(mut self, receiver: Entity) -> Self {
        self.receivers.push(receiver);
        self
    }

    /// Whether `entity` should see this event.
    pub fn is_addressed_to(&self, entity: Entity) -> bool {
        self.receivers.is_empty() || self.receivers.contains(&entity)
    }
}
