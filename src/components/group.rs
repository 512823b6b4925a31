//! Name tag for entities that receive timer events.
//!
//! Receivers are referred to by name in configuration files; the
//! [`Simulation`](crate::simulation::Simulation) resolves each name to a
//! single entity tagged with a [`Group`].

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group(pub String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Group(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}
