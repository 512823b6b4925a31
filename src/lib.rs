//! Goal timer library.
//!
//! A reusable countdown / count-up timer component for `bevy_ecs` worlds.
//! The timer starts on creation or on a trigger event, advances once per
//! frame, can jitter its goal randomly, and publishes progress and completion
//! events through observers.
//!
//! # Project Structure
//!
//! - [`components`] – the [`GoalTimer`](components::goaltimer::GoalTimer) component and receiver tags
//! - [`events`] – trigger, progress and completion events
//! - [`resources`] – clock, arm schedule, random source, event log, configuration
//! - [`systems`] – systems and observers that drive the timers
//! - [`simulation`] – headless host running timers frame by frame

pub mod components;
pub mod events;
pub mod resources;
pub mod simulation;
pub mod systems;
