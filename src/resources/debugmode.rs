//! Debug toggle resource.
//!
//! The mere presence of this resource forces trace logging on for every
//! [`GoalTimer`](crate::components::goaltimer::GoalTimer), regardless of its
//! own `debug` flag. Remove it to fall back to the per-timer setting.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, timer systems log a trace line per tick.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
