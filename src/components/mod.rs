//! ECS components for entities.
//!
//! Submodules overview:
//! - [`goaltimer`] – count-up/count-down timer with a randomized goal
//! - [`group`] – name tag for receiver entities

pub mod goaltimer;
pub mod group;
