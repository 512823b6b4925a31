//! Engine systems.
//!
//! Submodules overview
//! - [`eventlog`] – observers recording timer notifications
//! - [`goaltimer`] – initialize, arm and advance goal timers; react to triggers
//! - [`time`] – update simulation time and delta

pub mod eventlog;
pub mod goaltimer;
pub mod time;
