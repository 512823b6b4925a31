//! Event types and observers used by the timer.
//!
//! Events provide the bus the timer talks through: it listens for trigger
//! events and publishes progress and completion notifications, without
//! knowing who sends or receives them.
//!
//! Submodules:
//! - [`goaltimer`] – progress and completion notifications from goal timers
//! - [`logic`] – named trigger events that re-arm timers
//! - [`switchdebug`] – toggle timer tracing on/off
pub mod goaltimer;
pub mod logic;
pub mod switchdebug;
