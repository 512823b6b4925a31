//! ECS resources made available to systems.
//!
//! Overview
//! - `armschedule` – pending delayed arms keyed to simulation time
//! - `debugmode` – presence forces timer trace logs on
//! - `eventlog` – recorded progress and completion events
//! - `randomsource` – shared RNG for goal jitter
//! - `simconfig` – INI configuration of a headless run
//! - `worldtime` – simulation time and delta
pub mod armschedule;
pub mod debugmode;
pub mod eventlog;
pub mod randomsource;
pub mod simconfig;
pub mod worldtime;
