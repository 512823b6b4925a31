//! Simulation configuration resource.
//!
//! Describes a headless run: frame count, fixed delta, time scale, RNG seed,
//! the timers to spawn and a script of trigger events. Loaded from an INI
//! file; every value has a safe default.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! frames = 600
//! delta = 0.016
//! time_scale = 1.0
//! seed = 42
//!
//! [script]
//! events = restart@2.5, level_start@5.0
//!
//! [timer.spawner]
//! active = true
//! policy = reset
//! direction = count_up
//! duration = 2.0
//! variance = 0.5
//! start_delay = 1.0
//! trigger_on = restart, level_start
//! progress_to = hud
//! complete_to = hud, spawner_sink
//! debug = false
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::goaltimer::{CompletionPolicy, GoalTimer, TimerDirection};

/// Default safe values for startup
const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_DELTA: f32 = 1.0 / 60.0;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./timers.ini";
const TIMER_SECTION_PREFIX: &str = "timer.";

/// Timer declaration from a `[timer.<name>]` section.
///
/// Receivers and triggers are names; the
/// [`Simulation`](crate::simulation::Simulation) resolves receiver names to
/// entities when spawning.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSpec {
    pub name: String,
    pub active: bool,
    pub policy: CompletionPolicy,
    pub direction: TimerDirection,
    pub duration: f32,
    pub variance: f32,
    pub start_delay: f32,
    pub trigger_on: Vec<String>,
    pub progress_to: Vec<String>,
    pub complete_to: Vec<String>,
    pub debug: bool,
}

impl TimerSpec {
    pub fn new(name: impl Into<String>) -> Self {
        TimerSpec {
            name: name.into(),
            active: true,
            policy: CompletionPolicy::Reset,
            direction: TimerDirection::CountUp,
            duration: 1.0,
            variance: 0.0,
            start_delay: 0.0,
            trigger_on: Vec::new(),
            progress_to: Vec::new(),
            complete_to: Vec::new(),
            debug: false,
        }
    }

    /// Build the component, without receivers (they need entities).
    pub fn to_timer(&self) -> GoalTimer {
        let mut timer = GoalTimer::new(self.duration)
            .with_active(self.active)
            .with_policy(self.policy)
            .with_direction(self.direction)
            .with_variance(self.variance)
            .with_start_delay(self.start_delay)
            .with_debug(self.debug);
        for kind in &self.trigger_on {
            timer = timer.triggered_by(kind.clone());
        }
        timer
    }
}

/// A trigger event the runner sends once simulation time reaches `at`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedEvent {
    pub kind: String,
    pub at: f32,
}

/// Headless simulation configuration.
#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    /// Number of frames to run.
    pub frames: u32,
    /// Unscaled frame delta in seconds.
    pub delta: f32,
    /// Multiplier applied to `delta`.
    pub time_scale: f32,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Timers to spawn, sorted by name.
    pub timers: Vec<TimerSpec>,
    /// Trigger events to inject, sorted by time.
    pub script: Vec<ScriptedEvent>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            delta: DEFAULT_DELTA,
            time_scale: DEFAULT_TIME_SCALE,
            seed: None,
            timers: Vec::new(),
            script: Vec::new(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config)?;
        info!(
            "Loaded config from {:?}: {} timer(s), {} scripted event(s), {} frames at {}s",
            self.config_path,
            self.timers.len(),
            self.script.len(),
            self.frames,
            self.delta
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), String> {
        // [simulation] section
        if let Some(frames) = config.getuint("simulation", "frames")? {
            self.frames = u32::try_from(frames)
                .map_err(|_| format!("[simulation] frames {} is out of range", frames))?;
        }
        if let Some(delta) = config.getfloat("simulation", "delta")? {
            self.delta = delta as f32;
        }
        if let Some(scale) = config.getfloat("simulation", "time_scale")? {
            self.time_scale = scale as f32;
        }
        if let Some(seed) = config.getuint("simulation", "seed")? {
            self.seed = Some(seed);
        }

        // [script] section
        if let Some(events) = config.get("script", "events") {
            self.script = parse_script(&events)?;
        }

        // [timer.*] sections
        let mut names: Vec<String> = config
            .sections()
            .into_iter()
            .filter(|s| s.starts_with(TIMER_SECTION_PREFIX))
            .collect();
        names.sort();
        let mut timers = Vec::with_capacity(names.len());
        for section in names {
            timers.push(parse_timer(config, &section)?);
        }
        if !timers.is_empty() {
            self.timers = timers;
        }
        Ok(())
    }

    /// Save the `[simulation]` section to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("simulation", "frames", Some(self.frames.to_string()));
        config.set("simulation", "delta", Some(self.delta.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));
        if let Some(seed) = self.seed {
            config.set("simulation", "seed", Some(seed.to_string()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

fn parse_timer(config: &Ini, section: &str) -> Result<TimerSpec, String> {
    let name = &section[TIMER_SECTION_PREFIX.len()..];
    if name.is_empty() {
        return Err(format!("Timer section '{}' has no name", section));
    }
    let mut spec = TimerSpec::new(name);

    if let Some(active) = config.getbool(section, "active")? {
        spec.active = active;
    }
    if let Some(policy) = config.get(section, "policy") {
        spec.policy = policy
            .parse::<CompletionPolicy>()
            .map_err(|e| format!("[{}] {}", section, e))?;
    }
    if let Some(direction) = config.get(section, "direction") {
        spec.direction = direction
            .parse::<TimerDirection>()
            .map_err(|e| format!("[{}] {}", section, e))?;
    }
    if let Some(duration) = config.getfloat(section, "duration")? {
        spec.duration = duration as f32;
    }
    if let Some(variance) = config.getfloat(section, "variance")? {
        spec.variance = variance as f32;
    }
    if let Some(delay) = config.getfloat(section, "start_delay")? {
        spec.start_delay = delay as f32;
    }
    if let Some(list) = config.get(section, "trigger_on") {
        spec.trigger_on = split_list(&list);
    }
    if let Some(list) = config.get(section, "progress_to") {
        spec.progress_to = split_list(&list);
    }
    if let Some(list) = config.get(section, "complete_to") {
        spec.complete_to = split_list(&list);
    }
    if let Some(debug) = config.getbool(section, "debug")? {
        spec.debug = debug;
    }
    Ok(spec)
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `kind@time` entries separated by commas.
fn parse_script(list: &str) -> Result<Vec<ScriptedEvent>, String> {
    let mut script = Vec::new();
    for entry in split_list(list) {
        let (kind, at) = entry
            .split_once('@')
            .ok_or_else(|| format!("Scripted event '{}' is not of the form kind@time", entry))?;
        let at: f32 = at
            .trim()
            .parse()
            .map_err(|e| format!("Scripted event '{}' has a bad time: {}", entry, e))?;
        script.push(ScriptedEvent {
            kind: kind.trim().to_string(),
            at,
        });
    }
    script.sort_by(|a, b| a.at.total_cmp(&b.at));
    Ok(script)
}
