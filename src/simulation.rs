//! Headless simulation host.
//!
//! [`Simulation`] plays the role of the engine around the timers: it owns the
//! ECS world and the per-frame schedule, advances the clock, and delivers
//! trigger events. It is what the `goaltimer` binary drives from a
//! [`SimConfig`], and what integration tests use to run timers frame by frame.
//!
//! # Frame Flow
//!
//! 1. Scripted trigger events whose time has come are sent
//! 2. [`update_world_time`] advances the clock by the scaled delta
//! 3. The schedule runs the goal timer systems (init, arm, update)
//! 4. Progress/completion observers record into the [`EventLog`]

use bevy_ecs::prelude::*;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::components::goaltimer::GoalTimer;
use crate::components::group::Group;
use crate::events::logic::LogicEvent;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::armschedule::ArmSchedule;
use crate::resources::eventlog::{EventLog, EventRecord};
use crate::resources::randomsource::RandomSource;
use crate::resources::simconfig::{ScriptedEvent, SimConfig};
use crate::resources::worldtime::WorldTime;
use crate::systems::goaltimer::{add_goal_timer_systems, register_goal_timer_observers};
use crate::systems::time::update_world_time;

/// ECS world plus the schedule that runs goal timers each frame.
pub struct Simulation {
    pub world: World,
    update: Schedule,
    receivers: FxHashMap<String, Entity>,
    timers: FxHashMap<String, Entity>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(RandomSource::default())
    }
}

impl Simulation {
    /// Build a world with the timer resources, observers and schedule.
    pub fn new(rng: RandomSource) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(ArmSchedule::default());
        world.insert_resource(EventLog::default());
        world.insert_resource(rng);
        register_goal_timer_observers(&mut world);

        let mut update = Schedule::default();
        add_goal_timer_systems(&mut update);

        Simulation {
            world,
            update,
            receivers: FxHashMap::default(),
            timers: FxHashMap::default(),
        }
    }

    /// Deterministic simulation for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(RandomSource::with_seed(seed))
    }

    /// Build a simulation and spawn every timer declared in `config`.
    pub fn from_config(config: &SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => RandomSource::with_seed(seed),
            None => RandomSource::default(),
        };
        let mut sim = Self::new(rng);
        sim.world.resource_mut::<WorldTime>().time_scale = config.time_scale;

        for spec in &config.timers {
            let mut timer = spec.to_timer();
            for name in &spec.progress_to {
                timer = timer.progress_to(sim.receiver(name));
            }
            for name in &spec.complete_to {
                timer = timer.complete_to(sim.receiver(name));
            }
            let entity = sim.spawn_timer(timer);
            if sim.timers.insert(spec.name.clone(), entity).is_some() {
                warn!("Timer '{}' declared twice, keeping the last one", spec.name);
            }
            info!("Spawned timer '{}' as {:?}", spec.name, entity);
        }
        sim
    }

    /// Spawn a timer entity. It is initialized on the next step.
    pub fn spawn_timer(&mut self, timer: GoalTimer) -> Entity {
        self.world.spawn(timer).id()
    }

    /// Despawn a timer and drop its pending arms.
    pub fn despawn_timer(&mut self, entity: Entity) {
        self.world.resource_mut::<ArmSchedule>().forget(entity);
        if self.world.despawn(entity) {
            self.timers.retain(|_, e| *e != entity);
        }
    }

    /// Entity of the receiver called `name`, spawned on first use.
    pub fn receiver(&mut self, name: &str) -> Entity {
        if let Some(entity) = self.receivers.get(name) {
            return *entity;
        }
        let entity = self.world.spawn(Group::new(name)).id();
        self.receivers.insert(name.to_string(), entity);
        entity
    }

    /// Entity of the timer spawned from the config section `name`.
    pub fn timer(&self, name: &str) -> Option<Entity> {
        self.timers.get(name).copied()
    }

    /// Deliver a trigger event to every listening timer.
    pub fn send(&mut self, event: LogicEvent) {
        self.world.trigger(event);
        self.world.flush();
    }

    /// Flip trace logging for all timers.
    pub fn toggle_debug(&mut self) {
        self.world.trigger(SwitchDebugEvent {});
        self.world.flush();
    }

    /// Advance one frame by the unscaled delta `dt`.
    pub fn step(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.update.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Run `frames` frames at fixed `dt`, sending scripted events when the
    /// clock reaches them. `script` must be sorted by time.
    pub fn run(&mut self, frames: u32, dt: f32, script: &[ScriptedEvent]) {
        let mut next = 0;
        for _ in 0..frames {
            let now = self.elapsed();
            while next < script.len() && script[next].at <= now {
                info!("t={:.3}: sending '{}'", now, script[next].kind);
                self.send(LogicEvent::new(script[next].kind.clone()));
                next += 1;
            }
            self.step(dt);
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.world.resource::<WorldTime>().elapsed
    }

    pub fn get(&self, entity: Entity) -> Option<&GoalTimer> {
        self.world.get::<GoalTimer>(entity)
    }

    pub fn event_log(&self) -> &EventLog {
        self.world.resource::<EventLog>()
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.event_log().records
    }

    pub fn pending_arms(&self, entity: Entity) -> usize {
        self.world.resource::<ArmSchedule>().pending_for(entity)
    }
}
