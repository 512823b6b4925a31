//! Goal timer component.
//!
//! The [`GoalTimer`] component counts up toward (or down from) a goal that may
//! be jittered by a random variance every cycle. While it runs it reports its
//! progress every frame and signals once the goal is reached.
//!
//! # How It Works
//!
//! 1. Entity is spawned with a `GoalTimer`
//! 2. [`init_goal_timers`](crate::systems::goaltimer::init_goal_timers) computes
//!    the first goal and, if the timer is active, schedules its arming after
//!    `start_delay` in the [`ArmSchedule`](crate::resources::armschedule::ArmSchedule)
//! 3. [`update_goal_timers`](crate::systems::goaltimer::update_goal_timers) runs
//!    each frame on unpaused timers:
//!    - Advances `current_time` by the frame delta (sign depends on direction)
//!    - Emits a [`TimerProgressEvent`](crate::events::goaltimer::TimerProgressEvent)
//!    - On reaching the goal emits a [`TimerCompleteEvent`](crate::events::goaltimer::TimerCompleteEvent)
//!      and either resets (new goal, keeps running) or stops (pauses)
//! 4. A [`LogicEvent`](crate::events::logic::LogicEvent) whose kind is in the
//!    timer's `trigger_filter` schedules another arm after `start_delay`
//!
//! # Example
//!
//! ```ignore
//! world.spawn(
//!     GoalTimer::new(2.0)
//!         .with_variance(0.5)
//!         .with_policy(CompletionPolicy::Stop)
//!         .triggered_by("restart")
//!         .complete_to(hud),
//! );
//! ```
//!
//! # Related
//!
//! - [`crate::systems::goaltimer`] – systems and observer that drive the timer
//! - [`crate::events::goaltimer`] – progress and completion events

use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::resources::randomsource::RandomSource;

/// Set of entities an event is addressed to.
pub type Receivers = SmallVec<[Entity; 4]>;

/// What the timer does after reaching its goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Start a new cycle right away with a freshly jittered goal.
    #[default]
    Reset,
    /// Pause until a trigger event re-arms the timer.
    Stop,
}

/// Which way `current_time` moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimerDirection {
    /// `current_time` grows from 0 toward `current_goal`.
    #[default]
    CountUp,
    /// `current_time` starts at the goal and shrinks toward 0.
    CountDown,
}

impl FromStr for CompletionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(CompletionPolicy::Reset),
            "stop" => Ok(CompletionPolicy::Stop),
            other => Err(format!("Unknown completion policy '{}'", other)),
        }
    }
}

impl FromStr for TimerDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "count_up" | "up" => Ok(TimerDirection::CountUp),
            "count_down" | "down" => Ok(TimerDirection::CountDown),
            other => Err(format!("Unknown timer direction '{}'", other)),
        }
    }
}

/// Countdown / count-up timer with a randomized goal.
///
/// Values are in seconds of (scaled) simulation time. Negative `duration` or
/// `variance` are accepted as-is; they only lead to degenerate cycles.
#[derive(Component, Clone)]
pub struct GoalTimer {
    /// Whether the timer arms itself on initialization.
    pub active: bool,
    /// Behavior on reaching the goal.
    pub policy: CompletionPolicy,
    /// Counting direction.
    pub direction: TimerDirection,
    /// Nominal goal time.
    pub duration: f32,
    /// Symmetric random jitter applied to `duration` each cycle.
    pub variance: f32,
    /// Delay between an arm request and the timer starting to tick.
    pub start_delay: f32,
    /// Running value. Moves toward the goal when counting up, toward 0 when counting down.
    pub current_time: f32,
    /// Jittered goal of the current cycle. Only used when counting up.
    pub current_goal: f32,
    /// True while waiting for an arm, or after a stop.
    pub paused: bool,
    /// Event kinds that re-arm the timer.
    pub trigger_filter: FxHashSet<String>,
    /// Receivers of progress events.
    pub progress_receivers: Receivers,
    /// Receivers of the completion event.
    pub complete_receivers: Receivers,
    /// Emit trace logs on every tick and on completion.
    pub debug: bool,
}

impl GoalTimer {
    /// Create an active, resetting, count-up timer with no jitter or delay.
    pub fn new(duration: f32) -> Self {
        GoalTimer {
            active: true,
            policy: CompletionPolicy::Reset,
            direction: TimerDirection::CountUp,
            duration,
            variance: 0.0,
            start_delay: 0.0,
            current_time: 0.0,
            current_goal: duration,
            paused: true,
            trigger_filter: FxHashSet::default(),
            progress_receivers: Receivers::new(),
            complete_receivers: Receivers::new(),
            debug: false,
        }
    }

    pub fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_direction(mut self, direction: TimerDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_variance(mut self, variance: f32) -> Self {
        self.variance = variance;
        self
    }

    pub fn with_start_delay(mut self, start_delay: f32) -> Self {
        self.start_delay = start_delay;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Add an event kind that re-arms this timer (builder pattern).
    pub fn triggered_by(mut self, kind: impl Into<String>) -> Self {
        self.trigger_filter.insert(kind.into());
        self
    }

    /// Add a receiver of progress events (builder pattern).
    pub fn progress_to(mut self, receiver: Entity) -> Self {
        self.progress_receivers.push(receiver);
        self
    }

    /// Add a receiver of the completion event (builder pattern).
    pub fn complete_to(mut self, receiver: Entity) -> Self {
        self.complete_receivers.push(receiver);
        self
    }

    /// Whether an event of this kind re-arms the timer.
    pub fn accepts(&self, kind: &str) -> bool {
        self.trigger_filter.contains(kind)
    }

    /// Draw a new goal for the coming cycle.
    ///
    /// Counting up stores it in `current_goal`; counting down loads it
    /// straight into `current_time`.
    pub fn set_goal(&mut self, rng: &mut RandomSource) {
        let goal = self.duration + rng.range(-self.variance, self.variance);
        match self.direction {
            TimerDirection::CountUp => self.current_goal = goal,
            TimerDirection::CountDown => self.current_time = goal,
        }
    }

    /// Move `current_time` by one frame. Does nothing while paused.
    ///
    /// Returns `true` if the timer actually advanced.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.paused {
            return false;
        }
        match self.direction {
            TimerDirection::CountUp => self.current_time += dt,
            TimerDirection::CountDown => self.current_time -= dt,
        }
        true
    }

    /// Whether the current cycle has reached its goal.
    pub fn is_complete(&self) -> bool {
        match self.direction {
            TimerDirection::CountUp => self.current_time >= self.current_goal,
            TimerDirection::CountDown => self.current_time <= 0.0,
        }
    }

    /// Apply the completion policy after the goal was reached.
    pub fn finish_cycle(&mut self, rng: &mut RandomSource) {
        match self.policy {
            CompletionPolicy::Reset => {
                self.current_time = 0.0;
                self.set_goal(rng);
            }
            CompletionPolicy::Stop => self.paused = true,
        }
    }

    /// Value `current_time` is moving toward.
    pub fn target(&self) -> f32 {
        match self.direction {
            TimerDirection::CountUp => self.current_goal,
            TimerDirection::CountDown => 0.0,
        }
    }

    /// Progress of the current cycle in `0.0..=1.0`, measured against `duration`.
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let done = match self.direction {
            TimerDirection::CountUp => self.current_time,
            TimerDirection::CountDown => self.duration - self.current_time,
        };
        (done / self.duration).clamp(0.0, 1.0)
    }
}

impl fmt::Debug for GoalTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalTimer")
            .field("active", &self.active)
            .field("policy", &self.policy)
            .field("direction", &self.direction)
            .field("duration", &self.duration)
            .field("variance", &self.variance)
            .field("start_delay", &self.start_delay)
            .field("current_time", &self.current_time)
            .field("current_goal", &self.current_goal)
            .field("paused", &self.paused)
            .field("trigger_filter", &self.trigger_filter.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn running(timer: GoalTimer) -> GoalTimer {
        GoalTimer {
            paused: false,
            ..timer
        }
    }

    #[test]
    fn test_new_defaults() {
        let t = GoalTimer::new(2.0);
        assert!(t.active);
        assert!(t.paused);
        assert_eq!(t.policy, CompletionPolicy::Reset);
        assert_eq!(t.direction, TimerDirection::CountUp);
        assert!(approx_eq(t.current_time, 0.0));
        assert!(approx_eq(t.current_goal, 2.0));
        assert!(t.trigger_filter.is_empty());
    }

    #[test]
    fn test_advance_is_noop_while_paused() {
        let mut t = GoalTimer::new(1.0);
        assert!(!t.advance(0.5));
        assert!(approx_eq(t.current_time, 0.0));
    }

    #[test]
    fn test_count_up_completes_at_goal() {
        let mut t = running(GoalTimer::new(1.0));
        for _ in 0..3 {
            t.advance(0.25);
            assert!(!t.is_complete());
        }
        t.advance(0.25);
        assert!(t.is_complete());
    }

    #[test]
    fn test_count_down_completes_at_zero() {
        let mut rng = RandomSource::with_seed(1);
        let mut t = running(GoalTimer::new(1.0).with_direction(TimerDirection::CountDown));
        t.set_goal(&mut rng);
        assert!(approx_eq(t.current_time, 1.0));
        t.advance(0.5);
        assert!(!t.is_complete());
        t.advance(0.5);
        assert!(t.is_complete());
        assert!(t.current_time <= 0.0);
    }

    #[test]
    fn test_finish_cycle_reset_rearms_immediately() {
        let mut rng = RandomSource::with_seed(7);
        let mut t = running(GoalTimer::new(0.5));
        t.advance(0.5);
        t.finish_cycle(&mut rng);
        assert!(!t.paused);
        assert!(approx_eq(t.current_time, 0.0));
        assert!(approx_eq(t.current_goal, 0.5));
    }

    #[test]
    fn test_finish_cycle_stop_pauses() {
        let mut rng = RandomSource::with_seed(7);
        let mut t = running(GoalTimer::new(0.5).with_policy(CompletionPolicy::Stop));
        t.advance(0.5);
        t.finish_cycle(&mut rng);
        assert!(t.paused);
        assert!(approx_eq(t.current_time, 0.5));
        assert!(!t.advance(0.5));
    }

    #[test]
    fn test_set_goal_stays_within_variance() {
        let mut rng = RandomSource::with_seed(42);
        let mut t = GoalTimer::new(3.0).with_variance(0.75);
        for _ in 0..500 {
            t.set_goal(&mut rng);
            assert!(t.current_goal >= 3.0 - 0.75);
            assert!(t.current_goal <= 3.0 + 0.75);
        }
    }

    #[test]
    fn test_negative_duration_completes_immediately() {
        let mut t = running(GoalTimer::new(-1.0));
        t.advance(0.0);
        assert!(t.is_complete());
    }

    #[test]
    fn test_accepts_only_filtered_kinds() {
        let t = GoalTimer::new(1.0).triggered_by("restart");
        assert!(t.accepts("restart"));
        assert!(!t.accepts("level_start"));
    }

    #[test]
    fn test_fraction() {
        let mut t = running(GoalTimer::new(2.0));
        t.advance(0.5);
        assert!(approx_eq(t.fraction(), 0.25));

        let mut d = running(GoalTimer::new(2.0).with_direction(TimerDirection::CountDown));
        d.current_time = 2.0;
        d.advance(1.5);
        assert!(approx_eq(d.fraction(), 0.75));
        assert!(approx_eq(d.target(), 0.0));
    }

    #[test]
    fn test_policy_and_direction_from_str() {
        assert_eq!("Stop".parse::<CompletionPolicy>(), Ok(CompletionPolicy::Stop));
        assert_eq!(" reset ".parse::<CompletionPolicy>(), Ok(CompletionPolicy::Reset));
        assert!("pause".parse::<CompletionPolicy>().is_err());
        assert_eq!(
            "count_down".parse::<TimerDirection>(),
            Ok(TimerDirection::CountDown)
        );
        assert_eq!("up".parse::<TimerDirection>(), Ok(TimerDirection::CountUp));
        assert!("sideways".parse::<TimerDirection>().is_err());
    }
}
