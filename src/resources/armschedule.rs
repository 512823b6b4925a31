//! Delayed arming of goal timers.
//!
//! The [`ArmSchedule`] resource is a list of pending "un-pause this timer"
//! entries. Each entry counts its remaining delay down by the scaled frame
//! delta, so it never depends on the absolute value of
//! [`WorldTime::elapsed`](crate::resources::worldtime::WorldTime).
//! Each trigger or initialization of an active timer pushes one entry; the
//! [`arm_goal_timers`](crate::systems::goaltimer::arm_goal_timers) system
//! fires every entry whose delay has run out.
//!
//! An entry registered during a frame does not consume that frame's delta;
//! counting starts on the next frame.
//!
//! Entries carry no cancellation handle. Two requests for the same timer both
//! stay pending and both fire, so a later entry can un-pause a timer that
//! already stopped after being armed by an earlier one.

use bevy_ecs::prelude::{Entity, Resource};

/// A scheduled arm for a single timer entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingArm {
    /// Timer to un-pause.
    pub entity: Entity,
    /// Seconds of simulation time left before the arm fires.
    pub remaining: f32,
    /// Frame the entry was registered on.
    pub frame: u64,
}

/// Pending timer arms, in registration order.
#[derive(Resource, Debug, Default, Clone)]
pub struct ArmSchedule {
    pending: Vec<PendingArm>,
}

impl ArmSchedule {
    /// Register an arm for `entity` after `delay` seconds, on frame `frame`.
    pub fn schedule(&mut self, entity: Entity, delay: f32, frame: u64) {
        self.pending.push(PendingArm {
            entity,
            remaining: delay,
            frame,
        });
    }

    /// Count every entry down by `dt` and remove and return the entities whose
    /// delay has run out, in registration order. Entries registered on
    /// `frame` itself are not counted down. An entity appears once per due
    /// entry.
    pub fn take_due(&mut self, dt: f32, frame: u64) -> Vec<Entity> {
        let mut due = Vec::new();
        self.pending.retain_mut(|arm| {
            if arm.frame < frame {
                arm.remaining -= dt;
            }
            if arm.remaining <= 0.0 {
                due.push(arm.entity);
                false
            } else {
                true
            }
        });
        due
    }

    /// Number of pending entries for `entity`.
    pub fn pending_for(&self, entity: Entity) -> usize {
        self.pending.iter().filter(|arm| arm.entity == entity).count()
    }

    /// Drop every pending entry for `entity`.
    pub fn forget(&mut self, entity: Entity) {
        self.pending.retain(|arm| arm.entity != entity);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn test_take_due_counts_down_remaining() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut schedule = ArmSchedule::default();
        schedule.schedule(a, 1.0, 0);
        schedule.schedule(b, 2.0, 0);

        assert!(schedule.take_due(0.5, 1).is_empty());
        assert_eq!(schedule.take_due(0.5, 2), vec![a]);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.take_due(5.0, 3), vec![b]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_entry_skips_its_own_frame() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let mut schedule = ArmSchedule::default();
        schedule.schedule(a, 0.25, 4);

        assert!(schedule.take_due(0.25, 4).is_empty());
        assert_eq!(schedule.take_due(0.25, 5), vec![a]);
    }

    #[test]
    fn test_overlapping_requests_are_kept() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let mut schedule = ArmSchedule::default();
        schedule.schedule(a, 1.0, 0);
        schedule.schedule(a, 1.5, 0);
        assert_eq!(schedule.pending_for(a), 2);

        assert_eq!(schedule.take_due(1.0, 1), vec![a]);
        assert_eq!(schedule.pending_for(a), 1);
        assert_eq!(schedule.take_due(0.5, 2), vec![a]);
    }

    #[test]
    fn test_zero_delay_is_due_on_its_frame() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let mut schedule = ArmSchedule::default();
        schedule.schedule(a, 0.0, 3);
        assert_eq!(schedule.take_due(0.25, 3), vec![a]);
    }

    #[test]
    fn test_forget_drops_entries() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut schedule = ArmSchedule::default();
        schedule.schedule(a, 1.0, 0);
        schedule.schedule(b, 1.0, 0);
        schedule.schedule(a, 2.0, 0);
        schedule.forget(a);
        assert_eq!(schedule.pending_for(a), 0);
        assert_eq!(schedule.len(), 1);
    }
}
