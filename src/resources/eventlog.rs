//! Recorded timer bus traffic.
//!
//! The [`EventLog`] resource collects an [`EventRecord`] for every progress and
//! completion event, tagged with the frame it happened on. The headless
//! runner prints it after a run (as JSON lines with `--json`), and tests use
//! it to check what a timer published.

use std::fmt;

use bevy_ecs::prelude::{Entity, Resource};
use serde::Serialize;

/// One recorded timer notification. Entities are stored as their raw bits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    Progress {
        frame: u64,
        timer: u64,
        receivers: Vec<u64>,
        current: f32,
        target: f32,
    },
    Complete {
        frame: u64,
        timer: u64,
        receivers: Vec<u64>,
    },
}

impl EventRecord {
    pub fn timer(&self) -> u64 {
        match self {
            EventRecord::Progress { timer, .. } | EventRecord::Complete { timer, .. } => *timer,
        }
    }

    pub fn frame(&self) -> u64 {
        match self {
            EventRecord::Progress { frame, .. } | EventRecord::Complete { frame, .. } => *frame,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, EventRecord::Complete { .. })
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventRecord::Progress {
                frame,
                timer,
                current,
                target,
                ..
            } => write!(f, "[{frame:>6}] timer {timer} progress {current:.3}/{target:.3}"),
            EventRecord::Complete {
                frame,
                timer,
                receivers,
            } => write!(
                f,
                "[{frame:>6}] timer {timer} complete -> {} receiver(s)",
                receivers.len()
            ),
        }
    }
}

/// Every timer notification seen so far, in emission order.
#[derive(Resource, Debug, Default, Clone)]
pub struct EventLog {
    pub records: Vec<EventRecord>,
}

impl EventLog {
    pub fn push(&mut self, record: EventRecord) {
        self.records.push(record);
    }

    /// Records emitted by `timer`.
    pub fn for_timer(&self, timer: Entity) -> impl Iterator<Item = &EventRecord> {
        let bits = timer.to_bits();
        self.records.iter().filter(move |r| r.timer() == bits)
    }

    /// Number of completion events emitted by `timer`.
    pub fn completions(&self, timer: Entity) -> usize {
        self.for_timer(timer).filter(|r| r.is_complete()).count()
    }

    /// Number of progress events emitted by `timer`.
    pub fn progress_count(&self, timer: Entity) -> usize {
        self.for_timer(timer).filter(|r| !r.is_complete()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_tag() {
        let record = EventRecord::Complete {
            frame: 3,
            timer: 7,
            receivers: vec![1, 2],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"event":"complete","frame":3,"timer":7,"receivers":[1,2]}"#
        );
    }

    #[test]
    fn test_display_progress() {
        let record = EventRecord::Progress {
            frame: 12,
            timer: 4,
            receivers: vec![],
            current: 0.5,
            target: 2.0,
        };
        assert_eq!(record.to_string(), "[    12] timer 4 progress 0.500/2.000");
    }
}
