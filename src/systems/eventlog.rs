//! Observers that record timer notifications into the
//! [`EventLog`](crate::resources::eventlog::EventLog).
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::events::goaltimer::{TimerCompleteEvent, TimerProgressEvent};
use crate::resources::eventlog::{EventLog, EventRecord};
use crate::resources::worldtime::WorldTime;

pub fn record_progress_observer(
    trigger: On<TimerProgressEvent>,
    time: Res<WorldTime>,
    mut log: ResMut<EventLog>,
) {
    let event = trigger.event();
    log.push(EventRecord::Progress {
        frame: time.frame_count,
        timer: event.entity.to_bits(),
        receivers: event.receivers.iter().map(|e| e.to_bits()).collect(),
        current: event.current,
        target: event.target,
    });
}

pub fn record_complete_observer(
    trigger: On<TimerCompleteEvent>,
    time: Res<WorldTime>,
    mut log: ResMut<EventLog>,
) {
    let event = trigger.event();
    log.push(EventRecord::Complete {
        frame: time.frame_count,
        timer: event.entity.to_bits(),
        receivers: event.receivers.iter().map(|e| e.to_bits()).collect(),
    });
}
