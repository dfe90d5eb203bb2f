use std::collections::VecDeque;

use crate::course::ObjectKind;

/// What happened during a race.
#[derive(Debug, Clone, PartialEq)]
pub enum RaceEventKind {
    /// The race left the start screen.
    Started,
    /// The player hit a solid obstacle.
    Crashed {
        /// What was hit.
        obstacle: ObjectKind,
        /// Player lateral position at impact.
        x: f64,
        /// Player downhill distance at impact.
        y: f64,
    },
    /// The player crossed the finish.
    Finished {
        /// Race time in seconds.
        time: f64,
    },
    /// The opponent crossed the finish.
    OpponentFinished {
        /// Race time in seconds.
        time: f64,
    },
    /// The race was restarted on the same course.
    Restarted,
}

/// One logged race event.
#[derive(Debug, Clone)]
pub struct RaceEvent {
    /// Clock tick the event was logged on.
    pub tick: u64,
    /// What happened.
    pub kind: RaceEventKind,
    /// Line shown in the event log.
    pub description: String,
}

impl RaceEvent {
    /// Build an event logged on `tick`.
    pub fn new(tick: u64, kind: RaceEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// The most recent race events, oldest first.
///
/// Holds at most `capacity` events; pushing onto a full log forgets the
/// oldest one.
#[derive(Debug)]
pub struct EventLog {
    events: VecDeque<RaceEvent>,
    capacity: usize,
}

impl EventLog {
    /// An empty log keeping up to `capacity` events (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record `event`.
    pub fn push(&mut self, event: RaceEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Retained events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RaceEvent> {
        self.events.iter()
    }

    /// The most recent event.
    pub fn last(&self) -> Option<&RaceEvent> {
        self.events.back()
    }
}
