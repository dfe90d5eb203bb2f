use std::collections::HashSet;

use crate::actor::ActorState;
use crate::course::Course;

/// A control key recognized by the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Steer toward `x = 0`.
    Left,
    /// Steer toward `x = 100`.
    Right,
    /// Crouch for speed.
    Tuck,
}

/// Control flags sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    /// Steer-left held.
    pub steer_left: bool,
    /// Steer-right held.
    pub steer_right: bool,
    /// Tuck held.
    pub tuck: bool,
}

impl InputState {
    /// No keys held.
    pub const NONE: Self = Self {
        steer_left: false,
        steer_right: false,
        tuck: false,
    };

    /// Only steer-left held.
    pub fn left() -> Self {
        Self {
            steer_left: true,
            ..Self::NONE
        }
    }

    /// Only steer-right held.
    pub fn right() -> Self {
        Self {
            steer_right: true,
            ..Self::NONE
        }
    }

    /// Add the tuck flag.
    pub fn tucked(mut self) -> Self {
        self.tuck = true;
        self
    }
}

/// Anything that can report the held controls for the next tick.
pub trait InputSource {
    /// Sample the controls for one tick.
    fn poll(&mut self, player: &ActorState, course: &Course) -> InputState;
}

/// A fixed input repeated every tick.
impl InputSource for InputState {
    fn poll(&mut self, _player: &ActorState, _course: &Course) -> InputState {
        *self
    }
}

/// Keys currently held, fed by key-down and key-up events.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<Key>,
}

impl HeldKeys {
    /// Nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down.
    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    /// Record a key-up.
    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Whether `key` is down.
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Snapshot the held keys as control flags.
    pub fn state(&self) -> InputState {
        InputState {
            steer_left: self.is_held(Key::Left),
            steer_right: self.is_held(Key::Right),
            tuck: self.is_held(Key::Tuck),
        }
    }
}

impl InputSource for HeldKeys {
    fn poll(&mut self, _player: &ActorState, _course: &Course) -> InputState {
        self.state()
    }
}
