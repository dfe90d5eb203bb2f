use crate::actor::ActorState;
use crate::config::PhysicsConfig;
use crate::course::Course;
use crate::input::{InputSource, InputState};

/// A simple input source that steers for the nearest free lane of the
/// next solid obstacle row. Used for headless runs.
#[derive(Debug, Clone)]
pub struct Autopilot {
    physics: PhysicsConfig,
    lookahead: f64,
    anticipation: f64,
    deadband: f64,
    tuck: bool,
}

impl Autopilot {
    /// An autopilot for a player with the given handling.
    pub fn new(physics: PhysicsConfig) -> Self {
        Self {
            physics,
            lookahead: 400.0,
            anticipation: 8.0,
            deadband: 0.5,
            tuck: false,
        }
    }

    /// Tuck whenever nothing solid is within the lookahead.
    pub fn with_tuck(mut self, tuck: bool) -> Self {
        self.tuck = tuck;
        self
    }

    /// Downhill distance scanned for obstacles.
    pub fn with_lookahead(mut self, lookahead: f64) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Lateral position the autopilot is aiming for, if an obstacle is ahead.
    pub fn target_x(&self, player: &ActorState, course: &Course) -> Option<f64> {
        let ahead = course.objects().iter().find(|o| {
            o.kind.is_solid()
                && o.y + o.height / 2.0 >= player.y
                && o.y - o.height / 2.0 <= player.y + self.lookahead
        })?;

        course
            .free_lanes_at(ahead.y, &self.physics)
            .into_iter()
            .map(|(lo, hi)| {
                let margin = ((hi - lo) / 2.0).min(1.5);
                player.x.clamp(lo + margin, hi - margin)
            })
            .min_by(|a, b| (a - player.x).abs().total_cmp(&(b - player.x).abs()))
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, player: &ActorState, course: &Course) -> InputState {
        let target = self.target_x(player, course);
        let Some(target) = target else {
            return InputState {
                tuck: self.tuck,
                ..InputState::NONE
            };
        };
        let predicted = player.x + player.speed_x * self.anticipation;
        let error = target - predicted;
        InputState {
            steer_left: error < -self.deadband,
            steer_right: error > self.deadband,
            tuck: false,
        }
    }
}
