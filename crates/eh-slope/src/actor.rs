use serde::{Deserialize, Serialize};

/// Position and motion of one skier.
///
/// `x` is percent of track width, `y` is downhill distance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActorState {
    /// Lateral position in `[0, 100]`.
    pub x: f64,
    /// Downhill distance from the start.
    pub y: f64,
    /// Lateral velocity.
    pub speed_x: f64,
    /// Downhill velocity.
    pub speed_y: f64,
    /// Whether the skier is tucking.
    pub is_tucking: bool,
    /// Whether the skier has hit a solid obstacle.
    pub is_crashed: bool,
}

impl ActorState {
    /// A skier at rest at the top of the course at lateral position `x`.
    pub fn at(x: f64) -> Self {
        Self {
            x: x.clamp(0.0, 100.0),
            ..Self::default()
        }
    }
}
