use crate::error::{SlopeError, SlopeResult};

/// Frame rate the per-frame constants are tuned for.
pub const REFERENCE_HZ: f64 = 60.0;

/// Player handling. Rates are per reference frame (1/60 s).
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Lateral velocity kept per frame.
    pub friction: f64,
    /// Lateral acceleration per frame while steering.
    pub steering: f64,
    /// Steering multiplier while tucking.
    pub tuck_steer_factor: f64,
    /// Downhill speed cap when upright.
    pub max_speed: f64,
    /// Downhill speed cap when tucking.
    pub tuck_max_speed: f64,
    /// Downhill acceleration per frame when upright.
    pub accel: f64,
    /// Downhill acceleration per frame when tucking.
    pub tuck_accel: f64,
    /// Player width in percent of the track.
    pub player_width: f64,
    /// Only objects this close downhill are collision-checked.
    pub collision_window: f64,
    /// Track width in pixels, for converting object widths to percent.
    pub track_width_px: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: 0.96,
            steering: 0.8,
            tuck_steer_factor: 0.3,
            max_speed: 15.0,
            tuck_max_speed: 22.0,
            accel: 0.1,
            tuck_accel: 0.2,
            player_width: 3.0,
            collision_window: 100.0,
            track_width_px: 800.0,
        }
    }
}

impl PhysicsConfig {
    /// Convert a width in track pixels to percent of the track.
    pub fn width_pct(&self, width_px: f64) -> f64 {
        width_px / self.track_width_px * 100.0
    }

    /// Set the lateral friction multiplier.
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Set the upright and tucking speed caps.
    pub fn with_speed_caps(mut self, max_speed: f64, tuck_max_speed: f64) -> Self {
        self.max_speed = max_speed;
        self.tuck_max_speed = tuck_max_speed;
        self
    }

    pub(crate) fn validate(&self) -> SlopeResult<()> {
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(SlopeError::invalid("friction", "must be within 0..=1"));
        }
        if self.track_width_px <= 0.0 {
            return Err(SlopeError::invalid("track_width_px", "must be positive"));
        }
        if self.player_width <= 0.0 {
            return Err(SlopeError::invalid("player_width", "must be positive"));
        }
        Ok(())
    }
}

/// Scripted opponent behaviour. Rates are per reference frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    /// Lateral start position.
    pub start_x: f64,
    /// Downhill cruising speed.
    pub target_speed: f64,
    /// Downhill acceleration per frame.
    pub accel: f64,
    /// Lateral acceleration per frame toward the weave target.
    pub steering: f64,
    /// Lateral velocity kept per frame.
    pub friction: f64,
    /// Center line of the weave.
    pub weave_center: f64,
    /// Weave half-width.
    pub weave_amplitude: f64,
    /// Weave angular rate in radians per second.
    pub weave_rate: f64,
    /// Weave phase offset in radians.
    pub phase: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            start_x: 60.0,
            target_speed: 16.0,
            accel: 0.1,
            steering: 0.2,
            friction: 0.95,
            weave_center: 50.0,
            weave_amplitude: 30.0,
            weave_rate: 1.0,
            phase: 0.0,
        }
    }
}

impl AiConfig {
    /// Set the cruising speed.
    pub fn with_target_speed(mut self, speed: f64) -> Self {
        self.target_speed = speed;
        self
    }

    /// Set the weave phase offset.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }
}

/// Course layout parameters. Distances are in downhill units, widths and
/// heights in track pixels, lateral values in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseConfig {
    /// Downhill distance covered by obstacles.
    pub length: f64,
    /// Obstacle-free run-in at the top.
    pub start_clearance: f64,
    /// Smallest gap between obstacle rows.
    pub min_row_spacing: f64,
    /// Largest gap between obstacle rows.
    pub max_row_spacing: f64,
    /// Most trees placed in one row.
    pub max_trees_per_row: u32,
    /// Tree width range.
    pub tree_width: (f64, f64),
    /// Tree height range.
    pub tree_height: (f64, f64),
    /// Width of the lane every row keeps clear, in percent.
    pub lane_width: f64,
    /// Chance of an ice patch between two rows.
    pub ice_chance: f64,
    /// Rows between gate pairs (0 disables gates).
    pub gate_interval: u32,
    /// Rock landmark position `(downhill, lateral)`.
    pub rock_at: (f64, f64),
    /// Lodge landmark position `(downhill, lateral)`.
    pub lodge_at: (f64, f64),
    /// Rows this close to a landmark are skipped.
    pub landmark_clearance: f64,
}

/// Rock landmark size in pixels.
pub const ROCK_SIZE: (f64, f64) = (120.0, 80.0);
/// Lodge landmark size in pixels.
pub const LODGE_SIZE: (f64, f64) = (160.0, 120.0);

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            length: 5600.0,
            start_clearance: 300.0,
            min_row_spacing: 100.0,
            max_row_spacing: 180.0,
            max_trees_per_row: 4,
            tree_width: (40.0, 70.0),
            tree_height: (50.0, 90.0),
            lane_width: 14.0,
            ice_chance: 0.3,
            gate_interval: 3,
            rock_at: (2500.0, 20.0),
            lodge_at: (4000.0, 85.0),
            landmark_clearance: 150.0,
        }
    }
}

impl CourseConfig {
    /// Set the obstacle length.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Set the row spacing range.
    pub fn with_row_spacing(mut self, min: f64, max: f64) -> Self {
        self.min_row_spacing = min;
        self.max_row_spacing = max;
        self
    }

    /// Set the clear lane width.
    pub fn with_lane_width(mut self, width: f64) -> Self {
        self.lane_width = width;
        self
    }

    /// Set the maximum trees per row.
    pub fn with_max_trees_per_row(mut self, n: u32) -> Self {
        self.max_trees_per_row = n;
        self
    }

    pub(crate) fn validate(&self, physics: &PhysicsConfig) -> SlopeResult<()> {
        let numbers = [
            ("length", self.length),
            ("start_clearance", self.start_clearance),
            ("min_row_spacing", self.min_row_spacing),
            ("max_row_spacing", self.max_row_spacing),
            ("tree_width", self.tree_width.0),
            ("tree_width", self.tree_width.1),
            ("tree_height", self.tree_height.0),
            ("tree_height", self.tree_height.1),
            ("lane_width", self.lane_width),
            ("rock_at", self.rock_at.0),
            ("rock_at", self.rock_at.1),
            ("lodge_at", self.lodge_at.0),
            ("lodge_at", self.lodge_at.1),
            ("landmark_clearance", self.landmark_clearance),
        ];
        if let Some(&(field, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SlopeError::invalid(field, "must be finite"));
        }
        let (min_h, max_h) = self.tree_height;
        let (min_w, max_w) = self.tree_width;
        if min_h <= 0.0 || min_h > max_h {
            return Err(SlopeError::invalid("tree_height", "needs 0 < min <= max"));
        }
        if min_w <= 0.0 || min_w > max_w {
            return Err(SlopeError::invalid("tree_width", "needs 0 < min <= max"));
        }
        if self.min_row_spacing > self.max_row_spacing {
            return Err(SlopeError::invalid("min_row_spacing", "exceeds max_row_spacing"));
        }
        // Collision bands of neighbouring rows must never overlap.
        if self.min_row_spacing < max_h {
            return Err(SlopeError::invalid(
                "min_row_spacing",
                format!("must be at least the tallest tree ({max_h})"),
            ));
        }
        if self.landmark_clearance < (max_h + ROCK_SIZE.1) / 2.0 {
            return Err(SlopeError::invalid(
                "landmark_clearance",
                "rows would overlap the rock landmark",
            ));
        }
        // One frame of travel must land inside any tree it would pass.
        let top_speed = physics.max_speed.max(physics.tuck_max_speed);
        if !top_speed.is_finite() || top_speed >= min_h {
            return Err(SlopeError::invalid(
                "tree_height",
                format!("shortest tree ({min_h}) must exceed the top speed ({top_speed})"),
            ));
        }
        if self.lane_width <= physics.player_width || self.lane_width >= 100.0 {
            return Err(SlopeError::invalid(
                "lane_width",
                format!("must be wider than the player ({}) and under 100", physics.player_width),
            ));
        }
        if !(0.0..=1.0).contains(&self.ice_chance) {
            return Err(SlopeError::invalid("ice_chance", "must be within 0..=1"));
        }
        Ok(())
    }
}

/// Everything needed to set up a race.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceConfig {
    /// RNG seed for course generation.
    pub seed: u64,
    /// Seconds simulated per tick.
    pub timestep: f64,
    /// Downhill distance that ends the race.
    pub finish_distance: f64,
    /// Player lateral start position.
    pub player_start_x: f64,
    /// Player handling.
    pub physics: PhysicsConfig,
    /// Opponent behaviour.
    pub ai: AiConfig,
    /// Course layout.
    pub course: CourseConfig,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            timestep: 1.0 / REFERENCE_HZ,
            finish_distance: 5000.0,
            player_start_x: 50.0,
            physics: PhysicsConfig::default(),
            ai: AiConfig::default(),
            course: CourseConfig::default(),
        }
    }
}

impl RaceConfig {
    /// Set the course seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the seconds simulated per tick.
    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set the finish distance.
    pub fn with_finish_distance(mut self, distance: f64) -> Self {
        self.finish_distance = distance;
        self
    }

    /// Replace the player handling.
    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    /// Replace the opponent behaviour.
    pub fn with_ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }

    /// Replace the course layout.
    pub fn with_course(mut self, course: CourseConfig) -> Self {
        self.course = course;
        self
    }

    /// Check every value is usable.
    pub fn validate(&self) -> SlopeResult<()> {
        if self.timestep <= 0.0 || !self.timestep.is_finite() {
            return Err(SlopeError::invalid("timestep", "must be positive"));
        }
        if self.finish_distance <= 0.0 {
            return Err(SlopeError::invalid("finish_distance", "must be positive"));
        }
        if !(0.0..=100.0).contains(&self.player_start_x) {
            return Err(SlopeError::invalid("player_start_x", "must be within 0..=100"));
        }
        self.physics.validate()?;
        self.course.validate(&self.physics)
    }
}
