use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CourseConfig, LODGE_SIZE, PhysicsConfig, ROCK_SIZE};
use crate::error::SlopeResult;

const GATE_SIZE: (f64, f64) = (16.0, 30.0);
const ICE_WIDTH: (f64, f64) = (60.0, 120.0);
const ICE_HEIGHT: f64 = 30.0;

/// What a course object is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// A tree. Solid.
    Tree,
    /// The rock landmark. Solid.
    LandmarkRock,
    /// The lodge landmark.
    LandmarkLodge,
    /// An ice patch.
    IcePatch,
    /// Left post of a gate pair.
    GateLeft,
    /// Right post of a gate pair.
    GateRight,
}

impl ObjectKind {
    /// Whether touching this object crashes the player.
    pub fn is_solid(self) -> bool {
        matches!(self, Self::Tree | Self::LandmarkRock)
    }

    /// Lower-case display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::LandmarkRock => "rock",
            Self::LandmarkLodge => "lodge",
            Self::IcePatch => "ice patch",
            Self::GateLeft => "left gate",
            Self::GateRight => "right gate",
        }
    }
}

/// One object placed on the course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    /// What the object is.
    pub kind: ObjectKind,
    /// Downhill position of its center.
    pub y: f64,
    /// Lateral position of its center, in percent.
    pub x: f64,
    /// Width in track pixels.
    pub width: f64,
    /// Height in downhill units.
    pub height: f64,
}

impl WorldObject {
    /// Create an object.
    pub fn new(kind: ObjectKind, y: f64, x: f64, width: f64, height: f64) -> Self {
        Self {
            kind,
            y,
            x,
            width,
            height,
        }
    }

    /// Whether downhill position `y` lies inside this object's band.
    pub fn spans(&self, y: f64) -> bool {
        (y - self.y).abs() < self.height / 2.0
    }

    /// Half-width of the lateral range in which a player center collides.
    pub fn reach(&self, physics: &PhysicsConfig) -> f64 {
        physics.width_pct(self.width) / 2.0 + physics.player_width / 2.0
    }
}

/// A generated obstacle field, ordered by downhill position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    objects: Vec<WorldObject>,
}

impl Course {
    /// Build a course from arbitrary objects.
    pub fn from_objects(mut objects: Vec<WorldObject>) -> Self {
        objects.sort_by(|a, b| a.y.total_cmp(&b.y));
        Self { objects }
    }

    /// Generate the course for `seed`. The same inputs always give the
    /// same course.
    ///
    /// Each row of trees keeps a lane of `lane_width` clear; the lane
    /// drifts a little from row to row and gate pairs mark it every
    /// `gate_interval` rows.
    ///
    /// Both configs are validated first; values that could not produce a
    /// navigable course are rejected.
    pub fn generate(
        config: &CourseConfig,
        physics: &PhysicsConfig,
        seed: u64,
    ) -> SlopeResult<Self> {
        physics.validate()?;
        config.validate(physics)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let (rock_y, rock_x) = config.rock_at;
        let (lodge_y, lodge_x) = config.lodge_at;
        let mut objects = vec![
            WorldObject::new(ObjectKind::LandmarkRock, rock_y, rock_x, ROCK_SIZE.0, ROCK_SIZE.1),
            WorldObject::new(
                ObjectKind::LandmarkLodge,
                lodge_y,
                lodge_x,
                LODGE_SIZE.0,
                LODGE_SIZE.1,
            ),
        ];

        let half_lane = config.lane_width / 2.0;
        let mut lane = 50.0_f64;
        let mut y = config.start_clearance;
        let mut row = 0u32;

        while y < config.length {
            let spacing = rng.random_range(config.min_row_spacing..=config.max_row_spacing);
            let near_landmark = [rock_y, lodge_y]
                .iter()
                .any(|l| (y - l).abs() < config.landmark_clearance);
            if near_landmark {
                y += spacing;
                continue;
            }

            lane = (lane + rng.random_range(-15.0_f64..=15.0)).clamp(half_lane, 100.0 - half_lane);
            place_trees(&mut rng, &mut objects, config, physics, y, lane);

            if config.gate_interval > 0 && row % config.gate_interval == 0 {
                let (w, h) = GATE_SIZE;
                objects.push(WorldObject::new(ObjectKind::GateLeft, y, lane - half_lane, w, h));
                objects.push(WorldObject::new(ObjectKind::GateRight, y, lane + half_lane, w, h));
            }

            if rng.random_bool(config.ice_chance) {
                let width = rng.random_range(ICE_WIDTH.0..=ICE_WIDTH.1);
                let x: f64 = rng.random_range(10.0..=90.0);
                objects.push(WorldObject::new(
                    ObjectKind::IcePatch,
                    y + spacing / 2.0,
                    x,
                    width,
                    ICE_HEIGHT,
                ));
            }

            y += spacing;
            row += 1;
        }

        let course = Self::from_objects(objects);
        debug!(seed, rows = row, objects = course.len(), "generated course");
        Ok(course)
    }

    /// All objects, ordered by downhill position.
    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the course has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects of `kind`.
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }

    /// Objects whose downhill position is strictly within `window` of `y`.
    pub fn nearby(&self, y: f64, window: f64) -> &[WorldObject] {
        let start = self.objects.partition_point(|o| o.y <= y - window);
        let end = self.objects.partition_point(|o| o.y < y + window);
        &self.objects[start..end.max(start)]
    }

    /// Lateral ranges at downhill position `y` where the player's center
    /// touches no solid object.
    pub fn free_lanes_at(&self, y: f64, physics: &PhysicsConfig) -> Vec<(f64, f64)> {
        let mut blocked: Vec<(f64, f64)> = self
            .objects
            .iter()
            .filter(|o| o.kind.is_solid() && o.spans(y))
            .map(|o| {
                let reach = o.reach(physics);
                (o.x - reach, o.x + reach)
            })
            .collect();
        blocked.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut lanes = Vec::new();
        let mut cursor = 0.0_f64;
        for (start, end) in blocked {
            if start > cursor {
                lanes.push((cursor, start.min(100.0)));
            }
            cursor = cursor.max(end);
            if cursor >= 100.0 {
                break;
            }
        }
        if cursor < 100.0 {
            lanes.push((cursor, 100.0));
        }
        lanes.retain(|(a, b)| b > a);
        lanes
    }

    /// Whether every downhill position leaves some free lane.
    ///
    /// Rows never overlap, so checking each solid object's own position
    /// covers the tightest point of every row.
    pub fn is_navigable(&self, physics: &PhysicsConfig) -> bool {
        self.objects
            .iter()
            .filter(|o| o.kind.is_solid())
            .all(|o| !self.free_lanes_at(o.y, physics).is_empty())
    }
}

fn place_trees(
    rng: &mut StdRng,
    objects: &mut Vec<WorldObject>,
    config: &CourseConfig,
    physics: &PhysicsConfig,
    y: f64,
    lane: f64,
) {
    let count = match config.max_trees_per_row {
        0 => 0,
        max => rng.random_range(1..=max),
    };
    let lane_lo = lane - config.lane_width / 2.0;
    let lane_hi = lane + config.lane_width / 2.0;

    for _ in 0..count {
        // Rejection sampling; a tree that cannot be placed is skipped.
        for _ in 0..8 {
            let width = rng.random_range(config.tree_width.0..=config.tree_width.1);
            let height = rng.random_range(config.tree_height.0..=config.tree_height.1);
            let x = rng.random_range(0.0..=100.0);
            let tree = WorldObject::new(ObjectKind::Tree, y, x, width, height);
            let reach = tree.reach(physics);
            if x + reach <= lane_lo || x - reach >= lane_hi {
                objects.push(tree);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(y: f64, x: f64) -> WorldObject {
        WorldObject::new(ObjectKind::Tree, y, x, 40.0, 60.0)
    }

    #[test]
    fn generation_is_deterministic() {
        let config = CourseConfig::default();
        let physics = PhysicsConfig::default();
        let a = Course::generate(&config, &physics, 9).unwrap();
        let b = Course::generate(&config, &physics, 9).unwrap();
        let c = Course::generate(&config, &physics, 10).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn objects_are_sorted() {
        let course =
            Course::generate(&CourseConfig::default(), &PhysicsConfig::default(), 3).unwrap();
        assert!(course.objects().windows(2).all(|w| w[0].y <= w[1].y));
        assert!(course.count(ObjectKind::Tree) > 10);
        assert!(course.count(ObjectKind::GateLeft) > 0);
        assert_eq!(course.count(ObjectKind::GateLeft), course.count(ObjectKind::GateRight));
    }

    #[test]
    fn landmarks_appear_once() {
        let course =
            Course::generate(&CourseConfig::default(), &PhysicsConfig::default(), 1).unwrap();
        assert_eq!(course.count(ObjectKind::LandmarkRock), 1);
        assert_eq!(course.count(ObjectKind::LandmarkLodge), 1);
    }

    #[test]
    fn generate_rejects_unusable_layouts() {
        let physics = PhysicsConfig::default();
        let too_wide = CourseConfig::default().with_lane_width(120.0);
        let err = Course::generate(&too_wide, &physics, 1).unwrap_err();
        assert!(err.to_string().contains("lane_width"));

        let no_spacing = CourseConfig::default().with_row_spacing(0.0, 0.0);
        let err = Course::generate(&no_spacing, &physics, 1).unwrap_err();
        assert!(err.to_string().contains("min_row_spacing"));

        let bad_physics = PhysicsConfig::default().with_friction(2.0);
        assert!(Course::generate(&CourseConfig::default(), &bad_physics, 1).is_err());
    }

    #[test]
    fn solidity() {
        assert!(ObjectKind::Tree.is_solid());
        assert!(ObjectKind::LandmarkRock.is_solid());
        assert!(!ObjectKind::LandmarkLodge.is_solid());
        assert!(!ObjectKind::IcePatch.is_solid());
        assert!(!ObjectKind::GateLeft.is_solid());
    }

    #[test]
    fn nearby_uses_strict_window() {
        let course = Course::from_objects(vec![tree(100.0, 50.0), tree(200.0, 50.0), tree(300.0, 50.0)]);
        let near = course.nearby(200.0, 100.0);
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].y, 200.0);
        assert_eq!(course.nearby(250.0, 100.0).len(), 2);
        assert!(course.nearby(1000.0, 100.0).is_empty());
    }

    #[test]
    fn free_lanes_exclude_tree_reach() {
        let physics = PhysicsConfig::default();
        // 40 px = 5 %, reach = 2.5 + 1.5 = 4.
        let course = Course::from_objects(vec![tree(500.0, 50.0)]);
        let lanes = course.free_lanes_at(500.0, &physics);
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes[0].0, 0.0);
        assert!((lanes[0].1 - 46.0).abs() < 1e-9);
        assert!((lanes[1].0 - 54.0).abs() < 1e-9);
        assert_eq!(lanes[1].1, 100.0);

        // Outside the tree's band the whole track is free.
        assert_eq!(course.free_lanes_at(600.0, &physics), vec![(0.0, 100.0)]);
    }

    #[test]
    fn free_lanes_merge_overlaps() {
        let physics = PhysicsConfig::default();
        let course = Course::from_objects(vec![tree(500.0, 10.0), tree(500.0, 14.0), tree(500.0, 98.0)]);
        let lanes = course.free_lanes_at(500.0, &physics);
        assert_eq!(lanes.len(), 2);
        assert!((lanes[0].1 - 6.0).abs() < 1e-9);
        assert!((lanes[1].0 - 18.0).abs() < 1e-9);
        assert!((lanes[1].1 - 94.0).abs() < 1e-9);
    }

    #[test]
    fn generated_course_is_navigable() {
        let physics = PhysicsConfig::default();
        for seed in 0..20 {
            let course = Course::generate(&CourseConfig::default(), &physics, seed).unwrap();
            assert!(course.is_navigable(&physics), "seed {seed}");
        }
    }

    #[test]
    fn wall_of_trees_is_not_navigable() {
        let physics = PhysicsConfig::default();
        let wall = (0..=20).map(|i| tree(500.0, f64::from(i) * 5.0)).collect();
        let course = Course::from_objects(wall);
        assert!(course.free_lanes_at(500.0, &physics).is_empty());
        assert!(!course.is_navigable(&physics));
    }
}
