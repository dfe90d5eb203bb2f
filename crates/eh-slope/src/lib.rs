//! Downhill race simulation for Eagle Hill.
//!
//! A fixed-timestep integrator for a steerable player and a scripted
//! opponent skiing through a seeded obstacle field. Everything here is a
//! pure state transition; rendering and key handling live with the host,
//! which feeds held keys through an [`InputSource`] and reads back a
//! [`RaceSnapshot`].

/// Skier position and motion.
pub mod actor;
/// Headless input source that steers for free lanes.
pub mod autopilot;
/// Race clock and fixed-timestep accumulator.
pub mod clock;
/// Configuration types for races.
pub mod config;
/// Course objects and seeded course generation.
pub mod course;
/// Error types for the slope crate.
pub mod error;
/// Race event types and the event log.
pub mod event;
/// Control keys and input sources.
pub mod input;
/// Per-tick integration and collision.
pub mod physics;
/// Top-level race orchestrator.
pub mod race;

/// Re-export of [`actor::ActorState`].
pub use actor::ActorState;
/// Re-export of [`autopilot::Autopilot`].
pub use autopilot::Autopilot;
/// Re-exports of [`clock::FixedTimestep`] and [`clock::RaceClock`].
pub use clock::{FixedTimestep, RaceClock};
/// Re-exports of the configuration types.
pub use config::{AiConfig, CourseConfig, PhysicsConfig, REFERENCE_HZ, RaceConfig};
/// Re-exports of [`course::Course`], [`course::ObjectKind`], and [`course::WorldObject`].
pub use course::{Course, ObjectKind, WorldObject};
/// Re-exports of [`error::SlopeError`] and [`error::SlopeResult`].
pub use error::{SlopeError, SlopeResult};
/// Re-exports of [`event::EventLog`], [`event::RaceEvent`], and [`event::RaceEventKind`].
pub use event::{EventLog, RaceEvent, RaceEventKind};
/// Re-exports of the input types.
pub use input::{HeldKeys, InputSource, InputState, Key};
/// Re-exports of [`race::Race`], [`race::RaceSnapshot`], and [`race::RaceStatus`].
pub use race::{Race, RaceSnapshot, RaceStatus};
