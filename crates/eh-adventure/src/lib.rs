//! Adventure engine for Eagle Hill.
//!
//! A location-graph walker with inventory and evidence tracking that ends in
//! an accusation. The world (locations, items, suspects, and the culprit) is
//! static configuration; progress lives in a single [`GameState`] owned by
//! the [`AdventureEngine`] and saved to a [`SaveStore`] after every change.

/// The built-in Eagle Hill world.
mod eagle_hill;
/// The adventure state machine.
pub mod engine;
/// Error types for the adventure engine.
pub mod error;
/// Identifier newtypes.
pub mod ids;
/// Player progress.
pub mod state;
/// Snapshot persistence.
pub mod store;
/// Static world definition.
pub mod world;

pub use engine::{AdventureEngine, DEFAULT_LOCK_MESSAGE, MoveOutcome, Verdict};
pub use error::{AdventureError, AdventureResult, StoreError};
pub use ids::{ItemId, LocationId, SuspectId};
pub use state::GameState;
pub use store::{FileStore, MemoryStore, SAVE_KEY, SaveFile, SaveStore};
pub use world::{AccusationPolicy, Choice, Item, Location, Lock, Solution, Suspect, WorldConfig};
