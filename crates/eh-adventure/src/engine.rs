//! The adventure state machine.
//!
//! [`AdventureEngine`] owns the world, the player's [`GameState`], and a
//! [`SaveStore`]. Every mutation is followed by a snapshot write, and the
//! snapshot is read back once when the engine is loaded.

use tracing::{debug, info, warn};

use crate::ids::{ItemId, LocationId, SuspectId};
use crate::state::GameState;
use crate::store::{SAVE_FORMAT_VERSION, SAVE_KEY, SaveFile, SaveStore};
use crate::world::{Item, Location, WorldConfig};

/// Shown when a locked location has no message of its own.
pub const DEFAULT_LOCK_MESSAGE: &str = "You can't go there yet.";

/// Result of [`AdventureEngine::move_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player entered the location.
    Moved {
        /// The location entered.
        location: LocationId,
        /// Items found here that the player does not hold yet.
        available: Vec<ItemId>,
    },
    /// Entry was refused; nothing changed.
    Locked {
        /// Why the player cannot enter.
        message: String,
    },
}

impl MoveOutcome {
    /// Whether the move happened.
    pub fn is_success(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// Result of [`AdventureEngine::make_accusation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The culprit was named; the game is complete.
    Correct,
    /// Someone else was named; nothing changed.
    Wrong,
    /// The evidence policy refused to judge; nothing changed.
    NeedMoreEvidence {
        /// Clues the policy requires.
        required: u32,
        /// Clues the player holds.
        found: u32,
    },
}

impl Verdict {
    /// Whether the accusation solved the mystery.
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }

    /// Player-facing feedback for this verdict. The world's own closing
    /// text lives in [`WorldConfig::victory`].
    pub fn message(&self) -> String {
        match self {
            Verdict::Correct => "Case closed!".to_string(),
            Verdict::Wrong => {
                "That doesn't seem right. Review your evidence and try again.".to_string()
            }
            Verdict::NeedMoreEvidence { required, found } => format!(
                "You only have {found} of the {required} clues you need to make that accusation stick."
            ),
        }
    }
}

/// Drives one playthrough of an adventure world.
#[derive(Debug)]
pub struct AdventureEngine<S: SaveStore> {
    world: WorldConfig,
    state: GameState,
    store: S,
}

impl<S: SaveStore> AdventureEngine<S> {
    /// Create an engine, restoring any snapshot found in `store`.
    ///
    /// Missing, unreadable, or stale snapshots are discarded with a warning
    /// and the game starts from the initial state.
    pub fn load(world: WorldConfig, store: S) -> Self {
        let state = restore(&world, &store);
        Self {
            world,
            state,
            store,
        }
    }

    /// The static world.
    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    /// Current progress.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the engine, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The location the player is in.
    pub fn current_location(&self) -> &Location {
        self.location(&self.state.current_location)
    }

    /// Look up a location.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not defined in the world.
    pub fn location(&self, id: &LocationId) -> &Location {
        self.world
            .location(id)
            .unwrap_or_else(|| panic!("unknown location id `{id}`"))
    }

    /// Look up an item.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not defined in the world.
    pub fn item(&self, id: &ItemId) -> &Item {
        self.world
            .item(id)
            .unwrap_or_else(|| panic!("unknown item id `{id}`"))
    }

    /// Whether the culprit can be named at the current location.
    pub fn can_accuse(&self) -> bool {
        self.current_location().accusation_scene
    }

    /// Move the player to `id`.
    ///
    /// A lock whose item the player does not hold refuses the move and
    /// leaves the state untouched. On success the outcome lists the items
    /// now in reach; feed them to [`Self::pick_up_item`] or call
    /// [`Self::collect_available`].
    ///
    /// # Panics
    ///
    /// Panics if `id` is not defined in the world.
    pub fn move_to(&mut self, id: &LocationId) -> MoveOutcome {
        let target = self.location(id);
        if let Some(lock) = &target.lock {
            if !self.state.has_item(&lock.required_item) {
                debug!(location = %id, required = %lock.required_item, "move refused");
                return MoveOutcome::Locked {
                    message: lock
                        .message
                        .clone()
                        .unwrap_or_else(|| DEFAULT_LOCK_MESSAGE.to_string()),
                };
            }
        }

        self.state.current_location = id.clone();
        info!(location = %id, "moved");
        self.persist();

        MoveOutcome::Moved {
            location: id.clone(),
            available: self.items_available_at(id),
        }
    }

    /// Items found at `id` that the player does not hold yet, in order.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not defined in the world.
    pub fn items_available_at(&self, id: &LocationId) -> Vec<ItemId> {
        self.location(id)
            .items_found
            .iter()
            .filter(|item| !self.state.has_item(item))
            .cloned()
            .collect()
    }

    /// Pick up everything available at the current location.
    ///
    /// Returns the items that were added.
    pub fn collect_available(&mut self) -> Vec<ItemId> {
        let available = self.items_available_at(&self.state.current_location.clone());
        for item in &available {
            self.pick_up_item(item);
        }
        available
    }

    /// Add an item to the inventory.
    ///
    /// Idempotent: returns `false` and changes nothing if the item is
    /// already held.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not defined in the world.
    pub fn pick_up_item(&mut self, id: &ItemId) -> bool {
        let item = self
            .world
            .item(id)
            .unwrap_or_else(|| panic!("unknown item id `{id}`"));
        if !self.state.add_item(item) {
            return false;
        }
        info!(
            item = %id,
            clue_for = item.clue_for.as_ref().map(|s| s.as_str()),
            clues_found = self.state.clues_found,
            "picked up item"
        );
        self.persist();
        true
    }

    /// Name a suspect as the thief.
    ///
    /// The verdict depends only on the configured culprit and accusation
    /// policy, never on which suspect the evidence favors. A correct
    /// accusation completes the game; anything else leaves the state as it
    /// was.
    ///
    /// # Panics
    ///
    /// Panics if `suspect` is not defined in the world.
    pub fn make_accusation(&mut self, suspect: &SuspectId) -> Verdict {
        assert!(
            self.world.suspect(suspect).is_some(),
            "unknown suspect id `{suspect}`"
        );

        let required = self.world.solution.policy.min_clues;
        if self.state.clues_found < required {
            debug!(%suspect, required, found = self.state.clues_found, "accusation gated");
            return Verdict::NeedMoreEvidence {
                required,
                found: self.state.clues_found,
            };
        }

        if suspect != &self.world.solution.culprit {
            debug!(%suspect, "wrong accusation");
            return Verdict::Wrong;
        }

        if !self.state.game_complete {
            self.state.game_complete = true;
            self.state.accusation = Some(suspect.clone());
            info!(%suspect, "mystery solved");
            self.persist();
        }
        Verdict::Correct
    }

    /// Record that the intro has been shown.
    pub fn mark_intro_seen(&mut self) {
        if !self.state.has_seen_intro {
            self.state.has_seen_intro = true;
            self.persist();
        }
    }

    /// Start over and delete the saved snapshot.
    pub fn reset_game(&mut self) {
        self.state = GameState::initial(&self.world);
        if let Err(e) = self.store.remove(SAVE_KEY) {
            warn!(error = %e, "failed to clear saved game");
        }
        info!("game reset");
    }

    fn persist(&mut self) {
        let json = match SaveFile::new(self.state.clone()).to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize save");
                return;
            }
        };
        if let Err(e) = self.store.write(SAVE_KEY, &json) {
            warn!(error = %e, "failed to write save");
        }
    }
}

fn restore<S: SaveStore>(world: &WorldConfig, store: &S) -> GameState {
    let raw = match store.read(SAVE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return GameState::initial(world),
        Err(e) => {
            warn!(error = %e, "failed to read save, starting fresh");
            return GameState::initial(world);
        }
    };

    match SaveFile::from_json(&raw) {
        Ok(save) if save.version != SAVE_FORMAT_VERSION => {
            warn!(version = save.version, "unsupported save version, starting fresh");
            GameState::initial(world)
        }
        Ok(save) if !save.state.is_consistent_with(world) => {
            warn!("save does not match this world, starting fresh");
            GameState::initial(world)
        }
        Ok(save) => {
            info!(saved_at = %save.saved_at, "restored saved game");
            save.state
        }
        Err(e) => {
            warn!(error = %e, "corrupt save, starting fresh");
            GameState::initial(world)
        }
    }
}
