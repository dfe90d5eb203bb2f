//! Mutable adventure progress.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, LocationId, SuspectId};
use crate::world::{Item, WorldConfig};

/// The player's progress through the mystery.
///
/// Owned by [`crate::AdventureEngine`]; callers only ever see it read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Where the player is.
    pub current_location: LocationId,
    /// Collected items in pickup order, without duplicates.
    pub inventory: Vec<ItemId>,
    /// Number of held items that implicate a suspect.
    pub clues_found: u32,
    /// Held clues per suspect. Every suspect has an entry.
    pub suspect_evidence: BTreeMap<SuspectId, u32>,
    /// Set once the culprit has been named.
    pub game_complete: bool,
    /// The correctly accused suspect, if any.
    pub accusation: Option<SuspectId>,
    /// Whether the intro text has been shown.
    pub has_seen_intro: bool,
}

impl GameState {
    /// Fresh state at the world's starting location.
    pub fn initial(world: &WorldConfig) -> Self {
        Self {
            current_location: world.start.clone(),
            inventory: Vec::new(),
            clues_found: 0,
            suspect_evidence: world.suspects.iter().map(|s| (s.id.clone(), 0)).collect(),
            game_complete: false,
            accusation: None,
            has_seen_intro: false,
        }
    }

    /// Check if the player holds an item.
    pub fn has_item(&self, item: &ItemId) -> bool {
        self.inventory.contains(item)
    }

    /// Clues held against a suspect.
    pub fn evidence_against(&self, suspect: &SuspectId) -> u32 {
        self.suspect_evidence.get(suspect).copied().unwrap_or(0)
    }

    /// Add an item and update the evidence counters.
    ///
    /// Returns `false` if the item was already held.
    pub(crate) fn add_item(&mut self, item: &Item) -> bool {
        if self.has_item(&item.id) {
            return false;
        }
        self.inventory.push(item.id.clone());
        if let Some(suspect) = &item.clue_for {
            self.clues_found += 1;
            *self.suspect_evidence.entry(suspect.clone()).or_insert(0) += 1;
        }
        true
    }

    /// Check that this state could have been produced by playing `world`.
    ///
    /// Used to reject stale snapshots after the world definition changes.
    pub fn is_consistent_with(&self, world: &WorldConfig) -> bool {
        if world.location(&self.current_location).is_none() {
            return false;
        }

        let mut seen = HashSet::new();
        let mut expected: BTreeMap<SuspectId, u32> =
            world.suspects.iter().map(|s| (s.id.clone(), 0)).collect();
        let mut clues = 0;
        for id in &self.inventory {
            if !seen.insert(id) {
                return false;
            }
            let Some(item) = world.item(id) else {
                return false;
            };
            if let Some(suspect) = &item.clue_for {
                clues += 1;
                *expected.entry(suspect.clone()).or_insert(0) += 1;
            }
        }

        let solved = self.accusation.as_ref() == Some(&world.solution.culprit);
        clues == self.clues_found
            && expected == self.suspect_evidence
            && self.game_complete == solved
            && (self.accusation.is_none() || solved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldConfig {
        WorldConfig::eagle_hill()
    }

    #[test]
    fn initial_state() {
        let world = world();
        let state = GameState::initial(&world);

        assert_eq!(state.current_location.as_str(), "DORM_ROOM");
        assert!(state.inventory.is_empty());
        assert_eq!(state.clues_found, 0);
        assert_eq!(state.suspect_evidence.len(), 3);
        assert!(state.suspect_evidence.values().all(|&n| n == 0));
        assert!(!state.game_complete);
        assert!(state.accusation.is_none());
        assert!(!state.has_seen_intro);
    }

    #[test]
    fn add_item_counts_clues_once() {
        let world = world();
        let mut state = GameState::initial(&world);
        let fabric = world.item(&ItemId::new("TORN_FABRIC")).unwrap();

        assert!(state.add_item(fabric));
        assert!(!state.add_item(fabric));

        assert_eq!(state.inventory.len(), 1);
        assert_eq!(state.clues_found, 1);
        assert_eq!(state.evidence_against(&SuspectId::new("JAKE_MORRISON")), 1);
    }

    #[test]
    fn plain_items_are_not_clues() {
        let world = world();
        let mut state = GameState::initial(&world);
        let key = world.item(&ItemId::new("SHED_KEY")).unwrap();

        assert!(state.add_item(key));
        assert_eq!(state.clues_found, 0);
        assert!(state.has_item(&ItemId::new("SHED_KEY")));
    }

    #[test]
    fn consistency_check_catches_tampering() {
        let world = world();
        let mut state = GameState::initial(&world);
        assert!(state.is_consistent_with(&world));

        state.clues_found = 3;
        assert!(!state.is_consistent_with(&world));

        let mut state = GameState::initial(&world);
        state.current_location = LocationId::new("MOON_BASE");
        assert!(!state.is_consistent_with(&world));

        let mut state = GameState::initial(&world);
        state.accusation = Some(SuspectId::new("MARCUS_CHEN"));
        assert!(!state.is_consistent_with(&world));
    }
}
