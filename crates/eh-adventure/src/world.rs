//! Static world definition: locations, items, suspects, and the solution.
//!
//! A [`WorldConfig`] is immutable once the engine owns it. Worlds loaded from
//! JSON are validated so every id the engine will ever be handed is known.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AdventureError, AdventureResult};
use crate::ids::{ItemId, LocationId, SuspectId};

/// A navigation option shown at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Label shown to the player.
    pub text: String,
    /// Where the choice leads.
    pub destination: LocationId,
}

impl Choice {
    /// Create a choice leading to `destination`.
    pub fn new(text: impl Into<String>, destination: impl Into<LocationId>) -> Self {
        Self {
            text: text.into(),
            destination: destination.into(),
        }
    }
}

/// Entry requirement for a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    /// Item the player must hold to enter.
    pub required_item: ItemId,
    /// Message shown when entry is refused.
    #[serde(default)]
    pub message: Option<String>,
}

/// A node in the navigable location graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique id.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Scene description.
    pub description: String,
    /// Items picked up on entry, in order.
    #[serde(default)]
    pub items_found: Vec<ItemId>,
    /// Outgoing choices, in display order.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Optional entry requirement.
    #[serde(default)]
    pub lock: Option<Lock>,
    /// Whether the culprit can be named here.
    #[serde(default)]
    pub accusation_scene: bool,
}

/// A collectible item, optionally evidence against one suspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique id.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Item description.
    pub description: String,
    /// Suspect this item implicates, if any.
    #[serde(default)]
    pub clue_for: Option<SuspectId>,
}

/// A person who may have taken the trophy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspect {
    /// Unique id.
    pub id: SuspectId,
    /// Display name.
    pub name: String,
    /// Short background.
    pub description: String,
}

/// Rules applied before an accusation is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccusationPolicy {
    /// Clues the player must hold before any accusation is judged.
    /// Zero disables the gate.
    #[serde(default)]
    pub min_clues: u32,
}

impl AccusationPolicy {
    /// Require at least `min_clues` clues before judging an accusation.
    pub fn with_min_clues(mut self, min_clues: u32) -> Self {
        self.min_clues = min_clues;
        self
    }
}

/// The answer to the mystery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// The one correct suspect.
    pub culprit: SuspectId,
    /// Evidence gating applied to accusations.
    #[serde(default)]
    pub policy: AccusationPolicy,
}

/// Complete static configuration of an adventure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Title of the adventure.
    pub title: String,
    /// Text shown once before the first scene.
    #[serde(default)]
    pub intro: String,
    /// Text shown after the culprit is named.
    #[serde(default)]
    pub victory: String,
    /// Starting location.
    pub start: LocationId,
    /// All locations.
    pub locations: Vec<Location>,
    /// All items.
    pub items: Vec<Item>,
    /// All suspects, in display order.
    pub suspects: Vec<Suspect>,
    /// The mystery's answer.
    pub solution: Solution,
}

impl WorldConfig {
    /// Parse and validate a world from JSON.
    pub fn from_json(json: &str) -> AdventureResult<Self> {
        let world: Self = serde_json::from_str(json)?;
        world.validate()?;
        Ok(world)
    }

    /// Read, parse, and validate a world file.
    pub fn load(path: &Path) -> AdventureResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| AdventureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serialize the world as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> AdventureResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the solution, keeping everything else.
    pub fn with_solution(mut self, solution: Solution) -> Self {
        self.solution = solution;
        self
    }

    /// Look up a location.
    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| &l.id == id)
    }

    /// Look up an item.
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Look up a suspect.
    pub fn suspect(&self, id: &SuspectId) -> Option<&Suspect> {
        self.suspects.iter().find(|s| &s.id == id)
    }

    /// Check that ids are unique and every reference resolves.
    pub fn validate(&self) -> AdventureResult<()> {
        check_unique("location", self.locations.iter().map(|l| l.id.as_str()))?;
        check_unique("item", self.items.iter().map(|i| i.id.as_str()))?;
        check_unique("suspect", self.suspects.iter().map(|s| s.id.as_str()))?;

        if self.location(&self.start).is_none() {
            return Err(unknown("location", self.start.as_str(), "start"));
        }
        if self.suspect(&self.solution.culprit).is_none() {
            return Err(unknown(
                "suspect",
                self.solution.culprit.as_str(),
                "solution",
            ));
        }

        for location in &self.locations {
            let context = format!("location {}", location.id);
            for item in &location.items_found {
                if self.item(item).is_none() {
                    return Err(unknown("item", item.as_str(), &context));
                }
            }
            for choice in &location.choices {
                if self.location(&choice.destination).is_none() {
                    return Err(unknown(
                        "location",
                        choice.destination.as_str(),
                        &context,
                    ));
                }
            }
            if let Some(lock) = &location.lock {
                if self.item(&lock.required_item).is_none() {
                    return Err(unknown("item", lock.required_item.as_str(), &context));
                }
            }
        }

        for item in &self.items {
            if let Some(suspect) = &item.clue_for {
                if self.suspect(suspect).is_none() {
                    return Err(unknown(
                        "suspect",
                        suspect.as_str(),
                        &format!("item {}", item.id),
                    ));
                }
            }
        }

        Ok(())
    }
}

fn check_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> AdventureResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AdventureError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn unknown(kind: &'static str, id: &str, context: &str) -> AdventureError {
    AdventureError::UnknownReference {
        kind,
        id: id.to_string(),
        context: context.to_string(),
    }
}
