//! Property tests for the evidence and accusation invariants.

use std::collections::HashSet;

use eh_adventure::{
    AdventureEngine, GameState, ItemId, LocationId, MemoryStore, SAVE_KEY, SuspectId, WorldConfig,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    PickUp(usize),
    Move(usize),
    Accuse(usize),
    Reset,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0..7usize).prop_map(Action::PickUp),
        3 => (0..6usize).prop_map(Action::Move),
        1 => (0..3usize).prop_map(Action::Accuse),
        1 => Just(Action::Reset),
    ]
}

fn assert_invariants(engine: &AdventureEngine<MemoryStore>) {
    let world = engine.world();
    let state = engine.state();

    let unique: HashSet<&ItemId> = state.inventory.iter().collect();
    assert_eq!(unique.len(), state.inventory.len(), "duplicate inventory ids");

    let clues = state
        .inventory
        .iter()
        .filter(|id| world.item(id).is_some_and(|i| i.clue_for.is_some()))
        .count() as u32;
    assert_eq!(state.clues_found, clues);

    for suspect in &world.suspects {
        let expected = state
            .inventory
            .iter()
            .filter(|id| {
                world
                    .item(id)
                    .is_some_and(|i| i.clue_for.as_ref() == Some(&suspect.id))
            })
            .count() as u32;
        assert_eq!(state.evidence_against(&suspect.id), expected);
    }

    let solved = state.accusation.as_ref() == Some(&world.solution.culprit);
    assert_eq!(state.game_complete, solved);
}

proptest! {
    #[test]
    fn pickups_keep_counters_consistent(picks in prop::collection::vec(0..7usize, 0..30)) {
        let world = WorldConfig::eagle_hill();
        let ids: Vec<ItemId> = world.items.iter().map(|i| i.id.clone()).collect();
        let mut engine = AdventureEngine::load(world, MemoryStore::new());

        for pick in picks {
            engine.pick_up_item(&ids[pick]);
            assert_invariants(&engine);
        }
    }

    #[test]
    fn any_action_sequence_keeps_invariants(actions in prop::collection::vec(action(), 0..40)) {
        let world = WorldConfig::eagle_hill();
        let items: Vec<ItemId> = world.items.iter().map(|i| i.id.clone()).collect();
        let locations: Vec<LocationId> = world.locations.iter().map(|l| l.id.clone()).collect();
        let suspects: Vec<SuspectId> = world.suspects.iter().map(|s| s.id.clone()).collect();
        let mut engine = AdventureEngine::load(world, MemoryStore::new());

        for action in actions {
            match action {
                Action::PickUp(i) => {
                    engine.pick_up_item(&items[i]);
                }
                Action::Move(i) => {
                    let before = engine.state().clone();
                    if engine.move_to(&locations[i]).is_success() {
                        prop_assert_eq!(&engine.state().current_location, &locations[i]);
                        engine.collect_available();
                    } else {
                        prop_assert_eq!(engine.state(), &before);
                    }
                }
                Action::Accuse(i) => {
                    let before = engine.state().clone();
                    if !engine.make_accusation(&suspects[i]).is_correct() {
                        prop_assert_eq!(engine.state(), &before);
                    }
                }
                Action::Reset => engine.reset_game(),
            }
            assert_invariants(&engine);
        }
    }

    #[test]
    fn reset_always_returns_to_initial(picks in prop::collection::vec(0..7usize, 0..10)) {
        let world = WorldConfig::eagle_hill();
        let ids: Vec<ItemId> = world.items.iter().map(|i| i.id.clone()).collect();
        let mut engine = AdventureEngine::load(world, MemoryStore::new());
        for pick in picks {
            engine.pick_up_item(&ids[pick]);
        }

        engine.reset_game();
        let initial = GameState::initial(engine.world());
        prop_assert_eq!(engine.state(), &initial);

        let store = engine.into_store();
        prop_assert!(store.get(SAVE_KEY).is_none());
        let reloaded = AdventureEngine::load(WorldConfig::eagle_hill(), store);
        prop_assert_eq!(reloaded.state(), &initial);
    }
}
