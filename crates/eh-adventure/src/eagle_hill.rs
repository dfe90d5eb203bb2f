//! The built-in "Phantom of Eagle Hill" world.

use crate::ids::{ItemId, LocationId, SuspectId};
use crate::world::{
    AccusationPolicy, Choice, Item, Location, Lock, Solution, Suspect, WorldConfig,
};

impl WorldConfig {
    /// The Eagle Hill mystery shipped with the game.
    ///
    /// Coach Thornton is the culprit and accusations are not evidence-gated.
    /// Both are plain configuration; override them with
    /// [`WorldConfig::with_solution`].
    pub fn eagle_hill() -> Self {
        Self {
            title: "The Phantom of Eagle Hill".to_string(),
            intro: "The night before the big race against Cardigan, the Eagle Trophy \
                    vanished from the Eaglebrook trophy case. The snow is still falling \
                    and whoever took it cannot have gone far. Find the trophy and name \
                    the thief."
                .to_string(),
            victory: "The Eagle Trophy is safe, back in its case before the race.".to_string(),
            start: LocationId::new("DORM_ROOM"),
            locations: locations(),
            items: items(),
            suspects: suspects(),
            solution: Solution {
                culprit: SuspectId::new("COACH_THORNTON"),
                policy: AccusationPolicy::default(),
            },
        }
    }
}

fn location(id: &str, name: &str, description: &str) -> Location {
    Location {
        id: LocationId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        items_found: Vec::new(),
        choices: Vec::new(),
        lock: None,
        accusation_scene: false,
    }
}

fn ids(items: &[&str]) -> Vec<ItemId> {
    items.iter().copied().map(ItemId::new).collect()
}

fn locations() -> Vec<Location> {
    let mut dorm = location(
        "DORM_ROOM",
        "Dorm Room",
        "Your room is quiet. The radiator hisses. Outside, the wind howls against the window.",
    );
    dorm.items_found = ids(&["SKI_GOGGLES"]);
    dorm.choices = vec![
        Choice::new("Go to Ski Lodge", "SKI_LODGE"),
        Choice::new("Go to The Rock", "THE_ROCK"),
    ];

    let mut lodge = location(
        "SKI_LODGE",
        "Ski Lodge",
        "The fire is dying out. Shadows dance on the walls. A locker stands ajar in the corner.",
    );
    lodge.items_found = ids(&["TORN_FABRIC"]);
    lodge.choices = vec![
        Choice::new("Return to Dorm Room", "DORM_ROOM"),
        Choice::new("Go to The Rock", "THE_ROCK"),
        Choice::new("Go to Frozen Pond", "FROZEN_POND"),
    ];

    let mut rock = location(
        "THE_ROCK",
        "The Rock",
        "A massive boulder overlooking the campus. A common meeting spot. The snow is disturbed here.",
    );
    rock.items_found = ids(&["SHED_KEY", "BOOT_PRINT_PHOTO"]);
    rock.choices = vec![
        Choice::new("Go to Dorm Room", "DORM_ROOM"),
        Choice::new("Climb Eagle Hill Summit", "EAGLE_HILL_SUMMIT"),
        Choice::new("Go to Ski Lodge", "SKI_LODGE"),
    ];

    let mut summit = location(
        "EAGLE_HILL_SUMMIT",
        "Eagle Hill Summit",
        "The peak of the mountain. The air is thin and biting. Tracks lead towards the cliff edge.",
    );
    summit.items_found = ids(&["CARDIGAN_SKI_PASS"]);
    summit.lock = Some(Lock {
        required_item: ItemId::new("SKI_GOGGLES"),
        message: Some(
            "The wind and snow are blinding! You need eye protection to proceed safely up the mountain."
                .to_string(),
        ),
    });
    summit.choices = vec![
        Choice::new("Descend to The Rock", "THE_ROCK"),
        Choice::new("Follow tracks to Frozen Pond", "FROZEN_POND"),
    ];

    let mut pond = location(
        "FROZEN_POND",
        "Frozen Pond",
        "The lake is a sheet of ice. In the center, something flutters in the wind, caught in the frozen surface.",
    );
    pond.items_found = ids(&["CLIPBOARD_PAGE"]);
    pond.choices = vec![
        Choice::new("Go to Ski Lodge", "SKI_LODGE"),
        Choice::new("Go to Old Equipment Shed", "OLD_EQUIPMENT_SHED"),
    ];

    let mut shed = location(
        "OLD_EQUIPMENT_SHED",
        "Old Equipment Shed",
        "A run-down shack near the edge of the woods. The door is reinforced iron.",
    );
    shed.items_found = ids(&["EAGLE_TROPHY"]);
    shed.lock = Some(Lock {
        required_item: ItemId::new("SHED_KEY"),
        message: Some(
            "The door is locked tight. It looks like it needs an old iron key.".to_string(),
        ),
    });
    shed.accusation_scene = true;

    vec![dorm, lodge, rock, summit, pond, shed]
}

fn item(id: &str, name: &str, description: &str, clue_for: Option<&str>) -> Item {
    Item {
        id: ItemId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        clue_for: clue_for.map(SuspectId::new),
    }
}

fn items() -> Vec<Item> {
    vec![
        item(
            "SKI_GOGGLES",
            "Ski Goggles",
            "Professional grade. Essential for high altitude visibility.",
            None,
        ),
        item(
            "TORN_FABRIC",
            "Torn Crimson Fabric",
            "A piece of an old Eaglebrook jacket.",
            Some("JAKE_MORRISON"),
        ),
        item("SHED_KEY", "Shed Key", "Rusted iron key.", None),
        // Which suspect the tread pattern points to is undecided; it stays
        // with the coach until the mystery is rewritten.
        item(
            "BOOT_PRINT_PHOTO",
            "Boot Print Photo",
            "Photo of an unusual tread pattern found near The Rock.",
            Some("COACH_THORNTON"),
        ),
        item(
            "CARDIGAN_SKI_PASS",
            "Cardigan Ski Pass",
            "A visitor pass for a rival school student.",
            Some("MARCUS_CHEN"),
        ),
        item(
            "CLIPBOARD_PAGE",
            "Clipboard Page",
            "Notes on race strategy and sabotage.",
            Some("COACH_THORNTON"),
        ),
        item(
            "EAGLE_TROPHY",
            "The Eagle Trophy",
            "The golden eagle statue, shining in the cold light.",
            None,
        ),
    ]
}

fn suspects() -> Vec<Suspect> {
    let suspect = |id: &str, name: &str, description: &str| Suspect {
        id: SuspectId::new(id),
        name: name.to_string(),
        description: description.to_string(),
    };
    vec![
        suspect(
            "MARCUS_CHEN",
            "Marcus Chen",
            "A Cardigan student who snuck onto campus.",
        ),
        suspect(
            "COACH_THORNTON",
            "Coach Thornton",
            "The Cardigan ski coach, tired of losing.",
        ),
        suspect(
            "JAKE_MORRISON",
            "Jake Morrison",
            "Former Eaglebrook student who transferred to Cardigan.",
        ),
    ]
}
