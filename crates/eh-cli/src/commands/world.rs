use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(path: Option<&Path>, json: bool) -> Result<(), String> {
    let world = super::load_world(path)?;

    if json {
        let text = world
            .to_json_pretty()
            .map_err(|e| format!("cannot serialize world: {e}"))?;
        println!("{text}");
        return Ok(());
    }

    println!("  {}", world.title.bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Location", "Items", "Exits", "Requires"]);

    for location in &world.locations {
        let name = if location.id == world.start {
            format!("{} (start)", location.name)
        } else {
            location.name.clone()
        };
        let items = names(
            location
                .items_found
                .iter()
                .filter_map(|id| world.item(id).map(|i| i.name.as_str())),
        );
        let exits = if location.accusation_scene {
            "accuse a suspect".to_string()
        } else {
            names(
                location
                    .choices
                    .iter()
                    .filter_map(|c| world.location(&c.destination).map(|l| l.name.as_str())),
            )
        };
        let requires = location
            .lock
            .as_ref()
            .and_then(|lock| world.item(&lock.required_item))
            .map_or_else(|| "-".to_string(), |item| item.name.clone());
        table.add_row(vec![name, items, exits, requires]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} locations, {} items, {} suspects",
        world.locations.len(),
        world.items.len(),
        world.suspects.len()
    );
    Ok(())
}

fn names<'a>(iter: impl Iterator<Item = &'a str>) -> String {
    let joined = iter.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        super::truncate(&joined, 60)
    }
}
