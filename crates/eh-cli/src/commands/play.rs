use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tracing::debug;

use eh_adventure::{AdventureEngine, FileStore, ItemId, LocationId, MoveOutcome, SuspectId};

use crate::glyphs::item_glyph;

type Engine = AdventureEngine<FileStore>;

/// Something the player can pick by number.
enum Action {
    Go { text: String, to: LocationId },
    Accuse { name: String, suspect: SuspectId },
}

impl Action {
    fn label(&self) -> String {
        match self {
            Action::Go { text, .. } => text.clone(),
            Action::Accuse { name, .. } => format!("Accuse {name}"),
        }
    }
}

pub fn run(save_dir: &Path, world: Option<&Path>) -> Result<(), String> {
    let world = super::load_world(world)?;
    debug!(save_dir = %save_dir.display(), title = %world.title, "starting adventure");
    let mut engine = AdventureEngine::load(world, FileStore::new(save_dir));

    if !engine.state().has_seen_intro {
        println!("  {}", engine.world().title.bold());
        if !engine.world().intro.is_empty() {
            println!();
            println!("  {}", engine.world().intro);
        }
        println!();
        engine.mark_intro_seen();
    }

    let found = engine.collect_available();
    announce_found(&engine, &found);
    describe(&engine);
    println!(
        "  {}\n",
        "Type a number to choose, 'help' for commands, 'quit' to exit.".dimmed()
    );

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim().to_ascii_lowercase();
        match input.as_str() {
            "" => continue,
            "quit" | "q" => break,
            "help" | "h" | "?" => print_help(),
            "i" | "inventory" => print_inventory(&engine),
            "evidence" | "e" => print_evidence(&engine),
            "look" | "l" => describe(&engine),
            "restart" => {
                engine.reset_game();
                engine.mark_intro_seen();
                println!("  {}\n", "You start the night over.".bold());
                let found = engine.collect_available();
                announce_found(&engine, &found);
                describe(&engine);
            }
            other => match other.parse::<usize>() {
                Ok(n) => choose(&mut engine, n),
                Err(_) => println!("  {}\n", format!("Unknown command '{other}'.").yellow()),
            },
        }
    }

    Ok(())
}

fn actions(engine: &Engine) -> Vec<Action> {
    let location = engine.current_location();
    let mut actions: Vec<Action> = location
        .choices
        .iter()
        .map(|c| Action::Go {
            text: c.text.clone(),
            to: c.destination.clone(),
        })
        .collect();
    if engine.can_accuse() && !engine.state().game_complete {
        actions.extend(engine.world().suspects.iter().map(|s| Action::Accuse {
            name: s.name.clone(),
            suspect: s.id.clone(),
        }));
    }
    actions
}

fn choose(engine: &mut Engine, n: usize) {
    let mut actions = actions(engine);
    if n == 0 || n > actions.len() {
        println!("  {}\n", format!("There is no option {n}.").yellow());
        return;
    }

    match actions.swap_remove(n - 1) {
        Action::Go { to, .. } => match engine.move_to(&to) {
            MoveOutcome::Moved { .. } => {
                let found = engine.collect_available();
                describe(engine);
                announce_found(engine, &found);
            }
            MoveOutcome::Locked { message } => println!("  {}\n", message.yellow()),
        },
        Action::Accuse { suspect, .. } => {
            let verdict = engine.make_accusation(&suspect);
            if verdict.is_correct() {
                println!("  {}", verdict.message().green().bold());
                let victory = &engine.world().victory;
                if !victory.is_empty() {
                    println!("  {victory}");
                }
                println!(
                    "  {}\n",
                    "Type 'restart' to play again or 'quit' to leave.".dimmed()
                );
            } else {
                println!("  {}\n", verdict.message().yellow());
            }
        }
    }
}

fn describe(engine: &Engine) {
    let location = engine.current_location();
    println!("  {}", location.name.bold().underline());
    println!("  {}", location.description);
    println!();

    if engine.state().game_complete {
        println!("  {}", "The case is closed.".dimmed());
    } else if engine.can_accuse() {
        println!("  {}", "Who is the culprit?".bold());
    }
    for (i, action) in actions(engine).iter().enumerate() {
        println!("  {}. {}", i + 1, action.label());
    }
    println!();
}

fn announce_found(engine: &Engine, found: &[ItemId]) {
    for id in found {
        let item = engine.item(id);
        println!(
            "  {} {}",
            item_glyph(id),
            format!("You found: {}!", item.name).green()
        );
    }
    if !found.is_empty() {
        println!();
    }
}

fn print_inventory(engine: &Engine) {
    let inventory = &engine.state().inventory;
    if inventory.is_empty() {
        println!("  Your pockets are empty.\n");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Item", "Description"]);
    for id in inventory {
        let item = engine.item(id);
        table.add_row(vec![item_glyph(id), item.name.as_str(), item.description.as_str()]);
    }
    println!("{table}\n");
}

fn print_evidence(engine: &Engine) {
    let state = engine.state();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Suspect", "Evidence", "Description"]);
    for suspect in &engine.world().suspects {
        table.add_row(vec![
            suspect.name.clone(),
            state.evidence_against(&suspect.id).to_string(),
            suspect.description.clone(),
        ]);
    }
    println!("{table}");
    println!("  {} clues found\n", state.clues_found);
}

fn print_help() {
    println!("  {}", "Commands".bold());
    println!("  <number>       take a numbered option");
    println!("  i, inventory   list what you carry");
    println!("  e, evidence    show evidence per suspect");
    println!("  l, look        describe where you are");
    println!("  restart        start the mystery over");
    println!("  q, quit        leave (progress is saved)");
    println!();
}
