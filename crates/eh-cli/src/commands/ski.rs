use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tracing::debug;

use eh_slope::{
    ActorState, Autopilot, InputSource, InputState, Race, RaceConfig, RaceEventKind, RaceStatus,
};

pub fn run(
    seed: u64,
    max_ticks: u64,
    autopilot: bool,
    tuck: bool,
    show_events: bool,
) -> Result<(), String> {
    let config = RaceConfig::default().with_seed(seed);
    let mut race = Race::new(config).map_err(|e| format!("cannot set up race: {e}"))?;

    let mut input: Box<dyn InputSource> = if autopilot {
        Box::new(Autopilot::new(race.config().physics.clone()).with_tuck(tuck))
    } else if tuck {
        Box::new(InputState::NONE.tucked())
    } else {
        Box::new(InputState::NONE)
    };
    let status = race.run(input.as_mut(), max_ticks);
    debug!(?status, ticks = race.clock().tick(), "race ended");

    let mode = match (autopilot, tuck) {
        (true, true) => "autopilot, tucking",
        (true, false) => "autopilot",
        (false, true) => "straight, tucking",
        (false, false) => "straight",
    };
    println!(
        "  {} {}",
        "Eagle Hill Downhill".bold(),
        format!("(seed={seed}, {mode})").dimmed()
    );
    println!();

    let verdict = match status {
        RaceStatus::Finished => "FINISHED".green().bold(),
        RaceStatus::Crashed => "CRASHED".red().bold(),
        RaceStatus::Racing => "STOPPED".yellow().bold(),
        RaceStatus::StartScreen => "NOT STARTED".dimmed(),
    };
    println!(
        "  {verdict} after {} ticks ({:.2}s)",
        race.clock().tick(),
        race.clock().elapsed_secs()
    );
    println!();

    let finish = race.config().finish_distance;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Skier", "Distance", "Lateral", "Speed", "Finish"]);
    table.add_row(skier_row("You", race.player(), finish, race.finish_time()));
    table.add_row(skier_row(
        "Opponent",
        race.ai(),
        finish,
        race.opponent_finish_time(),
    ));
    println!("{table}");
    println!();

    match (race.finish_time(), race.opponent_finish_time()) {
        (Some(you), Some(them)) if you < them => println!("  {}", "You won the race!".green()),
        (Some(_), None) => println!("  {}", "You won the race!".green()),
        (_, Some(_)) => println!("  {}", "The opponent won the race.".yellow()),
        _ => {}
    }

    if show_events {
        println!();
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in race.events().iter() {
            let tick_label = format!("[tick {:>5}]", event.tick).dimmed();
            let desc = match event.kind {
                RaceEventKind::Crashed { .. } => event.description.red().to_string(),
                RaceEventKind::Finished { .. } => event.description.green().to_string(),
                _ => event.description.clone(),
            };
            println!("  {tick_label} {desc}");
        }
    }

    Ok(())
}

fn skier_row(name: &str, skier: &ActorState, finish: f64, time: Option<f64>) -> Vec<String> {
    let progress = (skier.y / finish * 100.0).min(100.0);
    vec![
        name.to_string(),
        format!("{:.0} ({progress:.0}%)", skier.y),
        format!("{:.1}", skier.x),
        format!("{:.1}", skier.speed_y),
        time.map_or_else(|| "-".to_string(), |t| format!("{t:.2}s")),
    ]
}
