use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use eh_slope::{Course, ObjectKind, RaceConfig, WorldObject};

use crate::glyphs::object_glyph;

/// Characters in the lateral strip drawn per row.
const STRIP_WIDTH: usize = 50;

pub fn run(seed: u64) -> Result<(), String> {
    let config = RaceConfig::default().with_seed(seed);
    let physics = &config.physics;
    let course = Course::generate(&config.course, physics, seed)
        .map_err(|e| format!("invalid course settings: {e}"))?;

    println!(
        "  {} {}",
        "Eagle Hill Course".bold(),
        format!("(seed={seed}, {} objects)", course.len()).dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Distance", "Track", "Free lanes"]);

    for row in rows(course.objects()) {
        let y = row[0].y;
        let lanes = course
            .free_lanes_at(y, physics)
            .iter()
            .map(|(lo, hi)| format!("{lo:.0}-{hi:.0}"))
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row(vec![format!("{y:.0}"), strip(row), lanes]);
    }
    println!("{table}");
    println!();

    let kinds = [
        ObjectKind::Tree,
        ObjectKind::LandmarkRock,
        ObjectKind::LandmarkLodge,
        ObjectKind::IcePatch,
        ObjectKind::GateLeft,
        ObjectKind::GateRight,
    ];
    let counts = kinds
        .iter()
        .map(|k| format!("{} {}", course.count(*k), k.label()))
        .collect::<Vec<_>>()
        .join(", ");
    println!("  {counts}");

    if course.is_navigable(physics) {
        println!("  {}", "Every row leaves a free lane.".green());
    } else {
        println!("  {}", "Some rows are blocked wall to wall.".red());
    }
    Ok(())
}

/// Group objects sharing a downhill position.
fn rows(objects: &[WorldObject]) -> Vec<&[WorldObject]> {
    objects.chunk_by(|a, b| a.y == b.y).collect()
}

fn strip(row: &[WorldObject]) -> String {
    let mut cells = vec!['.'; STRIP_WIDTH];
    let last = STRIP_WIDTH - 1;
    for object in row {
        let cell = ((object.x / 100.0) * last as f64).round() as usize;
        cells[cell.min(last)] = object_glyph(object.kind);
    }
    cells.into_iter().collect()
}
