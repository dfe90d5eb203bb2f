pub mod course;
pub mod play;
pub mod reset;
pub mod ski;
pub mod world;

use std::path::Path;

use eh_adventure::WorldConfig;

/// Load the world from `path`, or the built-in Eagle Hill world.
fn load_world(path: Option<&Path>) -> Result<WorldConfig, String> {
    match path {
        Some(path) => {
            WorldConfig::load(path).map_err(|e| format!("cannot load {}: {e}", path.display()))
        }
        None => Ok(WorldConfig::eagle_hill()),
    }
}

/// Shorten `text` to at most `max` characters.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
