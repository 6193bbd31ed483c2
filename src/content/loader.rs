//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::RoomCatalog;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a DataFile<T> wrapper from RON text.
pub fn parse_data_file<T>(file: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    Ok(data.items)
}

/// Parse a single RON struct (not wrapped in DataFile).
pub fn parse_single_file<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Load rooms.ron and gameplay_defaults.ron from `base_path`.
/// Each file loads independently so callers can fall back per file.
pub fn load_all_content(
    base_path: &Path,
) -> (
    Result<RoomCatalog, ContentLoadError>,
    Result<GameplayDefaults, ContentLoadError>,
) {
    let rooms_path = base_path.join("rooms.ron");
    let rooms = read_file(&rooms_path)
        .and_then(|contents| {
            parse_data_file::<RoomDef>(&rooms_path.display().to_string(), &contents)
        })
        .map(RoomCatalog::from_defs);

    let defaults_path = base_path.join("gameplay_defaults.ron");
    let defaults = read_file(&defaults_path).and_then(|contents| {
        parse_single_file::<GameplayDefaults>(&defaults_path.display().to_string(), &contents)
    });

    (rooms, defaults)
}
