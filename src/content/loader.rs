//! Loader for the locomotion RON file and animator table at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{LOCOMOTION_SCHEMA_VERSION, LocomotionDef};
use crate::animation::AnimationTable;

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

/// RON options with `IMPLICIT_SOME` so optional fields can be written bare.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse locomotion content from a RON string. `file` only labels errors.
pub fn parse_locomotion(contents: &str, file: &str) -> Result<LocomotionDef, ContentLoadError> {
    let def: LocomotionDef = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    if def.schema_version != LOCOMOTION_SCHEMA_VERSION {
        return Err(ContentLoadError {
            file: file.to_string(),
            message: format!(
                "schema_version {} is not supported (expected {})",
                def.schema_version, LOCOMOTION_SCHEMA_VERSION
            ),
        });
    }
    Ok(def)
}

pub fn load_locomotion(path: &Path) -> Result<LocomotionDef, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_locomotion(&contents, &file_name)
}

pub fn load_animation_table(path: &Path) -> Result<AnimationTable, ContentLoadError> {
    AnimationTable::load_from_file(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: e.to_string(),
    })
}
