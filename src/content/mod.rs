//! Content domain: data-driven locomotion tuning, collision tables, player
//! defaults and the animator name table.

mod data;
mod loader;
mod validation;


pub use data::{LOCOMOTION_SCHEMA_VERSION, LayerTableDef, LocomotionDef, PlayerDefaults};
pub use loader::{ContentLoadError, load_animation_table, load_locomotion, parse_locomotion};
pub use validation::{TuningIssue, sanitize_tuning};

use bevy::prelude::*;
use std::path::Path;

use crate::animation::AnimationTable;

/// Directory the data files are read from, relative to the working directory.
pub const DATA_DIR: &str = "assets/data";
pub const LOCOMOTION_FILE: &str = "locomotion.ron";
pub const ANIMATOR_FILE: &str = "animator.json";

/// Everything read from disk at startup, already sanitized.
#[derive(Debug, Clone)]
pub struct LoadedContent {
    pub locomotion: LocomotionDef,
    pub animation_table: AnimationTable,
}

/// Load both data files from `base_path`. Anything missing or malformed is
/// replaced by built-in defaults and reported with a warning.
pub fn load_content(base_path: &Path) -> LoadedContent {
    let mut locomotion = match load_locomotion(&base_path.join(LOCOMOTION_FILE)) {
        Ok(def) => {
            info!("Loaded locomotion content (schema v{})", def.schema_version);
            def
        }
        Err(e) => {
            warn!("{}; using built-in locomotion defaults", e);
            LocomotionDef::default()
        }
    };

    for issue in sanitize_tuning(&mut locomotion.tuning) {
        warn!("{}", issue);
    }

    let animation_table = match load_animation_table(&base_path.join(ANIMATOR_FILE)) {
        Ok(table) => {
            info!("Loaded animator table (version {})", table.version);
            table
        }
        Err(e) => {
            warn!("{}; using built-in animator names", e);
            AnimationTable::default()
        }
    };

    LoadedContent {
        locomotion,
        animation_table,
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let content = load_content(Path::new(DATA_DIR));
        let LocomotionDef {
            tuning,
            layers,
            player,
            ..
        } = content.locomotion;

        app.insert_resource(layers.to_tables())
            .insert_resource(tuning)
            .insert_resource(player)
            .insert_resource(content.animation_table);
    }
}
