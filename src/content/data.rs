//! Content domain: serialized locomotion definitions.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::StatBlock;
use crate::movement::{CollisionTables, GameLayer, MovementTuning};

/// Bumped whenever `locomotion.ron` changes shape incompatibly.
pub const LOCOMOTION_SCHEMA_VERSION: u32 = 1;

/// Top-level contents of `assets/data/locomotion.ron`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocomotionDef {
    pub schema_version: u32,
    pub tuning: MovementTuning,
    pub layers: LayerTableDef,
    pub player: PlayerDefaults,
}

impl Default for LocomotionDef {
    fn default() -> Self {
        Self {
            schema_version: LOCOMOTION_SCHEMA_VERSION,
            tuning: MovementTuning::default(),
            layers: LayerTableDef::default(),
            player: PlayerDefaults::default(),
        }
    }
}

/// Which physics layers count as ground, wall and ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayerTableDef {
    pub ground: Vec<GameLayer>,
    pub wall: Vec<GameLayer>,
    pub ceiling: Vec<GameLayer>,
}

impl Default for LayerTableDef {
    fn default() -> Self {
        Self {
            ground: vec![GameLayer::Ground],
            wall: vec![GameLayer::Wall],
            ceiling: vec![GameLayer::Ceiling, GameLayer::Ground],
        }
    }
}

impl LayerTableDef {
    pub fn to_tables(&self) -> CollisionTables {
        CollisionTables::from_layers(&self.ground, &self.wall, &self.ceiling)
    }
}

/// Values the player is spawned with.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerDefaults {
    pub stats: StatBlock,
    pub max_health: f32,
    pub spawn_point: (f32, f32),
    /// Standing collider width and height.
    pub size: (f32, f32),
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self {
            stats: StatBlock::default(),
            max_health: 100.0,
            spawn_point: (0.0, 100.0),
            size: (24.0, 48.0),
        }
    }
}

impl PlayerDefaults {
    pub fn spawn_position(&self) -> Vec2 {
        Vec2::new(self.spawn_point.0, self.spawn_point.1)
    }

    pub fn collider_size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1)
    }
}
