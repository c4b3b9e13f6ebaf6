//! Parameter-name table shared with the animation graph.
//!
//! Loaded from JSON and checked once at load time: every parameter and
//! trigger needs a non-empty, unique name.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::{AnimParam, AnimTrigger};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    Io(String),
    Parse(String),
    MissingParam(AnimParam),
    MissingTrigger(AnimTrigger),
    EmptyName(String),
    DuplicateName(String),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Io(e) => write!(f, "IO error: {}", e),
            TableError::Parse(e) => write!(f, "Parse error: {}", e),
            TableError::MissingParam(p) => write!(f, "no name for parameter {:?}", p),
            TableError::MissingTrigger(t) => write!(f, "no name for trigger {:?}", t),
            TableError::EmptyName(key) => write!(f, "empty name for {}", key),
            TableError::DuplicateName(name) => write!(f, "name '{}' used twice", name),
        }
    }
}

/// Raw table JSON structure.
#[derive(Deserialize)]
struct TableJson {
    version: u32,
    params: HashMap<AnimParam, String>,
    triggers: HashMap<AnimTrigger, String>,
}

#[derive(Resource, Debug, Clone)]
pub struct AnimationTable {
    pub version: u32,
    params: HashMap<AnimParam, String>,
    triggers: HashMap<AnimTrigger, String>,
}

impl Default for AnimationTable {
    fn default() -> Self {
        let params = AnimParam::ALL
            .into_iter()
            .map(|p| {
                let name = match p {
                    AnimParam::Idle => "IsIdle",
                    AnimParam::Walk => "IsWalk",
                    AnimParam::Run => "IsRunning",
                    AnimParam::Jump => "IsJumping",
                    AnimParam::MidAir => "IsInMidAir",
                    AnimParam::Landing => "IsLanding",
                    AnimParam::Crouch => "IsCrouch",
                    AnimParam::InWall => "IsInWall",
                    AnimParam::Hurt => "IsHurt",
                    AnimParam::Die => "IsDie",
                    AnimParam::LookUp => "IsLookUp",
                    AnimParam::LookDown => "IsLookDown",
                };
                (p, name.to_string())
            })
            .collect();
        let triggers = AnimTrigger::ALL
            .into_iter()
            .map(|t| (t, format!("{:?}", t)))
            .collect();

        Self {
            version: 1,
            params,
            triggers,
        }
    }
}

impl AnimationTable {
    pub fn from_json_str(contents: &str) -> Result<Self, TableError> {
        let raw: TableJson =
            serde_json::from_str(contents).map_err(|e| TableError::Parse(e.to_string()))?;
        let table = Self {
            version: raw.version,
            params: raw.params,
            triggers: raw.triggers,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, TableError> {
        let contents = fs::read_to_string(path).map_err(|e| TableError::Io(e.to_string()))?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        let mut seen = HashSet::new();

        for param in AnimParam::ALL {
            let name = self
                .params
                .get(&param)
                .ok_or(TableError::MissingParam(param))?;
            check_name(name, || format!("{:?}", param), &mut seen)?;
        }
        for trigger in AnimTrigger::ALL {
            let name = self
                .triggers
                .get(&trigger)
                .ok_or(TableError::MissingTrigger(trigger))?;
            check_name(name, || format!("{:?}", trigger), &mut seen)?;
        }
        Ok(())
    }

    pub fn param_name(&self, param: AnimParam) -> &str {
        self.params.get(&param).map(String::as_str).unwrap_or("")
    }

    pub fn trigger_name(&self, trigger: AnimTrigger) -> &str {
        self.triggers.get(&trigger).map(String::as_str).unwrap_or("")
    }
}

fn check_name<'a>(
    name: &'a str,
    key: impl FnOnce() -> String,
    seen: &mut HashSet<&'a str>,
) -> Result<(), TableError> {
    if name.trim().is_empty() {
        return Err(TableError::EmptyName(key()));
    }
    if !seen.insert(name) {
        return Err(TableError::DuplicateName(name.to_string()));
    }
    Ok(())
}
