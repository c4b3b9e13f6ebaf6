//! Movement domain: tuning, input and collision-table resources.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::GameLayer;

/// Floor for `dash_time` so the dash speed never divides by zero.
pub const MIN_DASH_TIME: f32 = 0.02;
/// Floor for `dash_range`.
pub const MIN_DASH_RANGE: f32 = 1.0;
/// Extra reach on each dash cast so a surface right at the step end is caught.
pub const DASH_CAST_EPSILON: f32 = 0.5;
/// Gap kept between the body and whatever stopped a dash.
pub const DASH_CLEARANCE: f32 = 0.25;
/// Freeze after a dash slams into a wall.
pub const DASH_SETTLE_TIME: f32 = 0.08;
/// Share of `dash_force` used for the rebound impulse.
pub const DASH_REBOUND_SCALE: f32 = 0.6;
/// Upward tilt added to the rebound direction.
pub const DASH_REBOUND_LIFT: f32 = 0.25;
/// Contact normals must exceed this component to count as ground/wall/ceiling.
pub const CONTACT_NORMAL_THRESHOLD: f32 = 0.5;

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Upward impulse of the first jump.
    pub jump_force: f32,
    /// Scale applied to every jump after the first.
    pub double_jump_multiplier: f32,
    /// Grounded jump plus air jumps.
    pub max_jumps: u8,
    pub wall_jump_force_y: f32,
    pub wall_jump_grace_time: f32,
    pub wall_jump_lock_time: f32,
    pub dash_range: f32,
    pub dash_time: f32,
    /// Exit speed of a finished dash, and base of the rebound impulse.
    pub dash_force: f32,
    pub dash_cooldown: f32,
    pub max_air_dash: u8,
    /// Gravity scale the body rests at outside a dash.
    pub gravity_scale: f32,
    pub landing_time: f32,
    pub takeoff_time: f32,
    pub hurt_time: f32,
    pub hurt_knockback: f32,
    pub attack_wait_timeout: f32,
    pub input_deadzone: f32,
    pub look_deadzone: f32,
    pub crouch_height_ratio: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            jump_force: 620.0,
            double_jump_multiplier: 0.85,
            max_jumps: 2,
            wall_jump_force_y: 640.0,
            wall_jump_grace_time: 0.15,
            wall_jump_lock_time: 0.15,
            dash_range: 160.0,
            dash_time: 0.18,
            dash_force: 420.0,
            dash_cooldown: 0.35,
            max_air_dash: 1,
            gravity_scale: 1.0,
            landing_time: 0.1,
            takeoff_time: 0.08,
            hurt_time: 0.35,
            hurt_knockback: 260.0,
            attack_wait_timeout: 0.6,
            input_deadzone: 0.1,
            look_deadzone: 0.5,
            crouch_height_ratio: 0.6,
        }
    }
}

impl MovementTuning {
    pub fn dash_duration(&self) -> f32 {
        self.dash_time.max(MIN_DASH_TIME)
    }

    pub fn dash_distance(&self) -> f32 {
        self.dash_range.max(MIN_DASH_RANGE)
    }

    pub fn dash_speed(&self) -> f32 {
        self.dash_distance() / self.dash_duration()
    }
}

/// Per-tick input. Axes are overwritten every frame; pulses are latched
/// until a physics tick consumes them.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump_pressed: bool,
    pub attack_pressed: bool,
    pub dash_pressed: bool,
    pub run_held: bool,
    pub crouch_held: bool,
}

impl InputSnapshot {
    pub fn consume_pulses(&mut self) {
        self.jump_pressed = false;
        self.attack_pressed = false;
        self.dash_pressed = false;
    }
}

/// Layer masks used to classify contacts.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CollisionTables {
    pub ground: LayerMask,
    pub wall: LayerMask,
    pub ceiling: LayerMask,
}

impl Default for CollisionTables {
    fn default() -> Self {
        Self {
            ground: GameLayer::Ground.into(),
            wall: GameLayer::Wall.into(),
            ceiling: [GameLayer::Ceiling, GameLayer::Ground].into(),
        }
    }
}

impl CollisionTables {
    pub fn from_layers(ground: &[GameLayer], wall: &[GameLayer], ceiling: &[GameLayer]) -> Self {
        Self {
            ground: mask_of(ground),
            wall: mask_of(wall),
            ceiling: mask_of(ceiling),
        }
    }
}

pub fn mask_of(layers: &[GameLayer]) -> LayerMask {
    layers
        .iter()
        .fold(LayerMask::NONE, |mask, layer| mask | LayerMask::from(*layer))
}

pub fn in_mask(memberships: LayerMask, mask: LayerMask) -> bool {
    (memberships & mask) != LayerMask::NONE
}
