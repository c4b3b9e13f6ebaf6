//! Movement domain: horizontal velocity, facing and look direction.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::combat::StatBlock;
use crate::movement::body::PhysicsBody;
use crate::movement::resources::DASH_CLEARANCE;
use crate::movement::{
    CrouchShape, Gait, InputSnapshot, Look, MotorEvent, MovementTuning, PlayerMotor,
};

/// Horizontal speed for an axis value. Crouching halves whatever the
/// walk/run choice produced.
pub fn target_speed(horizontal: f32, running: bool, crouching: bool, stats: &StatBlock) -> f32 {
    let base = if running {
        stats.run_speed
    } else {
        stats.move_speed
    };
    let speed = base * horizontal.clamp(-1.0, 1.0);
    if crouching { speed * 0.5 } else { speed }
}

/// Space a crouched body needs above it to stand back up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Headroom {
    pub ceiling: LayerMask,
    /// Height gained by going from the crouched to the standing collider.
    pub rise: f32,
}

impl Default for Headroom {
    fn default() -> Self {
        Self {
            ceiling: LayerMask::NONE,
            rise: 0.0,
        }
    }
}

impl Headroom {
    pub fn for_shape(shape: &CrouchShape, height_ratio: f32, ceiling: LayerMask) -> Self {
        Self {
            ceiling,
            rise: shape.standing.y - shape.crouched_size(height_ratio).y,
        }
    }

    /// Sweep the crouched body up by the rise and report any ceiling in the way.
    /// The floor under the feet shares layers with ceilings, so only
    /// downward-facing surfaces count.
    pub fn is_blocked(&self, body: &impl PhysicsBody) -> bool {
        self.rise > 0.0
            && body
                .cast(Dir2::Y, self.ceiling, self.rise + DASH_CLEARANCE)
                .iter()
                .any(|hit| hit.normal.y < 0.0)
    }
}

impl PlayerMotor {
    /// Write the body's horizontal velocity from input. Returns the value
    /// written, or `None` when this tick left the body alone.
    pub fn apply_movement(
        &mut self,
        input: &InputSnapshot,
        stats: &StatBlock,
        tuning: &MovementTuning,
        interacting: bool,
        headroom: Headroom,
        body: &mut impl PhysicsBody,
    ) -> Option<f32> {
        if interacting || !self.has_control() {
            return None;
        }

        let locked = self.overlays.wall_jump_lock > 0.0;
        let deadzone = tuning.input_deadzone;

        if !locked
            && ((input.horizontal > deadzone && self.facing.sign() < 0.0)
                || (input.horizontal < -deadzone && self.facing.sign() > 0.0))
        {
            self.facing = self.facing.flipped();
        }

        self.overlays.look = Look::from_axis(input.vertical, tuning.look_deadzone);

        // Standing up is refused under a ceiling
        let crouching = self.grounded
            && (input.crouch_held
                || (self.is_crouching()
                    && (self.touching_ceiling || headroom.is_blocked(&*body))));
        let moving = input.horizontal.abs() > deadzone;
        let gait = if crouching {
            Gait::Crouch
        } else if moving && input.run_held {
            Gait::Run
        } else if moving {
            Gait::Walk
        } else {
            Gait::Idle
        };
        self.transition(MotorEvent::GaitChanged(gait));

        if locked || self.overlays.hurt > 0.0 {
            return None;
        }

        let speed = target_speed(input.horizontal, input.run_held, crouching, stats);
        let mut velocity = body.velocity();
        velocity.x = speed;
        body.set_velocity(velocity);
        Some(speed)
    }
}
