//! Movement domain: hurt, death and respawn transitions.

use bevy::prelude::*;

use crate::movement::body::PhysicsBody;
use crate::movement::{MotorEvent, MovementTuning, PlayerMotor};

const KNOCKBACK_SIDE_EPSILON: f32 = 1e-3;

impl PlayerMotor {
    /// Take a hit from `source`. Cancels a running dash and knocks the body away.
    pub fn hurt(&mut self, source: Vec2, tuning: &MovementTuning, body: &mut impl PhysicsBody) {
        if self.is_dead() {
            return;
        }
        self.cancel_dash(body);

        // A hit from straight above pushes the player backwards
        let dx = (body.position() - source).x;
        let away = if dx.abs() < KNOCKBACK_SIDE_EPSILON {
            -self.facing.sign()
        } else {
            dx.signum()
        };
        body.set_velocity(Vec2::ZERO);
        body.add_impulse(Vec2::new(away, 0.5).normalize() * tuning.hurt_knockback);
        self.overlays.hurt = tuning.hurt_time;
    }

    pub fn kill(&mut self, body: &mut impl PhysicsBody) {
        if self.is_dead() {
            return;
        }
        self.cancel_dash(body);
        body.set_velocity(Vec2::ZERO);
        self.cast_requested = false;
        self.transition(MotorEvent::Killed);
    }

    /// Back to spawn defaults at `checkpoint`.
    pub fn revive(
        &mut self,
        checkpoint: Vec2,
        tuning: &MovementTuning,
        body: &mut impl PhysicsBody,
    ) {
        let dead = self.phase;
        *self = PlayerMotor::default();
        self.phase = dead.on(MotorEvent::Revived, self.footing());

        body.move_position(checkpoint);
        body.set_velocity(Vec2::ZERO);
        body.set_gravity_scale(tuning.gravity_scale);
    }
}
