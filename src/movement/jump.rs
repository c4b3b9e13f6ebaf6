//! Movement domain: grounded jump, air jumps and wall-jump.

use bevy::prelude::*;

use crate::movement::body::PhysicsBody;
use crate::movement::dash::DashRefusal;
use crate::movement::{InputSnapshot, Locomotion, MotorEvent, MovementTuning, PlayerMotor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    WallJump,
    /// `index` 0 is the first jump since the budget was reset.
    Jump {
        index: u8,
    },
    /// Budget spent in the air, so the request became a dash attempt.
    Dash(Result<(), DashRefusal>),
    Refused,
}

/// What one tick's jump and dash presses did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionReport {
    pub jump: Option<JumpOutcome>,
    pub dash: Option<Result<(), DashRefusal>>,
}

impl PlayerMotor {
    /// Handle the jump press, then the dash press. A jump that already
    /// turned into a dash swallows the dash press of the same tick.
    pub fn press_actions(
        &mut self,
        input: &InputSnapshot,
        tuning: &MovementTuning,
        body: &mut impl PhysicsBody,
    ) -> ActionReport {
        let mut report = ActionReport::default();
        if input.jump_pressed {
            report.jump = Some(self.request_jump(input, tuning, body));
        }
        let dashed = matches!(report.jump, Some(JumpOutcome::Dash(Ok(()))));
        if input.dash_pressed && !dashed {
            report.dash = Some(self.request_dash(tuning, body));
        }
        report
    }

    pub fn can_wall_jump(&self) -> bool {
        !self.grounded && self.wall.in_grace()
    }

    pub fn request_jump(
        &mut self,
        input: &InputSnapshot,
        tuning: &MovementTuning,
        body: &mut impl PhysicsBody,
    ) -> JumpOutcome {
        // Mid-dash the request can only reach the dash guard
        if self.phase.is_dashing() {
            return JumpOutcome::Dash(self.try_start_dash(tuning, body));
        }
        if matches!(self.phase, Locomotion::Dead | Locomotion::Settling { .. }) {
            return JumpOutcome::Refused;
        }

        if self.can_wall_jump() {
            self.wall_jump(input, tuning, body);
            return JumpOutcome::WallJump;
        }

        if self.jumps.count < tuning.max_jumps {
            let index = self.jumps.count;
            let multiplier = if index == 0 {
                1.0
            } else {
                tuning.double_jump_multiplier
            };

            let mut velocity = body.velocity();
            velocity.y = 0.0;
            body.set_velocity(velocity);
            body.add_impulse(Vec2::Y * tuning.jump_force * multiplier);

            self.jumps.count += 1;
            if input.horizontal.abs() > tuning.input_deadzone {
                self.last_move_dir = input.horizontal.signum();
            }
            if self.grounded {
                self.grounded = false;
                self.overlays.takeoff = tuning.takeoff_time;
            }
            debug!("Jump {}: jump_count={}", index + 1, self.jumps.count);
            self.transition(MotorEvent::Jumped);
            return JumpOutcome::Jump { index };
        }

        if !self.grounded {
            self.dash.gate_open = true;
            return JumpOutcome::Dash(self.try_start_dash(tuning, body));
        }

        JumpOutcome::Refused
    }

    fn wall_jump(
        &mut self,
        input: &InputSnapshot,
        tuning: &MovementTuning,
        body: &mut impl PhysicsBody,
    ) {
        let direction = (Vec2::Y + Vec2::new(0.5 * input.horizontal, 0.0)).normalize_or(Vec2::Y);
        body.set_velocity(direction * tuning.wall_jump_force_y);

        self.jumps.reset();
        self.dash.reset();
        self.wall.grace_remaining = 0.0;
        self.wall.release();
        self.overlays.wall_jump_lock = tuning.wall_jump_lock_time;
        debug!(
            "Wall jump: direction={:?}, side={}",
            direction, self.wall.side
        );
        self.transition(MotorEvent::Jumped);
    }
}
