//! Movement domain: the collision-aware dash.
//!
//! A dash is a [`DashRun`] stored in [`Locomotion::Dashing`] and advanced
//! once per fixed tick. Each step sweeps the body along the dash direction
//! against the wall mask and stops short of the first surface it finds.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::AnimTrigger;
use crate::movement::body::{CastHit, PhysicsBody};
use crate::movement::resources::{
    DASH_CAST_EPSILON, DASH_CLEARANCE, DASH_REBOUND_LIFT, DASH_REBOUND_SCALE, DASH_SETTLE_TIME,
};
use crate::movement::{Locomotion, MotorEvent, MovementTuning, PlayerMotor};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashRun {
    pub direction: Vec2,
    pub elapsed: f32,
    pub duration: f32,
    pub speed: f32,
    pub range: f32,
    pub travelled: f32,
    /// Taken exactly once when gravity is restored.
    gravity_snapshot: Option<f32>,
}

/// Result of one [`DashRun::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashStep {
    Moving,
    Completed,
    Obstructed(CastHit),
}

impl DashRun {
    /// Start a dash: snapshot and disable gravity, stop the body.
    pub fn begin(direction: Vec2, tuning: &MovementTuning, body: &mut impl PhysicsBody) -> Self {
        let snapshot = body.gravity_scale();
        body.set_gravity_scale(0.0);
        body.set_velocity(Vec2::ZERO);

        Self {
            direction: direction.normalize_or(Vec2::X),
            elapsed: 0.0,
            duration: tuning.dash_duration(),
            speed: tuning.dash_speed(),
            range: tuning.dash_distance(),
            travelled: 0.0,
            gravity_snapshot: Some(snapshot),
        }
    }

    pub fn remaining(&self) -> f32 {
        (self.range - self.travelled).max(0.0)
    }

    #[cfg(test)]
    pub fn gravity_restored(&self) -> bool {
        self.gravity_snapshot.is_none()
    }

    /// Move the body one physics sub-step.
    pub fn step(&mut self, dt: f32, wall_mask: LayerMask, body: &mut impl PhysicsBody) -> DashStep {
        let step = (self.speed * dt).min(self.remaining());
        let direction = Dir2::new(self.direction).unwrap_or(Dir2::X);

        let nearest = body
            .cast(direction, wall_mask, step + DASH_CAST_EPSILON)
            .into_iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance));

        // Only a surface closer than this step plus the clearance stops the dash
        if let Some(hit) = nearest.filter(|hit| hit.distance - DASH_CLEARANCE <= step) {
            let advance = (hit.distance - DASH_CLEARANCE).max(0.0);
            body.move_position(body.position() + self.direction * advance);
            body.set_velocity(Vec2::ZERO);
            self.travelled += advance;
            self.elapsed += dt;
            return DashStep::Obstructed(hit);
        }

        body.move_position(body.position() + self.direction * step);
        self.travelled += step;
        self.elapsed += dt;

        if self.elapsed >= self.duration || self.remaining() <= f32::EPSILON {
            DashStep::Completed
        } else {
            DashStep::Moving
        }
    }

    /// Put the pre-dash gravity scale back. Returns false if already done.
    pub fn restore_gravity(&mut self, body: &mut impl PhysicsBody) -> bool {
        match self.gravity_snapshot.take() {
            Some(scale) => {
                body.set_gravity_scale(scale);
                true
            }
            None => false,
        }
    }

    /// Direction to bounce off a surface: its normal when it faces the dash,
    /// otherwise straight back.
    pub fn rebound_direction(&self, normal: Vec2) -> Vec2 {
        if normal.dot(self.direction) < -CONTACT_OPPOSITION {
            normal
        } else {
            -self.direction
        }
    }
}

const CONTACT_OPPOSITION: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashRefusal {
    /// A dash is already running. Resets the jump budget as a side effect.
    AlreadyDashing,
    Unavailable,
    GateClosed,
    BudgetSpent,
    CoolingDown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashOutcome {
    Completed,
    Obstructed(CastHit),
}

impl PlayerMotor {
    /// An explicit dash request. Opens the gate first if the jump budget is
    /// already spent in the air.
    pub fn request_dash(
        &mut self,
        tuning: &MovementTuning,
        body: &mut impl PhysicsBody,
    ) -> Result<(), DashRefusal> {
        if !self.phase.is_dashing() && !self.grounded && self.jumps.is_spent(tuning.max_jumps) {
            self.dash.gate_open = true;
        }
        self.try_start_dash(tuning, body)
    }

    pub fn try_start_dash(
        &mut self,
        tuning: &MovementTuning,
        body: &mut impl PhysicsBody,
    ) -> Result<(), DashRefusal> {
        if self.phase.is_dashing() {
            // Kept from the shipped controller; see DESIGN.md
            self.jumps.reset();
            return Err(DashRefusal::AlreadyDashing);
        }
        if !self.has_control() {
            return Err(DashRefusal::Unavailable);
        }
        if !self.dash.gate_open {
            return Err(DashRefusal::GateClosed);
        }
        if self.dash.count >= tuning.max_air_dash {
            return Err(DashRefusal::BudgetSpent);
        }
        if self.dash.cooldown > 0.0 {
            return Err(DashRefusal::CoolingDown);
        }

        let run = DashRun::begin(self.facing.direction(), tuning, body);
        self.dash.count += 1;
        self.cues.push(AnimTrigger::Dash);
        debug!(
            "Dash started: dir={:?}, speed={}, dash_count={}",
            run.direction, run.speed, self.dash.count
        );
        self.transition(MotorEvent::DashStarted(run));
        Ok(())
    }

    /// Advance a running dash by one fixed tick. Returns how it ended, if it did.
    pub fn advance_dash(
        &mut self,
        dt: f32,
        tuning: &MovementTuning,
        wall_mask: LayerMask,
        body: &mut impl PhysicsBody,
    ) -> Option<DashOutcome> {
        let Locomotion::Dashing(mut run) = self.phase else {
            return None;
        };

        match run.step(dt, wall_mask, body) {
            DashStep::Moving => {
                self.phase = Locomotion::Dashing(run);
                None
            }
            DashStep::Completed => {
                body.set_velocity(run.direction * tuning.dash_force);
                run.restore_gravity(body);
                self.dash.cooldown = tuning.dash_cooldown;
                debug!("Dash completed after {} units", run.travelled);
                self.transition(MotorEvent::DashFinished);
                Some(DashOutcome::Completed)
            }
            DashStep::Obstructed(hit) => {
                let rebound = run.rebound_direction(hit.normal);
                body.add_impulse(
                    (rebound + Vec2::Y * DASH_REBOUND_LIFT) * tuning.dash_force * DASH_REBOUND_SCALE,
                );
                run.restore_gravity(body);
                self.cues.push(AnimTrigger::DashImpact);
                debug!(
                    "Dash obstructed at {:?} after {} units, rebound {:?}",
                    hit.point, run.travelled, rebound
                );
                self.transition(MotorEvent::DashObstructed {
                    settle: DASH_SETTLE_TIME,
                });
                Some(DashOutcome::Obstructed(hit))
            }
        }
    }

    /// End a running dash without its exit velocity. Gravity is restored.
    pub fn cancel_dash(&mut self, body: &mut impl PhysicsBody) -> bool {
        let Locomotion::Dashing(mut run) = self.phase else {
            return false;
        };
        run.restore_gravity(body);
        self.transition(MotorEvent::DashCancelled);
        true
    }
}
