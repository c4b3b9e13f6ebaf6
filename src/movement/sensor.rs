//! Movement domain: ground, wall and ceiling contact classification.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::resources::{CONTACT_NORMAL_THRESHOLD, in_mask};
use crate::movement::{CollisionTables, Locomotion, MotorEvent, MovementTuning, PlayerMotor};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactKind {
    Ground,
    /// `side` is the horizontal component of the wall normal.
    Wall { side: f32 },
    Ceiling,
}

/// Classify one contact. `normal` points out of the other collider toward the player.
pub fn classify_contact(
    memberships: LayerMask,
    normal: Vec2,
    tables: &CollisionTables,
) -> Option<ContactKind> {
    if in_mask(memberships, tables.ground) && normal.y > CONTACT_NORMAL_THRESHOLD {
        return Some(ContactKind::Ground);
    }
    if in_mask(memberships, tables.wall) && normal.x.abs() > CONTACT_NORMAL_THRESHOLD {
        return Some(ContactKind::Wall {
            side: normal.x.signum(),
        });
    }
    if in_mask(memberships, tables.ceiling) && normal.y < -CONTACT_NORMAL_THRESHOLD {
        return Some(ContactKind::Ceiling);
    }
    None
}

/// The other collider of a touching pair, and the contact normal turned to
/// point from it toward `player`. Narrow-phase normals point from
/// `collider1` to `collider2`.
pub fn facing_player(
    player: Entity,
    collider1: Entity,
    collider2: Entity,
    normal: Vec2,
) -> (Entity, Vec2) {
    if collider1 == player {
        (collider2, -normal)
    } else {
        (collider1, normal)
    }
}

/// All contacts seen by the player during one physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactSample {
    pub ground: bool,
    pub wall: Option<f32>,
    pub ceiling: bool,
}

impl ContactSample {
    pub fn record(&mut self, kind: ContactKind) {
        match kind {
            ContactKind::Ground => self.ground = true,
            ContactKind::Wall { side } => self.wall = Some(side),
            ContactKind::Ceiling => self.ceiling = true,
        }
    }
}

/// Edges produced by one [`PlayerMotor::sense`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SenseReport {
    pub landed: bool,
    pub left_ground: bool,
    pub wall_touched: bool,
    pub wall_lost: bool,
}

impl PlayerMotor {
    /// Fold this tick's contacts into the controller.
    pub fn sense(&mut self, sample: ContactSample, tuning: &MovementTuning) -> SenseReport {
        let mut report = SenseReport::default();

        let ground = sample.ground && self.overlays.takeoff <= 0.0;
        if ground && !self.grounded {
            self.grounded = true;
            self.jumps.reset();
            self.dash.reset();
            self.overlays.landing = tuning.landing_time;
            report.landed = true;
            self.transition(MotorEvent::Landed);
        } else if !ground && self.grounded {
            self.grounded = false;
            report.left_ground = true;
            self.transition(MotorEvent::LeftGround);
        }

        // Wall flags stay cleared for the duration of a wall-jump lockout
        let wall = if self.overlays.wall_jump_lock > 0.0 {
            None
        } else {
            sample.wall
        };
        match wall {
            Some(side) => {
                if self
                    .wall
                    .touch(side, self.grounded, tuning.wall_jump_grace_time)
                {
                    if !self.grounded {
                        self.jumps.count = tuning.max_jumps.min(1);
                    }
                    self.dash.reset();
                    report.wall_touched = true;
                    self.transition(MotorEvent::WallTouched);
                } else {
                    // Contact that began on the ground turns into a slide once airborne
                    let was_sliding = self.wall.sliding;
                    self.wall.sliding = !self.grounded;
                    if self.wall.sliding && !was_sliding {
                        self.transition(MotorEvent::WallTouched);
                    }
                }
            }
            None => {
                if self.wall.release() {
                    report.wall_lost = true;
                    self.transition(MotorEvent::WallLost);
                }
            }
        }

        if sample.ceiling != self.touching_ceiling {
            debug!("Ceiling contact: {}", sample.ceiling);
        }
        self.touching_ceiling = sample.ceiling;

        report
    }

    /// Advance every delta-time driven timer.
    pub fn tick_timers(&mut self, dt: f32) {
        self.wall.tick(dt);

        let overlays = &mut self.overlays;
        for timer in [
            &mut overlays.landing,
            &mut overlays.hurt,
            &mut overlays.wall_jump_lock,
            &mut overlays.takeoff,
            &mut self.dash.cooldown,
        ] {
            *timer = (*timer - dt).max(0.0);
        }

        if let Locomotion::Settling { remaining } = self.phase {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.transition(MotorEvent::Settled);
            } else {
                self.phase = Locomotion::Settling { remaining };
            }
        }
    }
}
