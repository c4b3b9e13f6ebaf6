//! Movement domain: components, physics layers and the locomotion state machine.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::animation::AnimTrigger;
use crate::combat::AttackWait;
use crate::movement::dash::DashRun;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Overhangs and low ceilings
    Ceiling,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Sensors (checkpoints, triggers) - should not block movement
    Sensor,
    /// Spells and projectiles
    Spell,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Unit vector pointing where the player faces.
    pub fn direction(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Grounded movement style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gait {
    #[default]
    Idle,
    Walk,
    Run,
    Crouch,
}

/// Look direction from the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Look {
    #[default]
    Level,
    Up,
    Down,
}

impl Look {
    pub fn from_axis(vertical: f32, deadzone: f32) -> Self {
        if vertical > deadzone {
            Look::Up
        } else if vertical < -deadzone {
            Look::Down
        } else {
            Look::Level
        }
    }
}

/// Contact summary the state machine needs to pick a resting phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Footing {
    pub grounded: bool,
    pub on_wall: bool,
}

/// Exclusive locomotion phase. Everything the animation layer sees is
/// projected from this plus [`Overlays`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Locomotion {
    Grounded { gait: Gait },
    #[default]
    Airborne,
    WallSliding,
    Dashing(DashRun),
    /// Short freeze after a dash hits a wall.
    Settling { remaining: f32 },
    Dead,
}

/// Inputs to [`Locomotion::on`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorEvent {
    Landed,
    LeftGround,
    WallTouched,
    WallLost,
    Jumped,
    GaitChanged(Gait),
    DashStarted(DashRun),
    DashFinished,
    DashObstructed { settle: f32 },
    DashCancelled,
    Settled,
    Killed,
    Revived,
}

impl Locomotion {
    fn resting(footing: Footing) -> Self {
        if footing.grounded {
            Locomotion::Grounded { gait: Gait::Idle }
        } else if footing.on_wall {
            Locomotion::WallSliding
        } else {
            Locomotion::Airborne
        }
    }

    /// The one transition function. Events that make no sense in the
    /// current phase leave it unchanged.
    pub fn on(self, event: MotorEvent, footing: Footing) -> Self {
        use Locomotion::*;

        match (self, event) {
            (Dead, MotorEvent::Revived) => Self::resting(footing),
            (Dead, _) => Dead,
            (_, MotorEvent::Killed) => Dead,

            // A dash owns the body until it completes, hits something or is cancelled
            (Dashing(_), MotorEvent::DashFinished | MotorEvent::DashCancelled) => {
                Self::resting(footing)
            }
            (Dashing(_), MotorEvent::DashObstructed { settle }) => Settling { remaining: settle },
            (Dashing(run), _) => Dashing(run),
            (Settling { .. }, MotorEvent::Settled) => Self::resting(footing),
            (Settling { remaining }, _) => Settling { remaining },

            (_, MotorEvent::DashStarted(run)) => Dashing(run),
            (_, MotorEvent::Landed) => Grounded { gait: Gait::Idle },
            (_, MotorEvent::Jumped) => Airborne,
            (Grounded { .. }, MotorEvent::LeftGround) => Self::resting(footing),
            (Grounded { .. }, MotorEvent::GaitChanged(gait)) => Grounded { gait },
            (Airborne, MotorEvent::WallTouched) => WallSliding,
            (WallSliding, MotorEvent::WallLost) => Airborne,
            (state, _) => state,
        }
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self, Locomotion::Dashing(_))
    }

    pub fn gait(&self) -> Option<Gait> {
        match self {
            Locomotion::Grounded { gait } => Some(*gait),
            _ => None,
        }
    }
}

/// Jumps used since the last qualifying ground contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumpBudget {
    pub count: u8,
}

impl JumpBudget {
    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn is_spent(&self, max_jumps: u8) -> bool {
        self.count >= max_jumps
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WallContact {
    pub touching: bool,
    pub sliding: bool,
    /// Horizontal component of the wall's surface normal (+1 = wall on the left).
    pub side: f32,
    /// Seconds left in which a wall-jump is still legal.
    pub grace_remaining: f32,
}

impl WallContact {
    /// Register contact. Returns true only on the first tick of a contact;
    /// the grace window is armed on that edge and never re-armed while held.
    pub fn touch(&mut self, side: f32, grounded: bool, grace_time: f32) -> bool {
        let rising = !self.touching;
        self.touching = true;
        self.sliding = !grounded;
        self.side = side;
        if rising {
            self.grace_remaining = grace_time;
        }
        rising
    }

    /// Returns true if contact was held until now.
    pub fn release(&mut self) -> bool {
        let falling = self.touching;
        self.touching = false;
        self.sliding = false;
        falling
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.touching {
            self.grace_remaining = (self.grace_remaining - dt).max(0.0);
        }
    }

    pub fn in_grace(&self) -> bool {
        self.grace_remaining > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashBudget {
    pub count: u8,
    pub gate_open: bool,
    pub cooldown: f32,
}

impl DashBudget {
    pub fn reset(&mut self) {
        self.count = 0;
        self.gate_open = false;
    }
}

/// State layered on top of the phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overlays {
    pub landing: f32,
    pub hurt: f32,
    pub wall_jump_lock: f32,
    /// Ground contacts are ignored while this runs so the takeoff tick
    /// doesn't register as a landing.
    pub takeoff: f32,
    pub look: Look,
}

/// Everything the player controller owns. Created at spawn, reset on respawn.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerMotor {
    pub phase: Locomotion,
    pub facing: Facing,
    pub grounded: bool,
    pub touching_ceiling: bool,
    pub jumps: JumpBudget,
    pub wall: WallContact,
    pub dash: DashBudget,
    pub overlays: Overlays,
    /// Last nonzero horizontal input sign at the time of a jump.
    pub last_move_dir: f32,
    /// Body velocity sampled at the end of the last physics tick.
    pub velocity: Vec2,
    pub cast_requested: bool,
    pub attack_wait: AttackWait,
    /// One-shot animation cues raised on the physics tick, flushed on the display tick.
    pub cues: Vec<AnimTrigger>,
}

impl PlayerMotor {
    pub fn footing(&self) -> Footing {
        Footing {
            grounded: self.grounded,
            on_wall: self.wall.touching && !self.grounded,
        }
    }

    pub fn transition(&mut self, event: MotorEvent) {
        let next = self.phase.on(event, self.footing());
        if next != self.phase && !matches!(event, MotorEvent::GaitChanged(_)) {
            debug!("Locomotion {:?} --{:?}--> {:?}", self.phase, event, next);
        }
        self.phase = next;
    }

    pub fn is_dead(&self) -> bool {
        self.phase == Locomotion::Dead
    }

    pub fn is_crouching(&self) -> bool {
        self.phase.gait() == Some(Gait::Crouch)
    }

    /// Whether input may steer the body this tick.
    pub fn has_control(&self) -> bool {
        !matches!(
            self.phase,
            Locomotion::Dead | Locomotion::Dashing(_) | Locomotion::Settling { .. }
        )
    }

    pub fn flags(&self) -> LocomotionFlags {
        let gait = self.phase.gait();
        let airborne = matches!(self.phase, Locomotion::Airborne);
        let ascending = airborne && self.velocity.y > 0.0;
        let in_motion_air = matches!(
            self.phase,
            Locomotion::Dashing(_) | Locomotion::Settling { .. }
        ) && !self.grounded;

        LocomotionFlags {
            idle: gait == Some(Gait::Idle)
                || (self.grounded
                    && matches!(
                        self.phase,
                        Locomotion::Dashing(_) | Locomotion::Settling { .. }
                    )),
            walk: gait == Some(Gait::Walk),
            running: gait == Some(Gait::Run),
            crouch: gait == Some(Gait::Crouch),
            jumping: ascending,
            in_mid_air: (airborne && !ascending) || in_motion_air,
            landing: gait.is_some() && self.overlays.landing > 0.0,
            in_wall: self.phase == Locomotion::WallSliding,
            hurt: self.overlays.hurt > 0.0,
            die: self.is_dead(),
            look_up: self.overlays.look == Look::Up,
            look_down: self.overlays.look == Look::Down,
        }
    }

    pub fn player_state(&self) -> PlayerState {
        if self.is_dead() {
            return PlayerState::Dead;
        }
        if self.overlays.hurt > 0.0 {
            return PlayerState::Hurt;
        }
        if self.attack_wait.is_waiting() {
            return PlayerState::Attack;
        }
        match self.phase.gait() {
            Some(Gait::Walk) => PlayerState::Walk,
            Some(Gait::Run) => PlayerState::Run,
            Some(Gait::Idle | Gait::Crouch) => PlayerState::Idle,
            None if self.velocity.y > 0.0 => PlayerState::Jump,
            None => PlayerState::Fall,
        }
    }
}

/// Flag view of the controller consumed by the animation reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocomotionFlags {
    pub idle: bool,
    pub walk: bool,
    pub running: bool,
    pub jumping: bool,
    pub in_mid_air: bool,
    pub landing: bool,
    pub crouch: bool,
    pub in_wall: bool,
    pub hurt: bool,
    pub die: bool,
    pub look_up: bool,
    pub look_down: bool,
}

impl LocomotionFlags {
    pub fn airborne(&self) -> bool {
        self.jumping || self.in_mid_air || self.in_wall
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Walk,
    Run,
    Jump,
    Fall,
    Attack,
    Hurt,
    Dead,
}

/// Standing and crouched collider sizes.
#[derive(Component, Debug, Clone, Copy)]
pub struct CrouchShape {
    pub standing: Vec2,
    pub crouched: bool,
}

impl CrouchShape {
    pub fn new(standing: Vec2) -> Self {
        Self {
            standing,
            crouched: false,
        }
    }

    pub fn crouched_size(&self, height_ratio: f32) -> Vec2 {
        Vec2::new(self.standing.x, self.standing.y * height_ratio)
    }

    /// How far the center moves down when crouching so the feet stay put.
    pub fn center_drop(&self, height_ratio: f32) -> f32 {
        (self.standing.y - self.standing.y * height_ratio) * 0.5
    }
}
