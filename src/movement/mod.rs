//! Movement domain: the player locomotion controller.
//!
//! Contacts are sensed, actions resolved and horizontal movement applied on
//! the fixed tick, in that order ([`LocomotionSet`]). Input is latched on the
//! display tick and pulses are consumed at the end of each fixed tick.

mod applier;
mod body;
mod bootstrap;
mod components;
mod dash;
#[cfg(feature = "dev-tools")]
mod dev;
mod jump;
mod lifecycle;
mod resources;
mod sensor;
mod systems;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use applier::{Headroom, target_speed};
pub use body::{AvianBody, CastHit, PhysicsBody};
pub use components::{
    CrouchShape, DashBudget, Facing, Footing, Gait, GameLayer, Ground, JumpBudget, Locomotion,
    LocomotionFlags, Look, MotorEvent, Overlays, Player, PlayerMotor, PlayerState, Wall,
    WallContact,
};
pub use dash::{DashOutcome, DashRefusal, DashRun, DashStep};
pub use jump::{ActionReport, JumpOutcome};
pub use resources::{
    CollisionTables, InputSnapshot, MIN_DASH_RANGE, MIN_DASH_TIME, MovementTuning, in_mask,
    mask_of,
};
pub use sensor::{ContactKind, ContactSample, SenseReport, classify_contact, facing_player};

use bevy::prelude::*;

use crate::movement::bootstrap::{audit_player_collaborators, spawn_player};
use crate::movement::systems::{
    apply_horizontal_movement, consume_input_pulses, read_input, resize_crouch_collider,
    resolve_actions, sense_contacts, sync_sprite_facing, tick_motor_timers,
};

/// Ordering of the controller's fixed-tick work.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Contacts and timers.
    Sense,
    /// Jump, dash and attack requests, dash stepping.
    Act,
    /// Horizontal movement, collider resizing, pulse consumption.
    Apply,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<CollisionTables>()
            .init_resource::<InputSnapshot>()
            .configure_sets(
                FixedUpdate,
                (LocomotionSet::Sense, LocomotionSet::Act, LocomotionSet::Apply).chain(),
            )
            .add_systems(Startup, spawn_player)
            .add_systems(Update, (read_input, audit_player_collaborators))
            .add_systems(
                FixedUpdate,
                (sense_contacts, tick_motor_timers)
                    .chain()
                    .in_set(LocomotionSet::Sense),
            )
            .add_systems(FixedUpdate, resolve_actions.in_set(LocomotionSet::Act))
            .add_systems(
                FixedUpdate,
                (
                    apply_horizontal_movement,
                    resize_crouch_collider,
                    consume_input_pulses,
                )
                    .chain()
                    .in_set(LocomotionSet::Apply),
            )
            .add_systems(Update, sync_sprite_facing);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_room)
            .add_systems(Update, dev::debug_hotkeys);
    }
}
