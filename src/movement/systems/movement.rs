//! Movement domain: fixed-tick locomotion systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::StatBlock;
use crate::core::ControlLock;
use crate::movement::body::PhysicsBody;
use crate::movement::{
    AvianBody, CollisionTables, CrouchShape, Headroom, InputSnapshot, MovementTuning, Player,
    PlayerMotor,
};

/// Components the controller drives through [`AvianBody`].
pub(crate) type MotorBody = (
    Entity,
    &'static mut PlayerMotor,
    &'static mut Position,
    &'static mut LinearVelocity,
    &'static mut GravityScale,
    &'static Collider,
    Option<&'static ComputedMass>,
);

pub(crate) fn tick_motor_timers(time: Res<Time>, mut query: Query<&mut PlayerMotor, With<Player>>) {
    let dt = time.delta_secs();

    for mut motor in &mut query {
        motor.tick_timers(dt);
    }
}

/// Jump, dash and attack pulses, then one step of any running dash.
pub(crate) fn resolve_actions(
    time: Res<Time>,
    input: Res<InputSnapshot>,
    tuning: Res<MovementTuning>,
    tables: Res<CollisionTables>,
    lock: Res<ControlLock>,
    spatial: SpatialQuery,
    mut query: Query<MotorBody, With<Player>>,
) {
    let dt = time.delta_secs();
    let locked = lock.is_locked();

    for (entity, mut motor, mut position, mut velocity, mut gravity, collider, mass) in &mut query {
        let mut body = AvianBody::new(
            entity,
            &mut position,
            &mut velocity,
            &mut gravity,
            collider,
            mass,
            &spatial,
        );

        if !locked {
            if input.attack_pressed && !motor.is_dead() {
                motor.cast_requested = true;
            }
            let report = motor.press_actions(&input, &tuning, &mut body);
            if let Some(outcome) = report.jump {
                debug!("Jump request: {:?}", outcome);
            }
            if let Some(Err(refusal)) = report.dash {
                debug!("Dash refused: {:?}", refusal);
            }
        }

        if let Some(outcome) = motor.advance_dash(dt, &tuning, tables.wall, &mut body) {
            debug!("Dash ended: {:?}", outcome);
        }
    }
}

pub(crate) fn apply_horizontal_movement(
    input: Res<InputSnapshot>,
    tuning: Res<MovementTuning>,
    tables: Res<CollisionTables>,
    lock: Res<ControlLock>,
    spatial: SpatialQuery,
    mut query: Query<(MotorBody, Option<&StatBlock>, Option<&CrouchShape>), With<Player>>,
) {
    let fallback_stats = StatBlock::default();
    let interacting = lock.is_locked();

    for (
        (entity, mut motor, mut position, mut velocity, mut gravity, collider, mass),
        stats,
        shape,
    ) in &mut query
    {
        let headroom = shape
            .map(|shape| Headroom::for_shape(shape, tuning.crouch_height_ratio, tables.ceiling))
            .unwrap_or_default();

        let mut body = AvianBody::new(
            entity,
            &mut position,
            &mut velocity,
            &mut gravity,
            collider,
            mass,
            &spatial,
        );

        motor.apply_movement(
            &input,
            stats.unwrap_or(&fallback_stats),
            &tuning,
            interacting,
            headroom,
            &mut body,
        );
        motor.velocity = body.velocity();
    }
}

/// Swap the collider between standing and crouched sizes, keeping the feet in place.
pub(crate) fn resize_crouch_collider(
    tuning: Res<MovementTuning>,
    mut query: Query<
        (&PlayerMotor, &mut CrouchShape, &mut Collider, &mut Position),
        With<Player>,
    >,
) {
    let ratio = tuning.crouch_height_ratio;

    for (motor, mut shape, mut collider, mut position) in &mut query {
        let crouching = motor.is_crouching();
        if crouching == shape.crouched {
            continue;
        }

        let drop = shape.center_drop(ratio);
        if crouching {
            let size = shape.crouched_size(ratio);
            *collider = Collider::rectangle(size.x, size.y);
            position.0.y -= drop;
        } else {
            *collider = Collider::rectangle(shape.standing.x, shape.standing.y);
            position.0.y += drop;
        }
        shape.crouched = crouching;
        debug!("Collider {}", if crouching { "crouched" } else { "standing" });
    }
}

pub(crate) fn sync_sprite_facing(mut query: Query<(&PlayerMotor, &mut Sprite), With<Player>>) {
    for (motor, mut sprite) in &mut query {
        let flip = motor.facing.sign() < 0.0;
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }
}
