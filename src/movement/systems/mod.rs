//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::sense_contacts;
pub(crate) use input::{consume_input_pulses, read_input};
pub(crate) use movement::{
    apply_horizontal_movement, resize_crouch_collider, resolve_actions, sync_sprite_facing,
    tick_motor_timers,
};
