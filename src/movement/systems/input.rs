//! Movement domain: keyboard sampling into the input snapshot.

use bevy::prelude::*;

use crate::movement::InputSnapshot;

const LEFT: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const DOWN: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const UP: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const JUMP: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];
const ATTACK: [KeyCode; 1] = [KeyCode::KeyJ];
const DASH: [KeyCode; 2] = [KeyCode::KeyL, KeyCode::KeyE];
const RUN: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::ShiftRight];
const CROUCH: [KeyCode; 2] = [KeyCode::ControlLeft, KeyCode::KeyC];

/// -1, 0 or 1 from a pair of opposing bindings.
fn axis(keyboard: &ButtonInput<KeyCode>, negative: &[KeyCode], positive: &[KeyCode]) -> f32 {
    let mut value = 0.0;
    if keyboard.any_pressed(negative.iter().copied()) {
        value -= 1.0;
    }
    if keyboard.any_pressed(positive.iter().copied()) {
        value += 1.0;
    }
    value
}

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputSnapshot>) {
    input.horizontal = axis(&keyboard, &LEFT, &RIGHT);
    input.vertical = axis(&keyboard, &DOWN, &UP);
    input.run_held = keyboard.any_pressed(RUN);
    input.crouch_held = keyboard.any_pressed(CROUCH);

    // Pulses stay latched until a physics tick consumes them
    input.jump_pressed |= keyboard.any_just_pressed(JUMP);
    input.attack_pressed |= keyboard.any_just_pressed(ATTACK);
    input.dash_pressed |= keyboard.any_just_pressed(DASH);
}

pub(crate) fn consume_input_pulses(mut input: ResMut<InputSnapshot>) {
    input.consume_pulses();
}
