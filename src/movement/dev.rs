//! Movement domain: debug-only test room and hotkeys.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{CheckpointZone, DamageEvent, RespawnEvent};
use crate::core::ControlLock;
use crate::movement::{GameLayer, Ground, Player, PlayerMotor, Wall};

const DEV_LOCK_SOURCE: &str = "dev-dialogue";
const DEV_DAMAGE: f32 = 25.0;

fn block(color: Color, at: Vec2, size: Vec2) -> impl Bundle {
    (
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(at.x, at.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
    )
}

/// A walled box with a floor, two ledges, a wall-jump shaft, a low
/// overhang for crouching under and a checkpoint on the upper ledge.
pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let ceiling_color = Color::srgb(0.45, 0.35, 0.35);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);
    // The overhang's top can be stood on
    let ceiling_layers = CollisionLayers::new(
        [GameLayer::Ceiling, GameLayer::Ground],
        [GameLayer::Player],
    );

    // Floor
    commands.spawn((
        Ground,
        block(ground_color, Vec2::new(0.0, -200.0), Vec2::new(800.0, 40.0)),
        ground_layers,
    ));

    // Outer walls
    for x in [-420.0, 420.0] {
        commands.spawn((
            Wall,
            block(wall_color, Vec2::new(x, 50.0), Vec2::new(40.0, 500.0)),
            wall_layers,
        ));
    }

    // Ledges
    for (at, size) in [
        (Vec2::new(-250.0, -50.0), Vec2::new(150.0, 20.0)),
        (Vec2::new(250.0, 50.0), Vec2::new(150.0, 20.0)),
    ] {
        commands.spawn((Ground, block(ground_color, at, size), ground_layers));
    }

    // Shaft between the left wall and a pillar, narrow enough to wall-jump up
    commands.spawn((
        Wall,
        block(wall_color, Vec2::new(-300.0, 120.0), Vec2::new(30.0, 260.0)),
        wall_layers,
    ));

    // Overhang the player can only pass crouched
    commands.spawn((
        block(ceiling_color, Vec2::new(60.0, -134.0), Vec2::new(160.0, 20.0)),
        ceiling_layers,
    ));

    commands.spawn((
        CheckpointZone {
            respawn_at: Vec2::new(250.0, 100.0),
        },
        Transform::from_xyz(250.0, 90.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(60.0, 60.0),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    ));

    info!("Spawned dev test room");
}

/// F5 respawns a dead player, F6 hurts the player, F7 toggles a fake dialogue lock.
pub(crate) fn debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut lock: ResMut<ControlLock>,
    mut damage: MessageWriter<DamageEvent>,
    mut respawn: MessageWriter<RespawnEvent>,
    players: Query<(Entity, &PlayerMotor, &Transform), With<Player>>,
) {
    if keyboard.just_pressed(KeyCode::F7) {
        if lock.sources.contains(DEV_LOCK_SOURCE) {
            lock.unlock(DEV_LOCK_SOURCE);
        } else {
            lock.lock(DEV_LOCK_SOURCE);
        }
        info!("Dev dialogue lock: {}", lock.is_locked());
    }

    for (entity, motor, transform) in &players {
        if keyboard.just_pressed(KeyCode::F5) {
            respawn.write(RespawnEvent { entity });
        }
        if keyboard.just_pressed(KeyCode::F6) {
            // Hit from in front so the knockback pushes backwards
            let position = transform.translation.truncate();
            damage.write(DamageEvent {
                source: position + motor.facing.direction() * 16.0,
                target: entity,
                amount: DEV_DAMAGE,
            });
        }
    }
}
