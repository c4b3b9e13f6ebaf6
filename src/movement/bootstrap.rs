//! Movement domain: player spawn and collaborator audit.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::AnimatorParams;
use crate::combat::{Checkpoint, Health, StatBlock};
use crate::content::PlayerDefaults;
use crate::movement::{CrouchShape, GameLayer, MovementTuning, Player, PlayerMotor};

/// Spawn the player from [`PlayerDefaults`], or built-in values if content
/// never provided them.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    defaults: Option<Res<PlayerDefaults>>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let defaults = match defaults {
        Some(defaults) => defaults.clone(),
        None => {
            warn!("PlayerDefaults not available, using built-in player values");
            PlayerDefaults::default()
        }
    };
    let size = defaults.collider_size();
    let spawn_at = defaults.spawn_position();

    let entity = commands
        .spawn((
            // Identity & controller
            (
                Player,
                PlayerMotor::default(),
                defaults.stats.clone(),
                Health::new(defaults.max_health),
                Checkpoint(spawn_at),
                AnimatorParams::default(),
                CrouchShape::new(size),
            ),
            // Rendering
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(spawn_at.x, spawn_at.y, 0.0),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(size.x, size.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(tuning.gravity_scale),
                Mass(1.0),
                Friction::new(0.0),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Player,
                    [
                        GameLayer::Ground,
                        GameLayer::Wall,
                        GameLayer::Ceiling,
                        GameLayer::Enemy,
                        GameLayer::Sensor,
                    ],
                ),
            ),
        ))
        .id();

    info!(
        "Spawned player {:?} at {:?} with {} health",
        entity, spawn_at, defaults.max_health
    );
}

/// Report collaborators the controller expects but the player lacks.
/// The matching behaviour silently does nothing without them.
pub(crate) fn audit_player_collaborators(
    query: Query<
        (
            Entity,
            Has<PlayerMotor>,
            Has<RigidBody>,
            Has<Collider>,
            Has<AnimatorParams>,
            Has<StatBlock>,
            Has<Health>,
        ),
        Added<Player>,
    >,
) {
    for (entity, motor, body, collider, animator, stats, health) in &query {
        let missing: Vec<&str> = [
            (motor, "PlayerMotor"),
            (body, "RigidBody"),
            (collider, "Collider"),
            (animator, "AnimatorParams"),
            (stats, "StatBlock"),
            (health, "Health"),
        ]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, name)| name)
        .collect();

        if !missing.is_empty() {
            warn!(
                "Player {:?} is missing {}; the matching behaviour is disabled",
                entity,
                missing.join(", ")
            );
        }
    }
}
