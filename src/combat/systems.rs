//! Combat domain: damage, death, respawn and checkpoint systems.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{Checkpoint, CheckpointZone, DamageEvent, DeathEvent, Health, RespawnEvent};
use crate::movement::{AvianBody, MovementTuning, Player, PlayerMotor};

type PlayerBody = (
    &'static mut PlayerMotor,
    &'static mut Health,
    &'static mut Position,
    &'static mut LinearVelocity,
    &'static mut GravityScale,
    &'static Collider,
    Option<&'static ComputedMass>,
);

pub(crate) fn apply_player_damage(
    spatial: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut query: Query<PlayerBody, With<Player>>,
) {
    for event in damage_events.read() {
        let Ok((mut motor, mut health, mut position, mut velocity, mut gravity, collider, mass)) =
            query.get_mut(event.target)
        else {
            continue;
        };
        if motor.is_dead() {
            continue;
        }

        let dealt = health.take_damage(event.amount);
        let mut body = AvianBody::new(
            event.target,
            &mut position,
            &mut velocity,
            &mut gravity,
            collider,
            mass,
            &spatial,
        );

        if health.is_dead() {
            motor.kill(&mut body);
            death_events.write(DeathEvent {
                entity: event.target,
            });
            info!("Player {:?} died", event.target);
        } else {
            motor.hurt(event.source, &tuning, &mut body);
            info!(
                "Player took {} damage, health {}/{}",
                dealt, health.current, health.max
            );
        }
    }
}

pub(crate) fn handle_respawn(
    spatial: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut respawn_events: MessageReader<RespawnEvent>,
    mut query: Query<(PlayerBody, Option<&Checkpoint>), With<Player>>,
) {
    for event in respawn_events.read() {
        let Ok((
            (mut motor, mut health, mut position, mut velocity, mut gravity, collider, mass),
            checkpoint,
        )) = query.get_mut(event.entity)
        else {
            warn!("Respawn requested for {:?}, which is not a player", event.entity);
            continue;
        };
        if !motor.is_dead() {
            warn!("Respawn requested for living player {:?}, ignoring", event.entity);
            continue;
        }

        let spawn_at = checkpoint.map(|c| c.0).unwrap_or(position.0);
        let mut body = AvianBody::new(
            event.entity,
            &mut position,
            &mut velocity,
            &mut gravity,
            collider,
            mass,
            &spatial,
        );
        motor.revive(spawn_at, &tuning, &mut body);
        health.refill();
        info!("Player {:?} respawned at {:?}", event.entity, spawn_at);
    }
}

/// Touching a checkpoint zone moves the player's respawn point there.
pub(crate) fn update_checkpoints(
    mut collision_events: MessageReader<CollisionStart>,
    zones: Query<&CheckpointZone>,
    mut players: Query<&mut Checkpoint, With<Player>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player_entity, zone_entity) in pairs {
            let Ok(mut checkpoint) = players.get_mut(player_entity) else {
                continue;
            };
            let Ok(zone) = zones.get(zone_entity) else {
                continue;
            };
            if checkpoint.0 != zone.respawn_at {
                checkpoint.0 = zone.respawn_at;
                info!("Checkpoint set to {:?}", zone.respawn_at);
            }
        }
    }
}
