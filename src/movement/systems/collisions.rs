//! Movement domain: contact sensing from the physics narrow phase.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::sensor::{ContactSample, classify_contact, facing_player};
use crate::movement::{CollisionTables, MovementTuning, Player, PlayerMotor};

pub(crate) fn sense_contacts(
    collisions: Collisions,
    tables: Res<CollisionTables>,
    tuning: Res<MovementTuning>,
    layers: Query<&CollisionLayers>,
    mut players: Query<(Entity, &mut PlayerMotor), With<Player>>,
) {
    for (entity, mut motor) in &mut players {
        let mut sample = ContactSample::default();

        for pair in collisions.collisions_with(entity) {
            if !pair.is_touching() {
                continue;
            }

            for manifold in &pair.manifolds {
                let (other, normal) =
                    facing_player(entity, pair.collider1, pair.collider2, manifold.normal);
                let Ok(other_layers) = layers.get(other) else {
                    continue;
                };
                let kind = classify_contact(other_layers.memberships, normal, &tables);
                if let Some(kind) = kind {
                    sample.record(kind);
                }
            }
        }

        let report = motor.sense(sample, &tuning);
        if report.landed {
            debug!(
                "Landed: jump_count={}, dash_count={}",
                motor.jumps.count, motor.dash.count
            );
        } else if report.left_ground {
            debug!("Left ground: jump_count={}", motor.jumps.count);
        }
        if report.wall_touched {
            debug!(
                "Wall contact: side={}, grace={}",
                motor.wall.side, motor.wall.grace_remaining
            );
        }
    }
}
