//! Combat domain: health, hurt/death/respawn flow and the spell-cast seam.

mod components;
mod events;
mod spell;
mod systems;


pub use components::{AttackWait, Checkpoint, CheckpointZone, Health, StatBlock, WaitStatus};
pub use events::{AttackAnimationFinished, CastSpellEvent, DamageEvent, DeathEvent, RespawnEvent};
pub use spell::{MessageCaster, SpellCaster};

use bevy::prelude::*;

use crate::combat::systems::{apply_player_damage, handle_respawn, update_checkpoints};
use crate::movement::LocomotionSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<RespawnEvent>()
            .add_message::<CastSpellEvent>()
            .add_message::<AttackAnimationFinished>()
            .add_systems(
                FixedUpdate,
                (update_checkpoints, apply_player_damage, handle_respawn)
                    .chain()
                    .before(LocomotionSet::Sense),
            );
    }
}
