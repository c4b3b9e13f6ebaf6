//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Vec2,
    pub target: Entity,
    pub amount: f32,
}

impl Message for DamageEvent {}

#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

/// Request to bring a dead player back at its checkpoint.
#[derive(Debug)]
pub struct RespawnEvent {
    pub entity: Entity,
}

impl Message for RespawnEvent {}

/// Handed to the spell spawner; projectile lifetime is its business.
#[derive(Debug, Clone, PartialEq)]
pub struct CastSpellEvent {
    pub caster: Entity,
    pub direction: Vec2,
    pub power: f32,
}

impl Message for CastSpellEvent {}

/// Sent by the animation graph when an attack clip ends.
#[derive(Debug)]
pub struct AttackAnimationFinished {
    pub entity: Entity,
}

impl Message for AttackAnimationFinished {}
