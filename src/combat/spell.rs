//! Combat domain: the spell spawner seam.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::CastSpellEvent;

pub trait SpellCaster {
    fn cast_spell(&mut self, direction: Vec2, power: f32);
}

/// [`SpellCaster`] that forwards casts as [`CastSpellEvent`] messages.
pub struct MessageCaster<'a, 'w> {
    pub caster: Entity,
    pub writer: &'a mut MessageWriter<'w, CastSpellEvent>,
}

impl SpellCaster for MessageCaster<'_, '_> {
    fn cast_spell(&mut self, direction: Vec2, power: f32) {
        self.writer.write(CastSpellEvent {
            caster: self.caster,
            direction,
            power,
        });
    }
}
