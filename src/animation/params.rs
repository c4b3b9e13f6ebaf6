//! Typed animation parameters and the driver sink.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Boolean parameters of the player's animation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AnimParam {
    Idle,
    Walk,
    Run,
    Jump,
    MidAir,
    Landing,
    Crouch,
    InWall,
    Hurt,
    Die,
    LookUp,
    LookDown,
}

impl AnimParam {
    pub const ALL: [AnimParam; 12] = [
        AnimParam::Idle,
        AnimParam::Walk,
        AnimParam::Run,
        AnimParam::Jump,
        AnimParam::MidAir,
        AnimParam::Landing,
        AnimParam::Crouch,
        AnimParam::InWall,
        AnimParam::Hurt,
        AnimParam::Die,
        AnimParam::LookUp,
        AnimParam::LookDown,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One-shot triggers of the player's animation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AnimTrigger {
    Dash,
    DashImpact,
    MidAirAttack,
    RunAttack,
    WalkAttack,
    IdleAttack,
}

impl AnimTrigger {
    pub const ALL: [AnimTrigger; 6] = [
        AnimTrigger::Dash,
        AnimTrigger::DashImpact,
        AnimTrigger::MidAirAttack,
        AnimTrigger::RunAttack,
        AnimTrigger::WalkAttack,
        AnimTrigger::IdleAttack,
    ];

    pub fn is_attack(self) -> bool {
        matches!(
            self,
            AnimTrigger::MidAirAttack
                | AnimTrigger::RunAttack
                | AnimTrigger::WalkAttack
                | AnimTrigger::IdleAttack
        )
    }
}

/// Fire-and-forget sink for animation parameters.
pub trait AnimationDriver {
    /// Set every boolean parameter to false.
    fn clear(&mut self);
    fn set_bool(&mut self, param: AnimParam, value: bool);
    fn trigger(&mut self, trigger: AnimTrigger);
}

/// Parameter block read by the external animation graph.
#[derive(Component, Debug, Clone, Default)]
pub struct AnimatorParams {
    bools: [bool; AnimParam::ALL.len()],
    /// Triggers not yet consumed by the graph.
    pending: Vec<AnimTrigger>,
    /// Primary parameter chosen by the last reconciliation.
    pub primary: Option<AnimParam>,
}

impl AnimatorParams {
    pub fn get(&self, param: AnimParam) -> bool {
        self.bools[param.index()]
    }

    #[cfg(test)]
    pub fn active(&self) -> impl Iterator<Item = AnimParam> + '_ {
        AnimParam::ALL.into_iter().filter(|p| self.get(*p))
    }

    pub fn pending_triggers(&self) -> &[AnimTrigger] {
        &self.pending
    }

    /// Hand pending triggers to the graph.
    pub fn drain_triggers(&mut self) -> Vec<AnimTrigger> {
        std::mem::take(&mut self.pending)
    }
}

impl AnimationDriver for AnimatorParams {
    fn clear(&mut self) {
        self.bools = [false; AnimParam::ALL.len()];
    }

    fn set_bool(&mut self, param: AnimParam, value: bool) {
        self.bools[param.index()] = value;
    }

    fn trigger(&mut self, trigger: AnimTrigger) {
        self.pending.push(trigger);
    }
}
