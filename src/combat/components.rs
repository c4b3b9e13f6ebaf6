//! Combat domain: components and combat-related state types.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Health component for damageable entities
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Read-only stats the controller consumes.
#[derive(Component, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatBlock {
    pub move_speed: f32,
    pub run_speed: f32,
    /// Power handed to each spell cast.
    pub attack_power: f32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            move_speed: 220.0,
            run_speed: 340.0,
            attack_power: 10.0,
        }
    }
}

/// Where the player comes back after dying.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint(pub Vec2);

/// Sensor area that moves the respawn point.
#[derive(Component, Debug, Clone, Copy)]
pub struct CheckpointZone {
    pub respawn_at: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    Idle,
    Waiting,
    TimedOut,
}

/// Bounded wait for the animation graph to finish an attack.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttackWait {
    remaining: Option<f32>,
}

impl AttackWait {
    pub fn start(&mut self, timeout: f32) {
        self.remaining = Some(timeout.max(0.0));
    }

    pub fn is_waiting(&self) -> bool {
        self.remaining.is_some()
    }

    /// The graph reported the attack finished. Returns false if nothing was pending.
    pub fn release(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    pub fn tick(&mut self, dt: f32) -> WaitStatus {
        let Some(remaining) = self.remaining else {
            return WaitStatus::Idle;
        };
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            self.remaining = None;
            WaitStatus::TimedOut
        } else {
            self.remaining = Some(remaining);
            WaitStatus::Waiting
        }
    }
}
