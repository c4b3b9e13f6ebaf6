//! In-memory [`PhysicsBody`] for controller tests.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::movement::{CastHit, PhysicsBody};

/// An axis-aligned box that collides with infinite vertical walls and
/// horizontal ceilings.
#[derive(Debug, Clone)]
pub(crate) struct FakeBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub half_extents: Vec2,
    /// X coordinates of wall faces.
    pub walls: Vec<f32>,
    /// Y coordinates of ceiling undersides.
    pub ceilings: Vec<f32>,
    pub impulses: Vec<Vec2>,
}

impl FakeBody {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
            half_extents: Vec2::splat(0.5),
            walls: Vec::new(),
            ceilings: Vec::new(),
            impulses: Vec::new(),
        }
    }

    pub fn with_wall(mut self, face_x: f32) -> Self {
        self.walls.push(face_x);
        self
    }

    pub fn with_ceiling(mut self, underside_y: f32) -> Self {
        self.ceilings.push(underside_y);
        self
    }
}

impl PhysicsBody for FakeBody {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn add_impulse(&mut self, impulse: Vec2) {
        self.impulses.push(impulse);
        self.velocity += impulse;
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn move_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn cast(&self, direction: Dir2, _mask: LayerMask, max_distance: f32) -> Vec<CastHit> {
        let dx = direction.x;
        if dx.abs() < f32::EPSILON {
            return self.cast_up(direction.y, max_distance);
        }

        let leading_edge = self.position.x + self.half_extents.x * dx.signum();
        self.walls
            .iter()
            .filter_map(|&face| {
                let gap = (face - leading_edge) * dx.signum();
                let distance = gap / dx.abs();
                (gap >= 0.0 && distance <= max_distance).then(|| CastHit {
                    distance,
                    point: Vec2::new(face, self.position.y),
                    normal: Vec2::new(-dx.signum(), 0.0),
                })
            })
            .collect()
    }
}

impl FakeBody {
    fn cast_up(&self, dy: f32, max_distance: f32) -> Vec<CastHit> {
        if dy <= 0.0 {
            return Vec::new();
        }

        let top = self.position.y + self.half_extents.y;
        self.ceilings
            .iter()
            .filter_map(|&underside| {
                let distance = (underside - top) / dy;
                (distance >= 0.0 && distance <= max_distance).then(|| CastHit {
                    distance,
                    point: Vec2::new(self.position.x, underside),
                    normal: Vec2::NEG_Y,
                })
            })
            .collect()
    }
}
