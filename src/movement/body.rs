//! Movement domain: the physics body seam used by the controller.

use avian2d::prelude::*;
use bevy::prelude::*;

/// One result of a directional shape cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastHit {
    /// Distance the body can travel before touching the surface.
    pub distance: f32,
    pub point: Vec2,
    /// Outward normal of the surface that was hit.
    pub normal: Vec2,
}

/// What the controller needs from a rigid body.
pub trait PhysicsBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn add_impulse(&mut self, impulse: Vec2);
    fn position(&self) -> Vec2;
    fn move_position(&mut self, position: Vec2);
    fn gravity_scale(&self) -> f32;
    fn set_gravity_scale(&mut self, scale: f32);
    /// Sweep the body's shape along `direction` and report surfaces in `mask`.
    fn cast(&self, direction: Dir2, mask: LayerMask, max_distance: f32) -> Vec<CastHit>;
}

/// Maximum surfaces collected by one cast.
const MAX_CAST_HITS: u32 = 8;

/// [`PhysicsBody`] over avian components of one entity.
pub struct AvianBody<'a, 'w, 's> {
    entity: Entity,
    position: &'a mut Position,
    velocity: &'a mut LinearVelocity,
    gravity: &'a mut GravityScale,
    collider: &'a Collider,
    inverse_mass: f32,
    spatial: &'a SpatialQuery<'w, 's>,
}

impl<'a, 'w, 's> AvianBody<'a, 'w, 's> {
    pub fn new(
        entity: Entity,
        position: &'a mut Position,
        velocity: &'a mut LinearVelocity,
        gravity: &'a mut GravityScale,
        collider: &'a Collider,
        mass: Option<&ComputedMass>,
        spatial: &'a SpatialQuery<'w, 's>,
    ) -> Self {
        Self {
            entity,
            position,
            velocity,
            gravity,
            collider,
            inverse_mass: mass.map(|m| m.inverse()).unwrap_or(1.0),
            spatial,
        }
    }
}

impl PhysicsBody for AvianBody<'_, '_, '_> {
    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn add_impulse(&mut self, impulse: Vec2) {
        self.velocity.0 += impulse * self.inverse_mass;
    }

    fn position(&self) -> Vec2 {
        self.position.0
    }

    fn move_position(&mut self, position: Vec2) {
        self.position.0 = position;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity.0
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity.0 = scale;
    }

    fn cast(&self, direction: Dir2, mask: LayerMask, max_distance: f32) -> Vec<CastHit> {
        let filter = SpatialQueryFilter::from_mask(mask).with_excluded_entities([self.entity]);
        let config = ShapeCastConfig::from_max_distance(max_distance);

        self.spatial
            .shape_hits(
                self.collider,
                self.position.0,
                0.0,
                direction,
                MAX_CAST_HITS,
                &config,
                &filter,
            )
            .into_iter()
            .map(|hit| CastHit {
                distance: hit.distance,
                point: hit.point1,
                normal: hit.normal1,
            })
            .collect()
    }
}
