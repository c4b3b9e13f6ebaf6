//! Animation domain: typed animator parameters, the name table and the
//! display-tick reconciler.

mod params;
mod reconcile;
mod table;


pub use params::{AnimParam, AnimTrigger, AnimationDriver, AnimatorParams};
pub use reconcile::{attack_trigger_for, handle_attack_logic, reconcile, select_primary};
pub use table::{AnimationTable, TableError};

use bevy::prelude::*;

use crate::animation::reconcile::{
    flush_animation_triggers, reconcile_animation, tick_attack_waits,
};

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimationTable>()
            .add_systems(
                Update,
                (
                    reconcile_animation,
                    flush_animation_triggers,
                    tick_attack_waits,
                )
                    .chain(),
            );
    }
}
