//! Core domain: fixed-tick rate, camera and the shared control lock.

mod resources;


pub use resources::ControlLock;

use bevy::prelude::*;

/// Physics and controller tick rate.
pub const FIXED_HZ: f64 = 60.0;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlLock>()
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
