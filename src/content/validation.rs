//! Sanity checks for tuning values loaded from content.

use crate::movement::{MIN_DASH_RANGE, MIN_DASH_TIME, MovementTuning};

/// A tuning value that was out of range and has been clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningIssue {
    pub field: &'static str,
    pub value: f32,
    pub clamped_to: f32,
}

impl std::fmt::Display for TuningIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tuning field '{}' = {} is out of range, using {}",
            self.field, self.value, self.clamped_to
        )
    }
}

/// Clamp `field` into `[min, max]`, recording an issue if it moved.
macro_rules! clamp_field {
    ($issues:expr, $tuning:expr, $field:ident, $min:expr, $max:expr) => {
        let value = $tuning.$field as f32;
        let clamped = if value.is_nan() { $min } else { value.clamp($min, $max) };
        if clamped != value {
            $issues.push(TuningIssue {
                field: stringify!($field),
                value,
                clamped_to: clamped,
            });
            $tuning.$field = clamped as _;
        }
    };
}

/// Bring contradictory or degenerate tuning back into a playable range.
/// Returns one issue per adjusted field, empty if nothing changed.
pub fn sanitize_tuning(tuning: &mut MovementTuning) -> Vec<TuningIssue> {
    let mut issues = Vec::new();

    clamp_field!(issues, tuning, jump_force, 0.0, f32::MAX);
    clamp_field!(issues, tuning, double_jump_multiplier, 0.0, f32::MAX);
    clamp_field!(issues, tuning, max_jumps, 1.0, u8::MAX as f32);
    clamp_field!(issues, tuning, wall_jump_force_y, 0.0, f32::MAX);
    clamp_field!(issues, tuning, wall_jump_grace_time, 0.0, f32::MAX);
    clamp_field!(issues, tuning, wall_jump_lock_time, 0.0, f32::MAX);

    // A zero-length or instant dash would divide by zero when computing its speed
    clamp_field!(issues, tuning, dash_range, MIN_DASH_RANGE, f32::MAX);
    clamp_field!(issues, tuning, dash_time, MIN_DASH_TIME, f32::MAX);
    clamp_field!(issues, tuning, dash_force, 0.0, f32::MAX);
    clamp_field!(issues, tuning, dash_cooldown, 0.0, f32::MAX);

    clamp_field!(issues, tuning, gravity_scale, 0.0, f32::MAX);
    clamp_field!(issues, tuning, landing_time, 0.0, f32::MAX);
    clamp_field!(issues, tuning, takeoff_time, 0.0, f32::MAX);
    clamp_field!(issues, tuning, hurt_time, 0.0, f32::MAX);
    clamp_field!(issues, tuning, hurt_knockback, 0.0, f32::MAX);
    clamp_field!(issues, tuning, attack_wait_timeout, 0.0, f32::MAX);
    clamp_field!(issues, tuning, input_deadzone, 0.0, 0.99);
    clamp_field!(issues, tuning, look_deadzone, 0.0, 0.99);
    clamp_field!(issues, tuning, crouch_height_ratio, 0.1, 1.0);

    issues
}
