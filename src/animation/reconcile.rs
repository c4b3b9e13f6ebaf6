//! Display-tick reconciliation of controller state into animation parameters
//! and attack triggers.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::{AnimParam, AnimTrigger, AnimationDriver, AnimationTable, AnimatorParams};
use crate::combat::{
    AttackAnimationFinished, CastSpellEvent, MessageCaster, SpellCaster, StatBlock, WaitStatus,
};
use crate::movement::{LocomotionFlags, MovementTuning, Player, PlayerMotor};

/// The single locomotion parameter shown for a flag set.
/// Death > hurt > airborne > grounded.
pub fn select_primary(flags: &LocomotionFlags) -> Option<AnimParam> {
    if flags.die {
        Some(AnimParam::Die)
    } else if flags.hurt {
        Some(AnimParam::Hurt)
    } else if flags.airborne() {
        if flags.in_wall {
            Some(AnimParam::InWall)
        } else if flags.jumping {
            Some(AnimParam::Jump)
        } else {
            Some(AnimParam::MidAir)
        }
    } else if flags.landing {
        Some(AnimParam::Landing)
    } else if flags.running {
        Some(AnimParam::Run)
    } else if flags.walk {
        Some(AnimParam::Walk)
    } else if flags.idle {
        Some(AnimParam::Idle)
    } else if flags.crouch {
        Some(AnimParam::Crouch)
    } else {
        None
    }
}

/// Clear the driver and set parameters for `flags`. Look up/down only
/// shows on top of idle. Returns the primary parameter.
pub fn reconcile(flags: &LocomotionFlags, driver: &mut impl AnimationDriver) -> Option<AnimParam> {
    driver.clear();

    let primary = select_primary(flags);
    if let Some(param) = primary {
        driver.set_bool(param, true);
    }
    if primary == Some(AnimParam::Idle) {
        if flags.look_up {
            driver.set_bool(AnimParam::LookUp, true);
        } else if flags.look_down {
            driver.set_bool(AnimParam::LookDown, true);
        }
    }
    primary
}

/// Attack clip matching the current locomotion.
pub fn attack_trigger_for(flags: &LocomotionFlags) -> AnimTrigger {
    if flags.airborne() {
        AnimTrigger::MidAirAttack
    } else if flags.running {
        AnimTrigger::RunAttack
    } else if flags.walk {
        AnimTrigger::WalkAttack
    } else {
        AnimTrigger::IdleAttack
    }
}

/// Fire a pending cast request once: pick the attack clip, cast the spell,
/// clear the request and start waiting for the clip to finish.
pub fn handle_attack_logic(
    motor: &mut PlayerMotor,
    stats: &StatBlock,
    tuning: &MovementTuning,
    driver: &mut impl AnimationDriver,
    caster: &mut impl SpellCaster,
) -> Option<AnimTrigger> {
    if !motor.cast_requested {
        return None;
    }
    motor.cast_requested = false;

    if motor.is_dead() || motor.attack_wait.is_waiting() {
        debug!("Cast request dropped: attack already in progress or player dead");
        return None;
    }

    let trigger = attack_trigger_for(&motor.flags());
    driver.trigger(trigger);
    caster.cast_spell(motor.facing.direction(), stats.attack_power);
    motor.attack_wait.start(tuning.attack_wait_timeout);
    Some(trigger)
}

pub(crate) fn reconcile_animation(
    tuning: Res<MovementTuning>,
    table: Res<AnimationTable>,
    mut casts: MessageWriter<CastSpellEvent>,
    mut query: Query<
        (
            Entity,
            &mut PlayerMotor,
            Option<&mut AnimatorParams>,
            Option<&StatBlock>,
        ),
        With<Player>,
    >,
) {
    let fallback_stats = StatBlock::default();

    for (entity, mut motor, params, stats) in &mut query {
        let Some(mut params) = params else {
            // No sink to drive; drop cues and requests so they don't pile up
            motor.cues.clear();
            motor.cast_requested = false;
            continue;
        };

        let flags = motor.flags();
        let previous = params.primary;
        let primary = reconcile(&flags, &mut *params);
        params.primary = primary;
        if primary != previous {
            debug!(
                "Animator {:?} ({:?}): {} -> {}",
                entity,
                motor.player_state(),
                previous.map(|p| table.param_name(p)).unwrap_or("-"),
                primary.map(|p| table.param_name(p)).unwrap_or("-"),
            );
        }

        for cue in motor.cues.drain(..) {
            params.trigger(cue);
        }

        let mut caster = MessageCaster {
            caster: entity,
            writer: &mut casts,
        };
        if let Some(trigger) = handle_attack_logic(
            &mut motor,
            stats.unwrap_or(&fallback_stats),
            &tuning,
            &mut *params,
            &mut caster,
        ) {
            debug!("Attack fired: {}", table.trigger_name(trigger));
        }
    }
}

pub(crate) fn tick_attack_waits(
    time: Res<Time>,
    mut finished: MessageReader<AttackAnimationFinished>,
    mut query: Query<(Entity, &mut PlayerMotor), With<Player>>,
) {
    for event in finished.read() {
        if let Ok((_, mut motor)) = query.get_mut(event.entity) {
            motor.attack_wait.release();
        }
    }

    let dt = time.delta_secs();
    for (entity, mut motor) in &mut query {
        if motor.attack_wait.tick(dt) == WaitStatus::TimedOut {
            warn!(
                "Attack animation on {:?} never reported finishing; releasing wait",
                entity
            );
        }
    }
}

/// Stand-in for the external graph: consume queued triggers each frame.
pub(crate) fn flush_animation_triggers(
    table: Res<AnimationTable>,
    mut query: Query<(Entity, &mut AnimatorParams)>,
) {
    for (entity, mut params) in &mut query {
        if params.pending_triggers().is_empty() {
            continue;
        }
        for trigger in params.drain_triggers() {
            if trigger.is_attack() {
                info!("Animator {:?} playing {}", entity, table.trigger_name(trigger));
            } else {
                debug!("Animator {:?} cue {}", entity, table.trigger_name(trigger));
            }
        }
    }
}
