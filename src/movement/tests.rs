//! Movement domain: tests for contact sensing, jumps, wall-jumps, the dash
//! and the locomotion state machine.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::testing::FakeBody;
use super::*;
use crate::animation::AnimTrigger;
use crate::combat::StatBlock;

const DT: f32 = 1.0 / 60.0;

const NO_CEILING: Headroom = Headroom {
    ceiling: LayerMask::NONE,
    rise: 0.0,
};

fn tuning() -> MovementTuning {
    MovementTuning::default()
}

fn ground() -> ContactSample {
    ContactSample {
        ground: true,
        ..default()
    }
}

fn air() -> ContactSample {
    ContactSample::default()
}

fn wall(side: f32) -> ContactSample {
    ContactSample {
        wall: Some(side),
        ..default()
    }
}

fn grounded_motor(tuning: &MovementTuning) -> PlayerMotor {
    let mut motor = PlayerMotor::default();
    motor.sense(ground(), tuning);
    motor
}

fn walls() -> LayerMask {
    CollisionTables::default().wall
}

fn input(horizontal: f32) -> InputSnapshot {
    InputSnapshot {
        horizontal,
        ..default()
    }
}

/// Advance a running dash until it ends. Panics if it never does.
fn run_dash(motor: &mut PlayerMotor, tuning: &MovementTuning, body: &mut FakeBody) -> DashOutcome {
    for _ in 0..600 {
        if let Some(outcome) = motor.advance_dash(DT, tuning, walls(), body) {
            return outcome;
        }
    }
    panic!("dash never ended");
}

// -----------------------------------------------------------------------------
// Contact classification
// -----------------------------------------------------------------------------

#[test]
fn test_classify_contact_by_layer_and_normal() {
    let tables = CollisionTables::default();
    let ground_layer: LayerMask = GameLayer::Ground.into();
    let wall_layer: LayerMask = GameLayer::Wall.into();
    let ceiling_layer: LayerMask = GameLayer::Ceiling.into();
    let enemy_layer: LayerMask = GameLayer::Enemy.into();

    assert_eq!(
        classify_contact(ground_layer, Vec2::Y, &tables),
        Some(ContactKind::Ground)
    );
    assert_eq!(
        classify_contact(wall_layer, Vec2::X, &tables),
        Some(ContactKind::Wall { side: 1.0 })
    );
    assert_eq!(
        classify_contact(wall_layer, Vec2::NEG_X, &tables),
        Some(ContactKind::Wall { side: -1.0 })
    );
    assert_eq!(
        classify_contact(ceiling_layer, Vec2::NEG_Y, &tables),
        Some(ContactKind::Ceiling)
    );
    // Underside of a platform counts as ceiling
    assert_eq!(
        classify_contact(ground_layer, Vec2::NEG_Y, &tables),
        Some(ContactKind::Ceiling)
    );
    // Top of a wall is not ground
    assert_eq!(classify_contact(wall_layer, Vec2::Y, &tables), None);
    assert_eq!(classify_contact(enemy_layer, Vec2::Y, &tables), None);
}

#[test]
fn test_contact_normal_turned_toward_player() {
    let mut world = World::new();
    let player = world.spawn_empty().id();
    let floor = world.spawn_empty().id();
    let tables = CollisionTables::default();
    let ground_layer: LayerMask = GameLayer::Ground.into();

    // Player listed first: the normal points from the player down into the floor
    let (other, normal) = facing_player(player, player, floor, Vec2::NEG_Y);
    assert_eq!(other, floor);
    assert_eq!(normal, Vec2::Y);
    assert_eq!(
        classify_contact(ground_layer, normal, &tables),
        Some(ContactKind::Ground)
    );

    // Floor listed first: the normal already points up at the player
    let (other, normal) = facing_player(player, floor, player, Vec2::Y);
    assert_eq!(other, floor);
    assert_eq!(normal, Vec2::Y);
}

#[test]
fn test_collision_tables_from_layers() {
    let tables = CollisionTables::from_layers(
        &[GameLayer::Ground, GameLayer::Wall],
        &[GameLayer::Wall],
        &[],
    );
    assert!(in_mask(GameLayer::Wall.into(), tables.ground));
    assert!(in_mask(GameLayer::Wall.into(), tables.wall));
    assert!(!in_mask(GameLayer::Ground.into(), tables.wall));
    assert_eq!(tables.ceiling, LayerMask::NONE);
}

// -----------------------------------------------------------------------------
// Sensing
// -----------------------------------------------------------------------------

#[test]
fn test_landing_resets_jump_and_dash_budgets() {
    let tuning = tuning();
    let mut motor = PlayerMotor::default();
    motor.jumps.count = 2;
    motor.dash.count = 1;
    motor.dash.gate_open = true;

    let report = motor.sense(ground(), &tuning);

    assert!(report.landed);
    assert!(motor.grounded);
    assert_eq!(motor.jumps.count, 0);
    assert_eq!(motor.dash.count, 0);
    assert!(!motor.dash.gate_open);
    assert_eq!(motor.overlays.landing, tuning.landing_time);
    assert_eq!(motor.phase, Locomotion::Grounded { gait: Gait::Idle });
}

#[test]
fn test_leaving_ground_goes_airborne() {
    let tuning = tuning();
    let mut motor = grounded_motor(&tuning);

    let report = motor.sense(air(), &tuning);

    assert!(report.left_ground);
    assert!(!motor.grounded);
    assert_eq!(motor.phase, Locomotion::Airborne);
}

#[test]
fn test_takeoff_tick_does_not_register_as_landing() {
    let tuning = tuning();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();

    motor.request_jump(&input(0.0), &tuning, &mut body);
    // Still overlapping the floor on the next tick
    let report = motor.sense(ground(), &tuning);
    assert!(!report.landed);
    assert!(!motor.grounded);
    assert_eq!(motor.jumps.count, 1);

    motor.tick_timers(tuning.takeoff_time + DT);
    let report = motor.sense(ground(), &tuning);
    assert!(report.landed);
    assert_eq!(motor.jumps.count, 0);
}

#[test]
fn test_airborne_wall_touch_grants_one_jump() {
    let tuning = tuning();
    let mut motor = PlayerMotor::default();
    motor.jumps.count = tuning.max_jumps;
    motor.dash.count = 1;

    let report = motor.sense(wall(-1.0), &tuning);

    assert!(report.wall_touched);
    assert_eq!(motor.jumps.count, 1);
    assert_eq!(motor.dash.count, 0);
    assert_eq!(motor.phase, Locomotion::WallSliding);
    assert_eq!(motor.wall.side, -1.0);
    assert!(motor.wall.sliding);
}

#[test]
fn test_grounded_wall_touch_keeps_jump_budget() {
    let tuning = tuning();
    let mut motor = grounded_motor(&tuning);

    motor.sense(
        ContactSample {
            ground: true,
            wall: Some(1.0),
            ceiling: false,
        },
        &tuning,
    );

    assert_eq!(motor.jumps.count, 0);
    assert!(motor.wall.touching);
    assert!(!motor.wall.sliding);
    assert_eq!(motor.phase, Locomotion::Grounded { gait: Gait::Idle });
}

#[test]
fn test_wall_contact_from_ground_becomes_slide_after_jump() {
    let tuning = tuning();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();

    motor.sense(
        ContactSample {
            ground: true,
            wall: Some(1.0),
            ceiling: false,
        },
        &tuning,
    );
    assert_eq!(
        motor.request_jump(&input(0.0), &tuning, &mut body),
        JumpOutcome::Jump { index: 0 }
    );
    assert_eq!(motor.phase, Locomotion::Airborne);

    // Same contact, no new edge, but the player is now sliding
    let report = motor.sense(wall(1.0), &tuning);

    assert!(!report.wall_touched);
    assert!(motor.wall.sliding);
    assert_eq!(motor.phase, Locomotion::WallSliding);
    assert!(motor.flags().in_wall);
    assert_eq!(motor.jumps.count, 1);
}

#[test]
fn test_wall_grace_holds_while_touching_and_drains_after() {
    let tuning = tuning();
    let mut motor = PlayerMotor::default();

    motor.sense(wall(1.0), &tuning);
    motor.tick_timers(1.0);
    assert_eq!(motor.wall.grace_remaining, tuning.wall_jump_grace_time);

    motor.sense(air(), &tuning);
    motor.tick_timers(1.0);
    assert_eq!(motor.wall.grace_remaining, 0.0);
    assert_eq!(motor.phase, Locomotion::Airborne);
}

// -----------------------------------------------------------------------------
// Jumps
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_then_air_jump_then_dash() {
    let tuning = tuning();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();

    assert_eq!(
        motor.request_jump(&input(0.0), &tuning, &mut body),
        JumpOutcome::Jump { index: 0 }
    );
    assert_eq!(body.velocity.y, tuning.jump_force);
    assert_eq!(motor.phase, Locomotion::Airborne);

    motor.sense(air(), &tuning);
    body.velocity.y = -100.0;
    assert_eq!(
        motor.request_jump(&input(0.0), &tuning, &mut body),
        JumpOutcome::Jump { index: 1 }
    );
    // Falling speed is cancelled before the air jump
    assert!((body.velocity.y - tuning.jump_force * tuning.double_jump_multiplier).abs() < 1e-3);

    // Budget spent in the air: the request becomes a dash
    assert_eq!(
        motor.request_jump(&input(0.0), &tuning, &mut body),
        JumpOutcome::Dash(Ok(()))
    );
    assert!(motor.phase.is_dashing());
    assert_eq!(motor.jumps.count, tuning.max_jumps);
}

#[test]
fn test_jump_records_last_move_direction() {
    let tuning = tuning();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();

    motor.request_jump(&input(-0.8), &tuning, &mut body);
    assert_eq!(motor.last_move_dir, -1.0);
}

#[test]
fn test_dead_player_cannot_jump() {
    let tuning = tuning();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();
    motor.kill(&mut body);

    assert_eq!(
        motor.request_jump(&input(0.0), &tuning, &mut body),
        JumpOutcome::Refused
    );
    assert_eq!(body.velocity, Vec2::ZERO);
}

#[test]
fn test_jump_budget_never_exceeds_max_over_random_ticks() {
    let tuning = tuning();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let mut motor = PlayerMotor::default();
    let mut body = FakeBody::new().with_wall(-50.0).with_wall(50.0);

    for _ in 0..5_000 {
        let sample = match rng.random_range(0..10) {
            0..=2 => ground(),
            3..=4 => wall(if rng.random_bool(0.5) { 1.0 } else { -1.0 }),
            _ => air(),
        };
        let report = motor.sense(sample, &tuning);
        if report.landed {
            assert_eq!(motor.jumps.count, 0);
        }
        motor.tick_timers(DT);

        if rng.random_bool(0.3) {
            motor.request_jump(&input(rng.random_range(-1.0..=1.0)), &tuning, &mut body);
        }
        if rng.random_bool(0.1) {
            if rng.random_bool(0.5) {
                motor.facing = motor.facing.flipped();
            }
            let _ = motor.request_dash(&tuning, &mut body);
        }
        motor.advance_dash(DT, &tuning, walls(), &mut body);

        assert!(motor.jumps.count <= tuning.max_jumps);
        assert!(motor.dash.count <= tuning.max_air_dash);
        // Gravity is off exactly while a dash runs
        if motor.phase.is_dashing() {
            assert_eq!(body.gravity_scale, 0.0);
        } else {
            assert_eq!(body.gravity_scale, 1.0);
        }
        // The dash never carries the body through a wall
        assert!(body.position.x + body.half_extents.x <= 50.0 + 1e-3);
        assert!(body.position.x - body.half_extents.x >= -50.0 - 1e-3);
    }
}

// -----------------------------------------------------------------------------
// Wall-jump window
// -----------------------------------------------------------------------------

#[test]
fn test_wall_jump_inside_grace_window() {
    let tuning = tuning();
    let mut motor = PlayerMotor::default();
    let mut body = FakeBody::new();

    motor.sense(wall(1.0), &tuning);
    motor.sense(air(), &tuning);
    motor.tick_timers(0.1);
    assert!(motor.can_wall_jump());

    assert_eq!(
        motor.request_jump(&input(0.0), &tuning, &mut body),
        JumpOutcome::WallJump
    );
    assert!((body.velocity - Vec2::Y * tuning.wall_jump_force_y).length() < 1e-3);
    assert_eq!(motor.jumps.count, 0);
    assert_eq!(motor.wall.grace_remaining, 0.0);
    assert_eq!(motor.overlays.wall_jump_lock, tuning.wall_jump_lock_time);
}

#[test]
fn test_wall_jump_after_grace_window_falls_back_to_jump_budget() {
    let tuning = tuning();
    let mut motor = PlayerMotor::default();
    let mut body = FakeBody::new();

    motor.sense(wall(1.0), &tuning);
    motor.sense(air(), &tuning);
    motor.tick_timers(0.2);
    assert!(!motor.can_wall_jump());

    // The wall touch left one jump used
    assert_eq!(
        motor.request_jump(&input(0.0), &tuning, &mut body),
        JumpOutcome::Jump { index: 1 }
    );
}

#[test]
fn test_wall_jump_lock_blocks_steering_and_wall_contact() {
    let tuning = tuning();
    let stats = StatBlock::default();
    let mut motor = PlayerMotor::default();
    let mut body = FakeBody::new();

    motor.sense(wall(1.0), &tuning);
    motor.request_jump(&input(0.0), &tuning, &mut body);

    let velocity = body.velocity;
    assert_eq!(
        motor.apply_movement(&input(-1.0), &stats, &tuning, false, NO_CEILING, &mut body),
        None
    );
    assert_eq!(body.velocity, velocity);
    assert_eq!(motor.facing, Facing::Right);

    motor.sense(wall(1.0), &tuning);
    assert!(!motor.wall.touching);

    motor.tick_timers(tuning.wall_jump_lock_time + DT);
    assert!(
        motor
            .apply_movement(&input(-1.0), &stats, &tuning, false, NO_CEILING, &mut body)
            .is_some()
    );
    assert_eq!(motor.facing, Facing::Left);
}

// -----------------------------------------------------------------------------
// Dash
// -----------------------------------------------------------------------------

#[test]
fn test_air_dash_completes_with_exit_velocity() {
    let tuning = tuning();
    let mut motor = PlayerMotor::default();
    motor.jumps.count = tuning.max_jumps;
    let mut body = FakeBody::new();

    assert_eq!(motor.request_dash(&tuning, &mut body), Ok(()));
    assert_eq!(motor.dash.count, 1);
    assert_eq!(body.gravity_scale, 0.0);
    assert_eq!(motor.cues, vec![AnimTrigger::Dash]);

    assert_eq!(
        run_dash(&mut motor, &tuning, &mut body),
        DashOutcome::Completed
    );
    assert_eq!(body.velocity, Vec2::X * tuning.dash_force);
    assert_eq!(body.gravity_scale, 1.0);
    assert!((body.position.x - tuning.dash_range).abs() < 1e-2);
    assert_eq!(motor.dash.cooldown, tuning.dash_cooldown);
    assert_eq!(motor.phase, Locomotion::Airborne);
}

#[test]
fn test_dash_into_wall_stops_short_and_rebounds() {
    let tuning = MovementTuning {
        dash_range: 4.0,
        ..tuning()
    };
    let mut motor = PlayerMotor::default();
    motor.jumps.count = tuning.max_jumps;
    // Wall face 1.0 unit ahead of the leading edge
    let mut body = FakeBody::new().with_wall(1.5);

    motor.request_dash(&tuning, &mut body).unwrap();
    let outcome = run_dash(&mut motor, &tuning, &mut body);

    let DashOutcome::Obstructed(hit) = outcome else {
        panic!("expected the wall to stop the dash, got {:?}", outcome);
    };
    assert_eq!(hit.normal, Vec2::NEG_X);
    let travelled = body.position.x;
    assert!(travelled <= 1.0);
    assert!((travelled - (1.0 - 0.25)).abs() < 1e-3);

    assert_eq!(body.impulses.len(), 1);
    assert!(body.impulses[0].x < 0.0);
    assert!(body.impulses[0].y > 0.0);
    assert_eq!(body.gravity_scale, 1.0);
    assert!(motor.cues.contains(&AnimTrigger::DashImpact));
    assert!(matches!(motor.phase, Locomotion::Settling { .. }));
    // An interrupted dash does not start the cooldown
    assert_eq!(motor.dash.cooldown, 0.0);

    motor.tick_timers(0.1);
    assert_eq!(motor.phase, Locomotion::Airborne);
}

#[test]
fn test_dash_while_dashing_resets_jump_count() {
    let tuning = tuning();
    let mut motor = PlayerMotor::default();
    motor.jumps.count = tuning.max_jumps;
    let mut body = FakeBody::new();

    motor.request_dash(&tuning, &mut body).unwrap();
    assert_eq!(
        motor.request_dash(&tuning, &mut body),
        Err(DashRefusal::AlreadyDashing)
    );
    assert_eq!(motor.jumps.count, 0);
    assert_eq!(motor.dash.count, 1);
}

#[test]
fn test_jump_and_dash_in_one_tick_start_a_single_dash() {
    let tuning = tuning();
    let mut motor = PlayerMotor::default();
    motor.jumps.count = tuning.max_jumps;
    let mut body = FakeBody::new();
    let chord = InputSnapshot {
        jump_pressed: true,
        dash_pressed: true,
        ..default()
    };

    let report = motor.press_actions(&chord, &tuning, &mut body);

    assert_eq!(report.jump, Some(JumpOutcome::Dash(Ok(()))));
    assert_eq!(report.dash, None);
    assert!(motor.phase.is_dashing());
    assert_eq!(motor.jumps.count, tuning.max_jumps);
    assert_eq!(motor.dash.count, 1);
}

#[test]
fn test_dash_press_alone_still_reaches_the_dash() {
    let tuning = tuning();
    let mut motor = PlayerMotor::default();
    motor.jumps.count = tuning.max_jumps;
    let mut body = FakeBody::new();
    let dash = InputSnapshot {
        dash_pressed: true,
        ..default()
    };

    let report = motor.press_actions(&dash, &tuning, &mut body);

    assert_eq!(report.jump, None);
    assert_eq!(report.dash, Some(Ok(())));
    assert!(motor.phase.is_dashing());
}

#[test]
fn test_dash_refusals() {
    let tuning = tuning();
    let mut body = FakeBody::new();

    // Grounded: the gate never opens
    let mut motor = grounded_motor(&tuning);
    assert_eq!(
        motor.request_dash(&tuning, &mut body),
        Err(DashRefusal::GateClosed)
    );

    // Airborne with jumps left
    let mut motor = PlayerMotor::default();
    assert_eq!(
        motor.request_dash(&tuning, &mut body),
        Err(DashRefusal::GateClosed)
    );

    // Budget spent
    motor.jumps.count = tuning.max_jumps;
    motor.dash.count = tuning.max_air_dash;
    assert_eq!(
        motor.request_dash(&tuning, &mut body),
        Err(DashRefusal::BudgetSpent)
    );

    // Cooling down
    motor.dash.count = 0;
    motor.dash.cooldown = 0.1;
    assert_eq!(
        motor.request_dash(&tuning, &mut body),
        Err(DashRefusal::CoolingDown)
    );
    assert_eq!(body.gravity_scale, 1.0);
}

#[test]
fn test_death_mid_dash_restores_gravity() {
    let tuning = tuning();
    let mut motor = PlayerMotor::default();
    motor.jumps.count = tuning.max_jumps;
    let mut body = FakeBody::new();

    motor.request_dash(&tuning, &mut body).unwrap();
    motor.advance_dash(DT, &tuning, walls(), &mut body);
    motor.kill(&mut body);

    assert_eq!(motor.phase, Locomotion::Dead);
    assert_eq!(body.gravity_scale, 1.0);
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(motor.advance_dash(DT, &tuning, walls(), &mut body), None);
}

#[test]
fn test_gravity_restored_once() {
    let tuning = tuning();
    let mut body = FakeBody::new();
    body.gravity_scale = 0.7;

    let mut run = DashRun::begin(Vec2::X, &tuning, &mut body);
    assert_eq!(body.gravity_scale, 0.0);
    assert!(!run.gravity_restored());

    assert!(run.restore_gravity(&mut body));
    assert_eq!(body.gravity_scale, 0.7);

    body.gravity_scale = 2.0;
    assert!(!run.restore_gravity(&mut body));
    assert_eq!(body.gravity_scale, 2.0);
}

#[test]
fn test_rebound_direction() {
    let tuning = tuning();
    let mut body = FakeBody::new();
    let run = DashRun::begin(Vec2::X, &tuning, &mut body);

    assert_eq!(run.rebound_direction(Vec2::NEG_X), Vec2::NEG_X);
    // Glancing surface: bounce straight back
    assert_eq!(run.rebound_direction(Vec2::Y), Vec2::NEG_X);
}

#[test]
fn test_zero_length_dash_is_clamped() {
    let tuning = MovementTuning {
        dash_range: 0.0,
        dash_time: 0.0,
        ..tuning()
    };
    assert_eq!(tuning.dash_duration(), MIN_DASH_TIME);
    assert_eq!(tuning.dash_distance(), MIN_DASH_RANGE);
    assert!(tuning.dash_speed().is_finite());
}

// -----------------------------------------------------------------------------
// Horizontal movement
// -----------------------------------------------------------------------------

#[test]
fn test_walk_sets_velocity_and_gait() {
    let tuning = tuning();
    let stats = StatBlock::default();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();

    let written = motor.apply_movement(&input(0.6), &stats, &tuning, false, NO_CEILING, &mut body);

    assert_eq!(written, Some(stats.move_speed * 0.6));
    assert_eq!(body.velocity.x, stats.move_speed * 0.6);
    assert_eq!(motor.phase, Locomotion::Grounded { gait: Gait::Walk });
    let flags = motor.flags();
    assert!(flags.walk);
    assert!(!flags.running);
    assert!(!flags.idle);
}

#[test]
fn test_run_uses_run_speed() {
    let tuning = tuning();
    let stats = StatBlock::default();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();
    let run = InputSnapshot {
        horizontal: -1.0,
        run_held: true,
        ..default()
    };

    motor.apply_movement(&run, &stats, &tuning, false, NO_CEILING, &mut body);

    assert_eq!(body.velocity.x, -stats.run_speed);
    assert_eq!(motor.facing, Facing::Left);
    assert!(motor.flags().running);
}

#[test]
fn test_target_speed() {
    let stats = StatBlock::default();
    assert_eq!(target_speed(1.0, false, false, &stats), stats.move_speed);
    assert_eq!(target_speed(2.0, true, false, &stats), stats.run_speed);
    assert_eq!(target_speed(1.0, false, true, &stats), stats.move_speed * 0.5);
    assert_eq!(target_speed(0.0, true, true, &stats), 0.0);
}

#[test]
fn test_crouch_halves_speed() {
    let tuning = tuning();
    let stats = StatBlock::default();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();
    let crouch = InputSnapshot {
        horizontal: 1.0,
        crouch_held: true,
        ..default()
    };

    motor.apply_movement(&crouch, &stats, &tuning, false, NO_CEILING, &mut body);

    assert!(motor.is_crouching());
    assert_eq!(body.velocity.x, stats.move_speed * 0.5);
    assert!(motor.flags().crouch);
}

#[test]
fn test_cannot_stand_up_under_ceiling() {
    let tuning = tuning();
    let stats = StatBlock::default();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();
    let crouch = InputSnapshot {
        crouch_held: true,
        ..default()
    };

    motor.apply_movement(&crouch, &stats, &tuning, false, NO_CEILING, &mut body);
    motor.sense(
        ContactSample {
            ground: true,
            ceiling: true,
            ..default()
        },
        &tuning,
    );
    motor.apply_movement(&input(0.0), &stats, &tuning, false, NO_CEILING, &mut body);
    assert!(motor.is_crouching());

    motor.sense(ground(), &tuning);
    motor.apply_movement(&input(0.0), &stats, &tuning, false, NO_CEILING, &mut body);
    assert!(!motor.is_crouching());
}

#[test]
fn test_overhang_above_crouched_body_keeps_crouch() {
    let tuning = tuning();
    let stats = StatBlock::default();
    let mut motor = grounded_motor(&tuning);
    let shape = CrouchShape::new(Vec2::new(1.0, 2.0));
    let crouched = shape.crouched_size(0.5);
    // Crouched top at y=0.5, the overhang sits half a unit above it
    let mut body = FakeBody::new().with_ceiling(1.0);
    body.half_extents = crouched * 0.5;
    let headroom = Headroom::for_shape(&shape, 0.5, LayerMask::ALL);
    let crouch = InputSnapshot {
        crouch_held: true,
        ..default()
    };

    motor.apply_movement(&crouch, &stats, &tuning, false, headroom, &mut body);
    // No ceiling contact is reported: the crouched box doesn't reach the overhang
    motor.sense(ground(), &tuning);
    assert!(!motor.touching_ceiling);

    motor.apply_movement(&input(0.0), &stats, &tuning, false, headroom, &mut body);
    assert!(motor.is_crouching());
    assert!(headroom.is_blocked(&body));
}

#[test]
fn test_stands_up_when_overhang_is_out_of_reach() {
    let tuning = tuning();
    let stats = StatBlock::default();
    let mut motor = grounded_motor(&tuning);
    let shape = CrouchShape::new(Vec2::new(1.0, 2.0));
    // Standing top would be at y=1.5; the ceiling is a full unit above that
    let mut body = FakeBody::new().with_ceiling(2.5);
    body.half_extents = shape.crouched_size(0.5) * 0.5;
    let headroom = Headroom::for_shape(&shape, 0.5, LayerMask::ALL);
    let crouch = InputSnapshot {
        crouch_held: true,
        ..default()
    };

    motor.apply_movement(&crouch, &stats, &tuning, false, headroom, &mut body);
    assert!(motor.is_crouching());

    motor.apply_movement(&input(0.0), &stats, &tuning, false, headroom, &mut body);
    assert!(!motor.is_crouching());
}

#[test]
fn test_headroom_ignores_upward_facing_surfaces() {
    let shape = CrouchShape::new(Vec2::new(1.0, 2.0));
    let headroom = Headroom::for_shape(&shape, 0.5, LayerMask::ALL);
    let floor = CastHit {
        distance: 0.0,
        point: Vec2::ZERO,
        normal: Vec2::Y,
    };

    struct FloorOnly(CastHit);
    impl PhysicsBody for FloorOnly {
        fn velocity(&self) -> Vec2 {
            Vec2::ZERO
        }
        fn set_velocity(&mut self, _velocity: Vec2) {}
        fn add_impulse(&mut self, _impulse: Vec2) {}
        fn position(&self) -> Vec2 {
            Vec2::ZERO
        }
        fn move_position(&mut self, _position: Vec2) {}
        fn gravity_scale(&self) -> f32 {
            1.0
        }
        fn set_gravity_scale(&mut self, _scale: f32) {}
        fn cast(&self, _direction: Dir2, _mask: LayerMask, _max_distance: f32) -> Vec<CastHit> {
            vec![self.0]
        }
    }

    assert_eq!(headroom.rise, 1.0);
    assert!(!headroom.is_blocked(&FloorOnly(floor)));
}

#[test]
fn test_crouch_shape_scaling() {
    let shape = CrouchShape::new(Vec2::new(24.0, 48.0));
    let crouched = shape.crouched_size(0.6);

    assert_eq!(crouched.x, 24.0);
    assert!((crouched.y - 28.8).abs() < 1e-4);
    // Feet stay put: the center drops by half the lost height
    assert!((shape.center_drop(0.6) - 9.6).abs() < 1e-4);
    assert_eq!(shape.center_drop(1.0), 0.0);
}

#[test]
fn test_look_direction_from_vertical_axis() {
    let tuning = tuning();
    let stats = StatBlock::default();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();
    let look_up = InputSnapshot {
        vertical: 1.0,
        ..default()
    };

    motor.apply_movement(&look_up, &stats, &tuning, false, NO_CEILING, &mut body);
    assert!(motor.flags().look_up);

    motor.apply_movement(&input(0.0), &stats, &tuning, false, NO_CEILING, &mut body);
    assert!(!motor.flags().look_up);
    assert!(!motor.flags().look_down);
}

#[test]
fn test_interaction_freezes_movement() {
    let tuning = tuning();
    let stats = StatBlock::default();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();

    assert_eq!(
        motor.apply_movement(&input(1.0), &stats, &tuning, true, NO_CEILING, &mut body),
        None
    );
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(motor.phase, Locomotion::Grounded { gait: Gait::Idle });
}

// -----------------------------------------------------------------------------
// Hurt, death and respawn
// -----------------------------------------------------------------------------

#[test]
fn test_hurt_knocks_back_and_cancels_dash() {
    let tuning = tuning();
    let stats = StatBlock::default();
    let mut motor = PlayerMotor::default();
    motor.jumps.count = tuning.max_jumps;
    let mut body = FakeBody::new();

    motor.request_dash(&tuning, &mut body).unwrap();
    motor.hurt(Vec2::new(10.0, 0.0), &tuning, &mut body);

    assert!(!motor.phase.is_dashing());
    assert_eq!(body.gravity_scale, 1.0);
    assert!(body.velocity.x < 0.0);
    assert!(body.velocity.y > 0.0);
    assert!(motor.flags().hurt);

    // No steering while the hurt overlay runs
    assert_eq!(
        motor.apply_movement(&input(1.0), &stats, &tuning, false, NO_CEILING, &mut body),
        None
    );
}

#[test]
fn test_hit_from_straight_above_knocks_backwards() {
    let tuning = tuning();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();

    motor.hurt(Vec2::new(0.0, 30.0), &tuning, &mut body);
    assert!(body.velocity.x < 0.0);

    let mut motor = grounded_motor(&tuning);
    motor.facing = Facing::Left;
    let mut body = FakeBody::new();

    motor.hurt(Vec2::new(0.0, 30.0), &tuning, &mut body);
    assert!(body.velocity.x > 0.0);
}

#[test]
fn test_kill_clears_cast_request() {
    let mut motor = PlayerMotor::default();
    let mut body = FakeBody::new();
    motor.cast_requested = true;

    motor.kill(&mut body);

    assert!(motor.is_dead());
    assert!(!motor.cast_requested);
    assert!(motor.flags().die);
    assert_eq!(motor.player_state(), PlayerState::Dead);
}

#[test]
fn test_revive_resets_controller() {
    let tuning = tuning();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();
    motor.facing = Facing::Left;
    motor.jumps.count = 2;
    motor.kill(&mut body);

    motor.revive(Vec2::new(10.0, 20.0), &tuning, &mut body);

    assert!(!motor.is_dead());
    assert_eq!(motor.phase, Locomotion::Airborne);
    assert_eq!(motor.facing, Facing::Right);
    assert_eq!(motor.jumps.count, 0);
    assert_eq!(body.position, Vec2::new(10.0, 20.0));
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(body.gravity_scale, tuning.gravity_scale);
}

// -----------------------------------------------------------------------------
// State machine
// -----------------------------------------------------------------------------

#[test]
fn test_dead_ignores_everything_but_revive() {
    let airborne = Footing::default();
    for event in [
        MotorEvent::Landed,
        MotorEvent::Jumped,
        MotorEvent::WallTouched,
        MotorEvent::GaitChanged(Gait::Run),
        MotorEvent::Settled,
    ] {
        assert_eq!(Locomotion::Dead.on(event, airborne), Locomotion::Dead);
    }

    let grounded = Footing {
        grounded: true,
        on_wall: false,
    };
    assert_eq!(
        Locomotion::Dead.on(MotorEvent::Revived, grounded),
        Locomotion::Grounded { gait: Gait::Idle }
    );
}

#[test]
fn test_transitions_between_resting_phases() {
    let on_wall = Footing {
        grounded: false,
        on_wall: true,
    };

    assert_eq!(
        Locomotion::Airborne.on(MotorEvent::WallTouched, on_wall),
        Locomotion::WallSliding
    );
    assert_eq!(
        Locomotion::WallSliding.on(MotorEvent::WallLost, Footing::default()),
        Locomotion::Airborne
    );
    assert_eq!(
        Locomotion::Grounded { gait: Gait::Run }.on(MotorEvent::LeftGround, on_wall),
        Locomotion::WallSliding
    );
    // Gait changes only apply on the ground
    assert_eq!(
        Locomotion::Airborne.on(MotorEvent::GaitChanged(Gait::Walk), Footing::default()),
        Locomotion::Airborne
    );
    assert_eq!(
        Locomotion::Settling { remaining: 0.05 }.on(MotorEvent::Jumped, Footing::default()),
        Locomotion::Settling { remaining: 0.05 }
    );
}

#[test]
fn test_flags_are_mutually_consistent() {
    let tuning = tuning();
    let stats = StatBlock::default();
    let mut motor = grounded_motor(&tuning);
    let mut body = FakeBody::new();
    let crouch_run = InputSnapshot {
        horizontal: 1.0,
        run_held: true,
        crouch_held: true,
        ..default()
    };

    motor.apply_movement(&crouch_run, &stats, &tuning, false, NO_CEILING, &mut body);

    let flags = motor.flags();
    assert!(flags.crouch);
    assert!(!flags.running);
    assert!(!flags.airborne());
}
