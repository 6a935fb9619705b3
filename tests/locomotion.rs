use bevy_wade::math::{Float, Quaternion, Vector2, Vector3};
use bevy_wade::projection::WadeCameraBasis;
use bevy_wade::{
    LocomotionState, WadeEnvironmentSample, WadeLocomotion, WadeMovementConfig, WadeStepError,
    WadeStepInput, WadeStepOutput, GROUNDED_STICK_VELOCITY,
};

const DT: Float = 0.1;

const GROUNDED: WadeEnvironmentSample = WadeEnvironmentSample {
    grounded: true,
    submerged: false,
};
const IN_AIR: WadeEnvironmentSample = WadeEnvironmentSample {
    grounded: false,
    submerged: false,
};
const IN_WATER: WadeEnvironmentSample = WadeEnvironmentSample {
    grounded: false,
    submerged: true,
};

fn assert_close(actual: Float, expected: Float) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

fn step(
    locomotion: &mut WadeLocomotion,
    config: &WadeMovementConfig,
    input: WadeStepInput,
    sample: WadeEnvironmentSample,
) -> WadeStepOutput {
    locomotion
        .step(DT, config, &input, sample, None)
        .expect("step with valid arguments")
}

fn jump() -> WadeStepInput {
    WadeStepInput {
        jump_pressed: true,
        ..Default::default()
    }
}

#[test]
fn spawns_grounded_and_at_rest() {
    let locomotion = WadeLocomotion::default();
    assert_eq!(locomotion.state(), LocomotionState::Grounded);
    assert_eq!(locomotion.vertical_velocity(), 0.0);
    assert!(!locomotion.is_jumping());
}

#[test]
fn walking_forward_for_one_step() {
    let config = WadeMovementConfig {
        walk_speed: 5.0,
        gravity: 9.81,
        ..Default::default()
    };
    let mut locomotion = WadeLocomotion::default();
    let output = step(
        &mut locomotion,
        &config,
        WadeStepInput::moving(Vector2::new(0.0, 1.0)),
        GROUNDED,
    );

    assert_close(output.displacement.x, 0.0);
    assert_close(output.displacement.z, -0.5);
    // Velocity started at zero, so there is nothing to clamp and only gravity applies.
    assert_close(output.displacement.y, -0.0981);
    assert_close(locomotion.vertical_velocity(), -0.981);
    assert_eq!(locomotion.state(), LocomotionState::Grounded);
}

#[test]
fn grounded_clamp_happens_before_gravity() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, Default::default(), GROUNDED);
    let output = step(&mut locomotion, &config, Default::default(), GROUNDED);

    let expected_velocity = GROUNDED_STICK_VELOCITY - config.gravity * DT;
    assert_close(locomotion.vertical_velocity(), expected_velocity);
    assert_close(output.displacement.y, expected_velocity * DT);

    // Standing still keeps the velocity stable rather than accumulating.
    step(&mut locomotion, &config, Default::default(), GROUNDED);
    assert_close(locomotion.vertical_velocity(), expected_velocity);
}

#[test]
fn jump_takeoff_velocity_reaches_apex_height() {
    let config = WadeMovementConfig {
        gravity: 9.81,
        jump_apex_height: 2.0,
        ..Default::default()
    };
    assert_close(config.jump_takeoff_velocity(), 6.26418);

    let mut locomotion = WadeLocomotion::default();
    let output = step(&mut locomotion, &config, jump(), GROUNDED);
    assert!(locomotion.is_jumping());
    assert_close(locomotion.vertical_velocity(), 6.26418 - 0.981);
    assert_close(output.displacement.y, (6.26418 - 0.981) * DT);
}

#[test]
fn holding_jump_does_not_trigger_another_boost() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, jump(), GROUNDED);
    let after_takeoff = locomotion.vertical_velocity();

    // The backend may still report contact right after takeoff.
    step(&mut locomotion, &config, jump(), GROUNDED);
    assert_close(
        locomotion.vertical_velocity(),
        after_takeoff - config.gravity * DT,
    );

    for _ in 0..3 {
        let before = locomotion.vertical_velocity();
        step(&mut locomotion, &config, jump(), IN_AIR);
        assert_eq!(locomotion.state(), LocomotionState::Airborne);
        assert_close(locomotion.vertical_velocity(), before - config.gravity * DT);
    }
    assert!(locomotion.is_jumping());
}

#[test]
fn cannot_jump_while_airborne() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, Default::default(), IN_AIR);
    step(&mut locomotion, &config, jump(), IN_AIR);
    assert!(!locomotion.is_jumping());
    assert!(locomotion.vertical_velocity() < 0.0);
}

#[test]
fn landing_clears_jump_and_clamps_velocity() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, jump(), GROUNDED);
    while -10.0 < locomotion.vertical_velocity() {
        step(&mut locomotion, &config, Default::default(), IN_AIR);
    }
    assert!(locomotion.is_jumping());

    step(&mut locomotion, &config, Default::default(), GROUNDED);
    assert_eq!(locomotion.state(), LocomotionState::Grounded);
    assert!(!locomotion.is_jumping());
    // Clamped to the stick velocity (then one step of gravity) - not zero, and not the -10 it
    // was falling at.
    assert_close(
        locomotion.vertical_velocity(),
        GROUNDED_STICK_VELOCITY - config.gravity * DT,
    );
}

#[test]
fn can_jump_again_after_landing() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, jump(), GROUNDED);
    while 0.0 < locomotion.vertical_velocity() {
        step(&mut locomotion, &config, Default::default(), IN_AIR);
    }
    step(&mut locomotion, &config, Default::default(), GROUNDED);
    step(&mut locomotion, &config, jump(), GROUNDED);
    assert!(locomotion.is_jumping());
    assert!(0.0 < locomotion.vertical_velocity());
}

#[test]
fn landing_while_still_rising() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, jump(), GROUNDED);
    step(&mut locomotion, &config, Default::default(), IN_AIR);
    assert!(0.0 < locomotion.vertical_velocity());

    // Jumped onto a step - contact while the upward velocity is still positive.
    step(&mut locomotion, &config, Default::default(), GROUNDED);
    assert_eq!(locomotion.state(), LocomotionState::Grounded);
    assert!(!locomotion.is_jumping());
    assert_close(
        locomotion.vertical_velocity(),
        GROUNDED_STICK_VELOCITY - config.gravity * DT,
    );

    step(&mut locomotion, &config, jump(), GROUNDED);
    assert!(locomotion.is_jumping());
    assert_close(
        locomotion.vertical_velocity(),
        config.jump_takeoff_velocity() - config.gravity * DT,
    );
}

#[test]
fn walking_off_a_ledge_falls_without_jumping() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, Default::default(), GROUNDED);
    step(&mut locomotion, &config, Default::default(), IN_AIR);
    assert_eq!(locomotion.state(), LocomotionState::Airborne);
    assert!(!locomotion.is_jumping());
}

#[test]
fn entering_water_zeroes_vertical_velocity() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    while -15.0 < locomotion.vertical_velocity() {
        step(&mut locomotion, &config, Default::default(), IN_AIR);
    }

    let output = step(&mut locomotion, &config, Default::default(), IN_WATER);
    assert_eq!(locomotion.state(), LocomotionState::Swimming);
    assert_eq!(locomotion.vertical_velocity(), 0.0);
    assert_eq!(output.displacement, Vector3::ZERO);
}

#[test]
fn entering_water_mid_jump_clears_the_jump() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, jump(), GROUNDED);
    step(&mut locomotion, &config, Default::default(), IN_WATER);
    assert!(!locomotion.is_jumping());
    assert_eq!(locomotion.vertical_velocity(), 0.0);
}

#[test]
fn gravity_does_not_apply_while_swimming() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    for _ in 0..10 {
        let output = step(&mut locomotion, &config, Default::default(), IN_WATER);
        assert_eq!(output.displacement, Vector3::ZERO);
    }
    assert_eq!(locomotion.vertical_velocity(), 0.0);

    // Jumping is not a thing in water either.
    step(&mut locomotion, &config, jump(), IN_WATER);
    assert_eq!(locomotion.vertical_velocity(), 0.0);
    assert!(!locomotion.is_jumping());
}

#[test]
fn swimming_vertically_is_direct_control() {
    let config = WadeMovementConfig {
        vertical_swim_speed: 2.0,
        ..Default::default()
    };
    let mut locomotion = WadeLocomotion::default();
    let ascend = WadeStepInput {
        ascend: true,
        ..Default::default()
    };
    let descend = WadeStepInput {
        descend: true,
        ..Default::default()
    };
    let both = WadeStepInput {
        ascend: true,
        descend: true,
        ..Default::default()
    };

    for _ in 0..3 {
        let output = step(&mut locomotion, &config, ascend, IN_WATER);
        assert_close(output.displacement.y, 0.2);
    }
    let output = step(&mut locomotion, &config, descend, IN_WATER);
    assert_close(output.displacement.y, -0.2);
    let output = step(&mut locomotion, &config, both, IN_WATER);
    assert_close(output.displacement.y, 0.0);
    assert_eq!(locomotion.vertical_velocity(), 0.0);
}

#[test]
fn diagonal_swimming_is_not_faster() {
    let config = WadeMovementConfig {
        swim_speed: 3.0,
        vertical_swim_speed: 2.0,
        ..Default::default()
    };
    let mut locomotion = WadeLocomotion::default();
    let input = WadeStepInput {
        direction: Vector2::new(0.0, 1.0),
        ascend: true,
        ..Default::default()
    };
    let output = step(&mut locomotion, &config, input, IN_WATER);

    let horizontal_intent = Vector3::new(output.displacement.x, 0.0, output.displacement.z).length()
        / (config.swim_speed * DT);
    let vertical_intent = output.displacement.y / (config.vertical_swim_speed * DT);
    let intent_length = Vector2::new(horizontal_intent, vertical_intent).length();
    assert_close(intent_length, 1.0);
    assert_close(horizontal_intent, vertical_intent);
}

#[test]
fn swimming_faces_only_horizontal_intent() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    let ascend_only = WadeStepInput {
        ascend: true,
        ..Default::default()
    };
    let output = step(&mut locomotion, &config, ascend_only, IN_WATER);
    assert_eq!(output.target_facing, None);

    let output = step(
        &mut locomotion,
        &config,
        WadeStepInput {
            direction: Vector2::new(1.0, 0.0),
            ascend: true,
            ..Default::default()
        },
        IN_WATER,
    );
    let facing = output.target_facing.expect("moving sideways should face sideways");
    assert!((facing * Vector3::NEG_Z).abs_diff_eq(Vector3::X, 1e-4));
}

#[test]
fn leaving_water_rederives_from_ground_contact() {
    let config = WadeMovementConfig::default();

    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, Default::default(), IN_WATER);
    assert_eq!(locomotion.state(), LocomotionState::Swimming);
    assert_eq!(locomotion.vertical_velocity(), 0.0);
    step(&mut locomotion, &config, Default::default(), IN_AIR);
    assert_eq!(locomotion.state(), LocomotionState::Airborne);

    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, Default::default(), IN_WATER);
    step(&mut locomotion, &config, Default::default(), GROUNDED);
    assert_eq!(locomotion.state(), LocomotionState::Grounded);
}

#[test]
fn submersion_takes_priority_over_ground_contact() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(
        &mut locomotion,
        &config,
        Default::default(),
        WadeEnvironmentSample {
            grounded: true,
            submerged: true,
        },
    );
    assert_eq!(locomotion.state(), LocomotionState::Swimming);
}

#[test]
fn horizontal_speed_never_exceeds_walk_speed() {
    let config = WadeMovementConfig {
        walk_speed: 5.0,
        ..Default::default()
    };
    let cameras = [
        None,
        Some(WadeCameraBasis::from_rotation(Quaternion::from_rotation_y(
            0.7,
        ))),
        Some(WadeCameraBasis::from_rotation(
            Quaternion::from_rotation_y(-2.0) * Quaternion::from_rotation_x(-0.9),
        )),
    ];
    let inputs = [
        Vector2::new(0.0, 1.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.6, 0.8),
        Vector2::new(-0.3, 0.2),
        Vector2::new(0.05, 0.05),
        Vector2::new(-0.70, -0.71),
    ];
    for camera in cameras.iter() {
        for sample in [GROUNDED, IN_AIR] {
            for direction in inputs {
                let mut locomotion = WadeLocomotion::default();
                let output = locomotion
                    .step(
                        DT,
                        &config,
                        &WadeStepInput::moving(direction),
                        sample,
                        camera.as_ref(),
                    )
                    .expect("valid step");
                let horizontal =
                    Vector3::new(output.displacement.x, 0.0, output.displacement.z).length();
                assert!(
                    horizontal <= config.walk_speed * DT + 1e-5,
                    "input {direction} moved {horizontal}"
                );
            }
        }
    }
}

#[test]
fn negligible_input_does_not_move_or_turn() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    let output = step(
        &mut locomotion,
        &config,
        WadeStepInput::moving(Vector2::new(0.05, -0.05)),
        GROUNDED,
    );
    assert_eq!(output.displacement.x, 0.0);
    assert_eq!(output.displacement.z, 0.0);
    assert_eq!(output.target_facing, None);
}

#[test]
fn movement_is_relative_to_the_camera() {
    let config = WadeMovementConfig {
        walk_speed: 5.0,
        ..Default::default()
    };
    // Turned left and looking down at the character.
    let camera = WadeCameraBasis::from_rotation(
        Quaternion::from_rotation_y(std::f32::consts::FRAC_PI_2 as Float)
            * Quaternion::from_rotation_x(-0.8),
    );
    let mut locomotion = WadeLocomotion::default();
    let output = locomotion
        .step(
            DT,
            &config,
            &WadeStepInput::moving(Vector2::new(0.0, 1.0)),
            GROUNDED,
            Some(&camera),
        )
        .expect("valid step");
    assert_close(output.displacement.x, -0.5);
    assert_close(output.displacement.z, 0.0);
    let facing = output.target_facing.expect("moving forward should face forward");
    assert!((facing * Vector3::NEG_Z).abs_diff_eq(Vector3::NEG_X, 1e-4));
}

#[test]
fn zero_frame_duration_is_a_no_op() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, jump(), GROUNDED);
    let before = locomotion.clone();

    let output = locomotion
        .step(0.0, &config, &jump(), IN_WATER, None)
        .expect("zero duration is valid");
    assert_eq!(output, WadeStepOutput::IDLE);
    assert_eq!(locomotion, before);
}

#[test]
fn invalid_steps_are_rejected_without_changing_state() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, jump(), GROUNDED);
    let before = locomotion.clone();

    assert_eq!(
        locomotion.step(-0.1, &config, &Default::default(), IN_WATER, None),
        Err(WadeStepError::NegativeFrameDuration(-0.1)),
    );
    assert!(matches!(
        locomotion.step(Float::NAN, &config, &Default::default(), IN_WATER, None),
        Err(WadeStepError::NonFiniteFrameDuration(_)),
    ));
    assert!(matches!(
        locomotion.step(
            DT,
            &config,
            &WadeStepInput::moving(Vector2::new(Float::NAN, 1.0)),
            IN_WATER,
            None
        ),
        Err(WadeStepError::NonFiniteInput { .. }),
    ));
    let camera_looking_straight_down = WadeCameraBasis {
        forward: Vector3::NEG_Y,
        right: Vector3::X,
    };
    assert_eq!(
        locomotion.step(
            DT,
            &config,
            &Default::default(),
            IN_WATER,
            Some(&camera_looking_straight_down)
        ),
        Err(WadeStepError::DegenerateCameraBasis),
    );

    assert_eq!(locomotion, before);
}

#[test]
fn reset_returns_to_spawn_state() {
    let config = WadeMovementConfig::default();
    let mut locomotion = WadeLocomotion::default();
    step(&mut locomotion, &config, jump(), GROUNDED);
    step(&mut locomotion, &config, Default::default(), IN_AIR);
    locomotion.reset();
    assert_eq!(locomotion, WadeLocomotion::default());
}

#[test]
fn step_errors_describe_the_problem() {
    assert_eq!(
        WadeStepError::NegativeFrameDuration(-0.5).to_string(),
        "frame duration must not be negative (got -0.5)"
    );
    assert_eq!(
        WadeStepError::NonFiniteInput { x: 1.0, y: Float::INFINITY }.to_string(),
        "directional input must be finite (got [1, inf])"
    );
}
