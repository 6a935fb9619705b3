use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;

use crate::locomotion::HORIZONTAL_INTENT_THRESHOLD;
use crate::math::{AdjustPrecision, Float};
use crate::projection::WadeCameraBasis;
use crate::util::slew_rotation;
use crate::{
    LocomotionState, WadeEnvironmentSensors, WadeLocomotion, WadeMotor, WadeMovementConfig,
    WadePipelineSystems, WadeRigidBodyTracker, WadeStepInput, WadeStepOutput,
    WadeSystems, WadeToggle, WadeUserControlsSystems,
};

/// The main plugin for bevy-wade.
///
/// It must use the same schedule as the physics backend plugin, and that schedule should run
/// before the physics engine moves the bodies (e.g. [`Update`] for a backend that steps in
/// [`PostUpdate`], or [`FixedUpdate`] for a backend that steps in [`FixedPostUpdate`]).
pub struct WadeControllerPlugin {
    schedule: InternedScheduleLabel,
}

impl WadeControllerPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for WadeControllerPlugin {
    fn default() -> Self {
        Self::new(Update)
    }
}

impl Plugin for WadeControllerPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            self.schedule,
            (
                WadePipelineSystems::Sensors,
                WadeUserControlsSystems,
                WadePipelineSystems::Logic,
                WadePipelineSystems::Motors,
            )
                .chain()
                .in_set(WadeSystems),
        );
        app.add_systems(
            self.schedule,
            apply_controller_system.in_set(WadePipelineSystems::Logic),
        );
    }
}

/// The main component used for interaction with the controls and the locomotion state.
///
/// A system in [`WadeUserControlsSystems`] should write the player's [`input`](Self::input) every
/// frame. The controller consumes it during [`WadePipelineSystems::Logic`], and clears
/// [`jump_pressed`](WadeStepInput::jump_pressed) afterward so that a press is only used once.
#[derive(Component, Clone, Debug, Default)]
#[require(WadeMotor, WadeRigidBodyTracker, WadeEnvironmentSensors)]
pub struct WadeController {
    pub config: WadeMovementConfig,
    pub input: WadeStepInput,
    locomotion: WadeLocomotion,
    last_output: WadeStepOutput,
    camera_reference_missing: bool,
}

impl WadeController {
    pub fn new(config: WadeMovementConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn locomotion(&self) -> &WadeLocomotion {
        &self.locomotion
    }

    pub fn state(&self) -> LocomotionState {
        self.locomotion.state()
    }

    pub fn is_jumping(&self) -> bool {
        self.locomotion.is_jumping()
    }

    /// The result of the last step that was applied to the motor.
    pub fn last_output(&self) -> &WadeStepOutput {
        &self.last_output
    }

    /// Put the character back in its spawn state, e.g. after teleporting it.
    pub fn reset(&mut self) {
        self.locomotion.reset();
        self.last_output = WadeStepOutput::IDLE;
    }

    /// A coarse description of what the character is doing, for picking animations or sounds.
    pub fn activity(&self) -> WadeActivity {
        let moving = HORIZONTAL_INTENT_THRESHOLD < self.input.direction.length_squared()
            || self.last_output.target_facing.is_some();
        match self.locomotion.state() {
            LocomotionState::Grounded if moving => WadeActivity::Walking,
            LocomotionState::Grounded => WadeActivity::Idle,
            LocomotionState::Airborne if self.locomotion.is_jumping() => {
                WadeActivity::Jumping(self.locomotion.vertical_velocity())
            }
            LocomotionState::Airborne => WadeActivity::Falling(self.locomotion.vertical_velocity()),
            LocomotionState::Swimming if moving => WadeActivity::Swimming,
            LocomotionState::Swimming => WadeActivity::Treading,
        }
    }
}

/// See [`WadeController::activity`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WadeActivity {
    Idle,
    Walking,
    /// Airborne after a jump. Holds the vertical velocity.
    Jumping(Float),
    /// Airborne without having jumped, e.g. after walking off a ledge. Holds the vertical velocity.
    Falling(Float),
    Swimming,
    /// In water without horizontal movement.
    Treading,
}

/// Makes the character move relative to another entity - usually the camera.
///
/// The referenced entity's [`GlobalTransform`] is read every frame, so the camera can move freely.
/// If the entity does not exist the controller falls back to the world axes.
#[derive(Component, Clone, Copy, Debug)]
pub struct WadeCameraReference(pub Entity);

#[allow(clippy::type_complexity)]
fn apply_controller_system(
    time: Res<Time>,
    mut query: Query<(
        Entity,
        &mut WadeController,
        &WadeRigidBodyTracker,
        &mut WadeEnvironmentSensors,
        &mut WadeMotor,
        Option<&WadeCameraReference>,
        Option<&WadeToggle>,
    )>,
    cameras_query: Query<&GlobalTransform>,
) {
    #[allow(clippy::unnecessary_cast)]
    let frame_duration = time.delta().as_secs_f64() as Float;
    for (entity, mut controller, tracker, mut sensors, mut motor, camera_reference, wade_toggle) in
        query.iter_mut()
    {
        match wade_toggle.copied().unwrap_or_default() {
            WadeToggle::Disabled => continue,
            WadeToggle::SenseOnly => {}
            WadeToggle::Enabled => {}
        }
        let controller = controller.as_mut();

        sensors.water_probe_offset = controller.config.water_probe_offset;
        sensors.water_probe_radius = controller.config.water_probe_radius;
        sensors.ground_contact_epsilon = controller.config.ground_contact_epsilon;

        motor.frame_duration = frame_duration;
        if frame_duration == 0.0 {
            motor.neutralize();
            continue;
        }

        let camera_basis = camera_reference.and_then(|WadeCameraReference(camera_entity)| {
            match cameras_query.get(*camera_entity) {
                Ok(camera_transform) => {
                    controller.camera_reference_missing = false;
                    Some(WadeCameraBasis::from_rotation(
                        camera_transform.rotation().adjust_precision(),
                    ))
                }
                Err(_) => {
                    if !controller.camera_reference_missing {
                        warn!(
                            "Camera {camera_entity} referenced by {entity} has no transform - moving along the world axes"
                        );
                        controller.camera_reference_missing = true;
                    }
                    None
                }
            }
        });

        let state_before = controller.locomotion.state();
        let was_jumping = controller.locomotion.is_jumping();
        let step_result = controller.locomotion.step(
            frame_duration,
            &controller.config,
            &controller.input,
            sensors.output,
            camera_basis.as_ref(),
        );
        controller.input.jump_pressed = false;

        match step_result {
            Ok(output) => {
                let state_after = controller.locomotion.state();
                if state_before != state_after {
                    debug!("{entity} changed locomotion state from {state_before:?} to {state_after:?}");
                }
                if !was_jumping && controller.locomotion.is_jumping() {
                    debug!(
                        "{entity} jumped with vertical velocity {}",
                        controller.locomotion.vertical_velocity()
                    );
                }
                motor.displacement = output.displacement;
                motor.rotation = output.target_facing.map(|target_facing| {
                    slew_rotation(
                        tracker.rotation,
                        target_facing,
                        controller.config.rotation_slew_rate,
                        frame_duration,
                    )
                });
                controller.last_output = output;
            }
            Err(err) => {
                warn!("Rejected locomotion step of {entity}: {err}");
                motor.neutralize();
                controller.last_output = WadeStepOutput::IDLE;
            }
        }
    }
}
