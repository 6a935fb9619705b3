//! The walk / jump / swim state machine.
//!
//! [`WadeLocomotion`] is a plain value. It does not touch the ECS, so it can be stepped directly by
//! hosts that do not use [`WadeControllerPlugin`](crate::WadeControllerPlugin), and it is what the
//! plugin steps for every [`WadeController`](crate::WadeController).
use crate::math::{Float, Quaternion, Vector3};
use crate::projection::WadeCameraBasis;
use crate::util::facing_toward;
use crate::{WadeEnvironmentSample, WadeMovementConfig, WadeStepError, WadeStepInput};

/// The vertical velocity the character is clamped to when it touches the ground while falling.
///
/// It is slightly negative rather than zero so that the character keeps pressing against slopes and
/// steps, and the ground contact of the next step stays reliable.
pub const GROUNDED_STICK_VELOCITY: Float = -2.0;

/// Directional input with a squared magnitude below this is treated as no input at all.
pub const HORIZONTAL_INTENT_THRESHOLD: Float = 0.01;

/// The mutually exclusive modes of movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum LocomotionState {
    /// Standing on a walkable surface. The only state where jumps can start.
    #[default]
    Grounded,
    /// In the air, either after a jump or after walking off a ledge.
    Airborne,
    /// Inside water. Gravity does not apply.
    Swimming,
}

/// The vertical motion that persists between steps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicState {
    /// Signed vertical velocity, positive is up.
    pub vertical_velocity: Float,
    /// Set when a jump starts and cleared when the character lands (or enters water).
    ///
    /// Walking off a ledge does not set it, so `Airborne` with `is_jumping == false` means the
    /// character is falling without having jumped.
    pub is_jumping: bool,
}

/// What the character should do at the end of a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WadeStepOutput {
    /// World space displacement to apply during this step.
    pub displacement: Vector3,
    /// The rotation the character should turn toward. `None` when there is no horizontal intent.
    pub target_facing: Option<Quaternion>,
}

impl WadeStepOutput {
    /// No movement and no rotation.
    pub const IDLE: Self = Self {
        displacement: Vector3::ZERO,
        target_facing: None,
    };
}

impl Default for WadeStepOutput {
    fn default() -> Self {
        Self::IDLE
    }
}

/// The locomotion state machine of a single character.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WadeLocomotion {
    state: LocomotionState,
    kinematic: KinematicState,
}

impl WadeLocomotion {
    pub fn state(&self) -> LocomotionState {
        self.state
    }

    pub fn kinematic(&self) -> &KinematicState {
        &self.kinematic
    }

    pub fn vertical_velocity(&self) -> Float {
        self.kinematic.vertical_velocity
    }

    pub fn is_jumping(&self) -> bool {
        self.kinematic.is_jumping
    }

    /// Return to the spawn state: grounded, not jumping, no vertical velocity.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the state machine by one step.
    ///
    /// `sample` must be taken fresh for this step - `grounded` being the physics backend's contact
    /// result after the previous step's move. `camera` is the reference for camera-relative
    /// movement; `None` means the world axes.
    ///
    /// A `frame_duration` of zero is a no-op that returns [`WadeStepOutput::IDLE`]. Invalid
    /// arguments are rejected with an error and leave the state untouched.
    pub fn step(
        &mut self,
        frame_duration: Float,
        config: &WadeMovementConfig,
        input: &WadeStepInput,
        sample: WadeEnvironmentSample,
        camera: Option<&WadeCameraBasis>,
    ) -> Result<WadeStepOutput, WadeStepError> {
        if frame_duration.is_nan() || frame_duration.is_infinite() {
            return Err(WadeStepError::NonFiniteFrameDuration(frame_duration));
        }
        if frame_duration < 0.0 {
            return Err(WadeStepError::NegativeFrameDuration(frame_duration));
        }
        if !input.direction.is_finite() {
            return Err(WadeStepError::NonFiniteInput {
                x: input.direction.x,
                y: input.direction.y,
            });
        }
        let basis = match camera {
            Some(camera) => camera
                .flattened()
                .ok_or(WadeStepError::DegenerateCameraBasis)?,
            None => WadeCameraBasis::WORLD,
        };
        if frame_duration == 0.0 {
            return Ok(WadeStepOutput::IDLE);
        }

        let landed = self.apply_transition(sample);

        let horizontal_direction =
            if HORIZONTAL_INTENT_THRESHOLD < input.direction.length_squared() {
                basis.project(input.direction)
            } else {
                Vector3::ZERO
            };

        let displacement = match self.state {
            LocomotionState::Grounded => {
                if landed || self.kinematic.vertical_velocity < 0.0 {
                    self.kinematic.vertical_velocity = GROUNDED_STICK_VELOCITY;
                    self.kinematic.is_jumping = false;
                }
                if input.jump_pressed && !self.kinematic.is_jumping {
                    self.kinematic.vertical_velocity = config.jump_takeoff_velocity();
                    self.kinematic.is_jumping = true;
                }
                self.integrate_gravity(config, frame_duration);
                horizontal_direction * config.walk_speed * frame_duration
                    + Vector3::Y * self.kinematic.vertical_velocity * frame_duration
            }
            LocomotionState::Airborne => {
                self.integrate_gravity(config, frame_duration);
                horizontal_direction * config.walk_speed * frame_duration
                    + Vector3::Y * self.kinematic.vertical_velocity * frame_duration
            }
            LocomotionState::Swimming => {
                let intent = (horizontal_direction + Vector3::Y * input.vertical_intent())
                    .clamp_length_max(1.0);
                let horizontal_intent = Vector3::new(intent.x, 0.0, intent.z);
                (horizontal_intent * config.swim_speed
                    + Vector3::Y * intent.y * config.vertical_swim_speed)
                    * frame_duration
            }
        };

        Ok(WadeStepOutput {
            displacement,
            target_facing: facing_toward(horizontal_direction),
        })
    }

    /// Decide the state for this step.
    ///
    /// Grounded and airborne are re-derived from the sample every step instead of being latched, so
    /// they can never drift out of sync with the physics backend.
    ///
    /// Returns `true` when the character lands, i.e. goes from `Airborne` to `Grounded`. This can
    /// happen while still rising, e.g. when jumping onto a step.
    fn apply_transition(&mut self, sample: WadeEnvironmentSample) -> bool {
        let previous_state = self.state;
        if sample.submerged {
            if self.state != LocomotionState::Swimming {
                self.state = LocomotionState::Swimming;
                self.kinematic = KinematicState::default();
            }
        } else if sample.grounded {
            self.state = LocomotionState::Grounded;
        } else {
            self.state = LocomotionState::Airborne;
        }
        previous_state == LocomotionState::Airborne && self.state == LocomotionState::Grounded
    }

    fn integrate_gravity(&mut self, config: &WadeMovementConfig, frame_duration: Float) {
        self.kinematic.vertical_velocity -= config.gravity * frame_duration;
    }
}
