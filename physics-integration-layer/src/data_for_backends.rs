use bevy::prelude::*;

use crate::math::{Float, Quaternion, Vector3};

/// Allows disabling bevy-wade for a specific entity.
///
/// This can be used to let some other system temporarily take control over a character, or to
/// freeze a character while the game is paused.
///
/// This component is not mandatory - if omitted, bevy-wade will just assume it is enabled for that
/// entity.
#[derive(Component, Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum WadeToggle {
    /// Do not update the sensors, and do not apply the motor.
    ///
    /// The controller system will also not run and won't update the motor nor the locomotion state
    /// stored in the `WadeController` component. They will retain their last value from before
    /// `WadeToggle::Disabled` was set.
    Disabled,
    /// Update the sensors, but do not apply the motor.
    ///
    /// The controller system will still run and still advance the locomotion state. Only the
    /// system that moves the character is disabled.
    SenseOnly,
    #[default]
    /// The backend behaves normally - it updates the sensors and applies the motor.
    Enabled,
}

/// Position and orientation of the character's rigid body.
///
/// The physics backend is responsible for updating this component during
/// [`WadePipelineSystems::Sensors`](crate::WadePipelineSystems::Sensors).
#[derive(Component, Debug, Clone, Copy)]
pub struct WadeRigidBodyTracker {
    pub translation: Vector3,
    pub rotation: Quaternion,
}

impl Default for WadeRigidBodyTracker {
    fn default() -> Self {
        Self {
            translation: Vector3::ZERO,
            rotation: Quaternion::IDENTITY,
        }
    }
}

/// The two environment questions the locomotion state machine cannot answer on its own.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WadeEnvironmentSample {
    /// The character's lowest point touches a walkable surface.
    ///
    /// This is the backend's authoritative contact result after the previous move - not a value
    /// the controller derives by itself.
    pub grounded: bool,
    /// The water probe sphere intersects a collider marked with [`WadeWater`].
    pub submerged: bool,
}

/// Ground contact and water submersion sensing.
///
/// The controller writes the probe parameters (from its configuration) during
/// [`WadePipelineSystems::Logic`](crate::WadePipelineSystems::Logic), and the physics backend uses
/// them to fill [`output`](Self::output) during
/// [`WadePipelineSystems::Sensors`](crate::WadePipelineSystems::Sensors) of the next frame.
#[derive(Component, Debug, Clone)]
pub struct WadeEnvironmentSensors {
    /// Center of the water probe sphere, relative to the character's translation (world axes).
    pub water_probe_offset: Vector3,
    /// Radius of the water probe sphere.
    pub water_probe_radius: Float,
    /// How far below the character's collider a surface may be and still count as ground contact.
    pub ground_contact_epsilon: Float,
    pub output: WadeEnvironmentSample,
}

impl Default for WadeEnvironmentSensors {
    fn default() -> Self {
        Self {
            water_probe_offset: Vector3::new(0.0, 0.5, 0.0),
            water_probe_radius: 0.5,
            ground_contact_epsilon: 0.05,
            output: Default::default(),
        }
    }
}

/// Marks a collider as a volume of water.
///
/// Water colliders should usually be sensors, so that the character can enter them. They are
/// never considered ground.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct WadeWater;

/// The movement the controller requests for the current frame.
///
/// The physics backend is responsible for reading this component during
/// [`WadePipelineSystems::Motors`](crate::WadePipelineSystems::Motors) and moving the character's
/// collider, resolving collisions on the way.
#[derive(Component, Default, Debug, Clone)]
pub struct WadeMotor {
    /// World space displacement to apply during this frame.
    pub displacement: Vector3,
    /// The rotation the character should have at the end of this frame, if it should change.
    ///
    /// The controller already limits this by its rotation slew rate, so backends should apply it
    /// as-is.
    pub rotation: Option<Quaternion>,
    /// The duration of the frame the displacement was computed for, in seconds.
    pub frame_duration: Float,
}

impl WadeMotor {
    /// Clear the requested movement, so that the character will not move or turn.
    pub fn neutralize(&mut self) {
        self.displacement = Vector3::ZERO;
        self.rotation = None;
    }

    /// The velocity that would cover [`displacement`](Self::displacement) in exactly one frame.
    ///
    /// Returns zero when the displacement cannot be expressed as a finite velocity.
    pub fn velocity(&self) -> Vector3 {
        if self.frame_duration <= 0.0 {
            return Vector3::ZERO;
        }
        let velocity = self.displacement / self.frame_duration;
        if velocity.is_finite() {
            velocity
        } else {
            Vector3::ZERO
        }
    }
}
