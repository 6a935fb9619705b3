use crate::math::{Float, Vector3};

/// Movement parameters of a single character.
///
/// Supplied once, when the [`WadeController`](crate::WadeController) is created. All speeds are in
/// world units per second and all angles are in radians. The defaults match a human-sized
/// character in a world where one unit is one meter.
///
/// Negative speeds, gravity or heights are not checked. They are a contract violation of the
/// caller and will make the character behave strangely rather than fail.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct WadeMovementConfig {
    /// Horizontal speed while [grounded](crate::LocomotionState::Grounded) or
    /// [airborne](crate::LocomotionState::Airborne).
    pub walk_speed: Float,

    /// Horizontal speed while [swimming](crate::LocomotionState::Swimming).
    pub swim_speed: Float,

    /// Vertical speed while swimming with the ascend or descend action held.
    pub vertical_swim_speed: Float,

    /// The maximum angular velocity, in radians per second, for turning the character toward its
    /// move direction.
    pub rotation_slew_rate: Float,

    /// The magnitude of the gravity acceleration. Always pulls toward negative Y.
    pub gravity: Float,

    /// The height the character reaches at the peak of a jump.
    pub jump_apex_height: Float,

    /// Radius of the sphere used for detecting water.
    pub water_probe_radius: Float,

    /// Offset of the water probe sphere's center from the character's position.
    ///
    /// Raising the probe means the character only starts swimming in deeper water.
    pub water_probe_offset: Vector3,

    /// The maximum gap between the character's collider and the ground under it for the character
    /// to still be considered grounded.
    pub ground_contact_epsilon: Float,
}

impl Default for WadeMovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            swim_speed: 3.0,
            vertical_swim_speed: 2.0,
            rotation_slew_rate: 10.0,
            gravity: 9.81,
            jump_apex_height: 2.0,
            water_probe_radius: 0.5,
            water_probe_offset: Vector3::new(0.0, 0.5, 0.0),
            ground_contact_epsilon: 0.05,
        }
    }
}

impl WadeMovementConfig {
    /// The upward velocity that makes a ballistic jump peak at exactly
    /// [`jump_apex_height`](Self::jump_apex_height).
    ///
    /// ```
    /// # use bevy_wade::WadeMovementConfig;
    /// let config = WadeMovementConfig {
    ///     gravity: 9.81,
    ///     jump_apex_height: 2.0,
    ///     ..Default::default()
    /// };
    /// assert!((config.jump_takeoff_velocity() - 6.264).abs() < 0.001);
    /// ```
    pub fn jump_takeoff_velocity(&self) -> Float {
        (2.0 * self.gravity * self.jump_apex_height).sqrt()
    }
}
