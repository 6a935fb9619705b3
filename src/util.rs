use crate::math::{Float, Quaternion, Vector3};

/// The yaw-only rotation that makes an object's negative Z point along `direction`.
///
/// Only the horizontal part of `direction` is used. Returns `None` if it has no horizontal part.
///
/// ```
/// # use bevy_wade::math::{Quaternion, Vector3};
/// # use bevy_wade::util::facing_toward;
/// let facing = facing_toward(Vector3::X).unwrap();
/// assert!((facing * Vector3::NEG_Z).abs_diff_eq(Vector3::X, 1e-5));
/// assert_eq!(facing_toward(Vector3::Y), None);
/// ```
pub fn facing_toward(direction: Vector3) -> Option<Quaternion> {
    let horizontal = Vector3::new(direction.x, 0.0, direction.z).try_normalize()?;
    Some(Quaternion::from_rotation_y(Float::atan2(
        -horizontal.x,
        -horizontal.z,
    )))
}

/// Rotate `current` toward `target` by at most `rate * frame_duration` radians.
///
/// Because the limit is an angular speed, the character turns at the same pace regardless of the
/// frame rate. Once the remaining angle fits in a single step the result is exactly `target`.
pub fn slew_rotation(
    current: Quaternion,
    target: Quaternion,
    rate: Float,
    frame_duration: Float,
) -> Quaternion {
    let max_angle = rate * frame_duration;
    let remaining_angle = current.angle_between(target);
    if remaining_angle <= max_angle {
        target
    } else if max_angle <= 0.0 {
        current
    } else {
        current.slerp(target, max_angle / remaining_angle)
    }
}
