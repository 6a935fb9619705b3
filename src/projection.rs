//! Mapping 2D directional input into a world-space horizontal direction.
use crate::math::{Vector2, Vector3};
use crate::WadeStepError;

/// The reference orientation used for camera-relative movement.
///
/// Only the horizontal parts of the vectors matter - they are flattened onto the XZ plane before
/// use, so a camera looking down at the character still moves it along the ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WadeCameraBasis {
    pub forward: Vector3,
    pub right: Vector3,
}

impl Default for WadeCameraBasis {
    fn default() -> Self {
        Self::WORLD
    }
}

impl WadeCameraBasis {
    /// The basis used when there is no camera: forward is negative Z and right is positive X.
    pub const WORLD: Self = Self {
        forward: Vector3::NEG_Z,
        right: Vector3::X,
    };

    /// The basis of an object (typically a camera) with the given rotation.
    pub fn from_rotation(rotation: crate::math::Quaternion) -> Self {
        Self {
            forward: rotation * Vector3::NEG_Z,
            right: rotation * Vector3::X,
        }
    }

    /// Project both vectors onto the horizontal plane and normalize them.
    ///
    /// Returns `None` if either vector is non-finite or vertical, since there is no meaningful
    /// horizontal direction to move in.
    pub fn flattened(&self) -> Option<Self> {
        let flatten = |v: Vector3| Vector3::new(v.x, 0.0, v.z).try_normalize();
        Some(Self {
            forward: flatten(self.forward)?,
            right: flatten(self.right)?,
        })
    }

    /// Map input on a basis that is already [flattened](Self::flattened).
    ///
    /// The result is normalized, or zero when the input cancels out.
    pub fn project(&self, input: Vector2) -> Vector3 {
        (self.forward * input.y + self.right * input.x).normalize_or_zero()
    }
}

/// Turn directional input into a normalized world-space horizontal direction.
///
/// `input.y` moves along the camera's forward and `input.x` along its right. Without a camera the
/// [world axes](WadeCameraBasis::WORLD) are used.
///
/// ```
/// # use bevy_wade::math::{Vector2, Vector3};
/// # use bevy_wade::projection::project_direction;
/// let direction = project_direction(None, Vector2::new(0.0, 1.0)).unwrap();
/// assert_eq!(direction, Vector3::NEG_Z);
/// ```
pub fn project_direction(
    camera: Option<&WadeCameraBasis>,
    input: Vector2,
) -> Result<Vector3, WadeStepError> {
    let basis = match camera {
        Some(camera) => camera
            .flattened()
            .ok_or(WadeStepError::DegenerateCameraBasis)?,
        None => WadeCameraBasis::WORLD,
    };
    Ok(basis.project(input))
}
