use crate::math::Float;

/// A step that was rejected because the caller violated its preconditions.
///
/// A rejected step does not change the locomotion state, so the next valid step continues as if
/// the rejected one never happened.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum WadeStepError {
    #[error("frame duration must not be negative (got {0})")]
    NegativeFrameDuration(Float),
    #[error("frame duration must be finite (got {0})")]
    NonFiniteFrameDuration(Float),
    #[error("directional input must be finite (got [{x}, {y}])")]
    NonFiniteInput { x: Float, y: Float },
    #[error("camera basis must have finite, non-vertical forward and right vectors")]
    DegenerateCameraBasis,
}
