//! Precision-agnostic math aliases.
//!
//! bevy-wade computes in `f32` by default. With the `f64` feature every alias here switches to the
//! double precision glam types, so that backends compiled with double precision physics can hand
//! their values to the controller without a lossy round-trip.

#[cfg(feature = "f64")]
use bevy::math::{DQuat, DVec2, DVec3};
use bevy::math::{Quat, Vec2};

#[cfg(feature = "f64")]
pub type Float = f64;
#[cfg(not(feature = "f64"))]
pub type Float = f32;

#[cfg(feature = "f64")]
pub type Vector2 = DVec2;
#[cfg(not(feature = "f64"))]
pub type Vector2 = Vec2;

#[cfg(feature = "f64")]
pub type Vector3 = DVec3;
#[cfg(not(feature = "f64"))]
pub type Vector3 = bevy::math::Vec3;

#[cfg(feature = "f64")]
pub type Quaternion = DQuat;
#[cfg(not(feature = "f64"))]
pub type Quaternion = Quat;

/// Convert a Bevy math value (always `f32`) into the precision chosen for compilation.
pub trait AdjustPrecision {
    /// The same construct in [`Float`] precision.
    type Adjusted;

    fn adjust_precision(&self) -> Self::Adjusted;
}

macro_rules! impl_adjust_precision {
    ($f32_type:ty, $adjusted:ty, $to_double:ident) => {
        impl AdjustPrecision for $f32_type {
            type Adjusted = $adjusted;

            #[cfg(feature = "f64")]
            fn adjust_precision(&self) -> Self::Adjusted {
                self.$to_double()
            }

            #[cfg(not(feature = "f64"))]
            fn adjust_precision(&self) -> Self::Adjusted {
                *self
            }
        }
    };
}

impl_adjust_precision!(Vec2, Vector2, as_dvec2);
impl_adjust_precision!(Quat, Quaternion, as_dquat);
