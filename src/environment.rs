//! Answering "is the character grounded?" and "is the character in water?".
//!
//! Ground contact is never computed here - it is the physics backend's authoritative result of the
//! previous move, and is only passed through. Submersion is a pure geometric overlap test between
//! the water probe sphere and the water volumes, which is answered either by the physics backend's
//! spatial queries or, for hosts that manage their own water, by [`WaterVolume`]s.
use crate::math::{Float, Vector3};
use crate::{WadeEnvironmentSample, WadeMovementConfig};

/// Something that knows where the water is.
pub trait WadeWaterQuery {
    /// Check if a sphere intersects (or touches) any volume of water.
    fn overlaps_water(&self, center: Vector3, radius: Float) -> bool;
}

/// A volume of water described by its geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WaterVolume {
    /// An axis-aligned box.
    Cuboid {
        center: Vector3,
        half_extents: Vector3,
    },
    Sphere {
        center: Vector3,
        radius: Float,
    },
}

impl WaterVolume {
    /// An axis-aligned box spanning from `min` to `max`.
    pub fn from_corners(min: Vector3, max: Vector3) -> Self {
        Self::Cuboid {
            center: (min + max) * 0.5,
            half_extents: (max - min).abs() * 0.5,
        }
    }

    pub fn intersects_sphere(&self, sphere_center: Vector3, sphere_radius: Float) -> bool {
        match self {
            Self::Cuboid {
                center,
                half_extents,
            } => {
                let closest_point =
                    sphere_center.clamp(*center - *half_extents, *center + *half_extents);
                closest_point.distance_squared(sphere_center) <= sphere_radius.powi(2)
            }
            Self::Sphere { center, radius } => {
                center.distance_squared(sphere_center) <= (radius + sphere_radius).powi(2)
            }
        }
    }
}

impl WadeWaterQuery for [WaterVolume] {
    fn overlaps_water(&self, center: Vector3, radius: Float) -> bool {
        self.iter()
            .any(|volume| volume.intersects_sphere(center, radius))
    }
}

impl WadeWaterQuery for Vec<WaterVolume> {
    fn overlaps_water(&self, center: Vector3, radius: Float) -> bool {
        self.as_slice().overlaps_water(center, radius)
    }
}

/// The water probe of a character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WadeEnvironmentSampler {
    pub water_probe_offset: Vector3,
    pub water_probe_radius: Float,
}

impl WadeEnvironmentSampler {
    pub fn from_config(config: &WadeMovementConfig) -> Self {
        Self {
            water_probe_offset: config.water_probe_offset,
            water_probe_radius: config.water_probe_radius,
        }
    }

    /// Where the center of the probe sphere is when the character is at `position`.
    pub fn probe_center(&self, position: Vector3) -> Vector3 {
        position + self.water_probe_offset
    }

    /// Check if the probe sphere touches water.
    ///
    /// Nothing is cached - the answer always reflects `position`.
    pub fn is_submerged(&self, position: Vector3, water: &(impl WadeWaterQuery + ?Sized)) -> bool {
        water.overlaps_water(self.probe_center(position), self.water_probe_radius)
    }

    /// Build the sample for a step.
    ///
    /// `ground_contact` is the contact flag the physics backend reported after the previous move.
    pub fn sample(
        &self,
        position: Vector3,
        ground_contact: bool,
        water: &(impl WadeWaterQuery + ?Sized),
    ) -> WadeEnvironmentSample {
        WadeEnvironmentSample {
            grounded: ground_contact,
            submerged: self.is_submerged(position, water),
        }
    }
}
