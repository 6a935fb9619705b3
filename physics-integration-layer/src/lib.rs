//! # Physics Integration Layer for bevy-wade
//!
//! Physics backends for bevy-wade depend on this crate instead of on bevy-wade itself. It contains
//! the components the backend must fill during [`WadePipelineSystems::Sensors`] and the components
//! it must apply during [`WadePipelineSystems::Motors`].
use bevy::prelude::*;

pub mod data_for_backends;
pub mod math;

/// Umbrella system set for [`WadePipelineSystems`].
///
/// The physics backends' plugins are responsible for preventing this entire system set from
/// running when the physics backend itself is paused.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct WadeSystems;

/// The various stages of the bevy-wade pipeline.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub enum WadePipelineSystems {
    /// Ground contact and submersion are read from the physics backend.
    Sensors,
    /// The locomotion state machine decides how the character should move.
    Logic,
    /// The displacement and facing are applied in the physics backend.
    Motors,
}
