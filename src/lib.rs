//! # bevy-wade
//!
//! A character controller for Bevy that walks, jumps and swims.
//!
//! Every frame the controller takes the player's directional input and a few action buttons,
//! combines them with what the physics backend sensed (is the character touching ground? is it in
//! water?) and decides how far the character should move and where it should face. The physics
//! backend then performs that move, resolving collisions.
//!
//! ## Usage
//!
//! 1. Add [`WadeControllerPlugin`] and a physics backend plugin (e.g. `bevy-wade-avian3d`) to the
//!    app, both with the same schedule.
//! 2. Spawn the character with a [`WadeController`], plus whatever the physics backend needs.
//!    Optionally add [`WadeCameraReference`] to make the movement camera-relative.
//! 3. Mark water colliders with [`WadeWater`].
//! 4. Write a system in [`WadeUserControlsSystems`] that fills [`WadeController::input`] from the
//!    input devices:
//!
//! ```no_run
//! # use bevy::prelude::*;
//! # use bevy_wade::prelude::*;
//! # use bevy_wade::math::{AdjustPrecision, Vector2};
//! fn apply_controls(keyboard: Res<ButtonInput<KeyCode>>, mut query: Query<&mut WadeController>) {
//!     let mut direction = Vec2::ZERO;
//!     if keyboard.pressed(KeyCode::KeyW) {
//!         direction.y += 1.0;
//!     }
//!     if keyboard.pressed(KeyCode::KeyS) {
//!         direction.y -= 1.0;
//!     }
//!     if keyboard.pressed(KeyCode::KeyA) {
//!         direction.x -= 1.0;
//!     }
//!     if keyboard.pressed(KeyCode::KeyD) {
//!         direction.x += 1.0;
//!     }
//!     for mut controller in query.iter_mut() {
//!         controller.input = WadeStepInput {
//!             direction: direction.adjust_precision(),
//!             jump_pressed: keyboard.just_pressed(KeyCode::Space),
//!             ascend: keyboard.pressed(KeyCode::Space),
//!             descend: keyboard.pressed(KeyCode::ShiftLeft),
//!         };
//!     }
//! }
//! # let mut app = App::new();
//! app.add_systems(Update, apply_controls.in_set(WadeUserControlsSystems));
//! ```
//!
//! The state machine itself, [`WadeLocomotion`], does not depend on the ECS and can be stepped
//! directly.
mod animating_helper;
mod config;
mod controller;
pub mod environment;
mod error;
mod input;
mod locomotion;
pub mod projection;
pub mod util;

pub mod prelude {
    pub use crate::{
        LocomotionState, WadeCameraReference, WadeController, WadeControllerPlugin,
        WadeMovementConfig, WadeStepInput, WadeUserControlsSystems, WadeWater,
    };
}

pub use animating_helper::{WadeAnimatingState, WadeAnimatingStateDirective};
pub use bevy_wade_physics_integration_layer::data_for_backends::*;
pub use bevy_wade_physics_integration_layer::math;
pub use bevy_wade_physics_integration_layer::{WadePipelineSystems, WadeSystems};
pub use config::WadeMovementConfig;
pub use controller::{WadeActivity, WadeCameraReference, WadeController, WadeControllerPlugin};
pub use error::WadeStepError;
pub use input::WadeStepInput;
pub use locomotion::{
    KinematicState, LocomotionState, WadeLocomotion, WadeStepOutput, GROUNDED_STICK_VELOCITY,
    HORIZONTAL_INTENT_THRESHOLD,
};

use bevy::prelude::*;

/// The user controls should be applied in this system set.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct WadeUserControlsSystems;
