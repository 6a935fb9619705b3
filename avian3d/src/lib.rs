//! # avian3d Integration for bevy-wade
//!
//! In addition to the instructions in bevy-wade's documentation:
//!
//! * Add [`WadeAvian3dPlugin`] to the Bevy app, with the schedule the physics steps run after
//!   (typically [`FixedUpdate`], since Avian runs in [`FixedPostUpdate`]).
//! * Make the character a [`RigidBody::Dynamic`] with a [`Collider`] and
//!   [`LockedAxes::ROTATION_LOCKED`]. bevy-wade integrates gravity itself, so
//!   [`GravityScale`] is set to `0.0` automatically.
//! * Optionally: Add [`WadeAvian3dSensorShape`] to the character to use a different shape than
//!   its collider for detecting ground contact.
//! * Mark water colliders with `WadeWater`. They should usually also be [`Sensor`]s so that the
//!   character can enter them.
use avian3d::prelude::*;
use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;

use bevy_wade_physics_integration_layer::data_for_backends::{
    WadeEnvironmentSample, WadeEnvironmentSensors, WadeMotor, WadeRigidBodyTracker, WadeToggle,
    WadeWater,
};
use bevy_wade_physics_integration_layer::math::Quaternion;
use bevy_wade_physics_integration_layer::{WadePipelineSystems, WadeSystems};

pub mod prelude {
    pub use crate::{WadeAvian3dPlugin, WadeAvian3dSensorShape};
}

/// Add this plugin to use avian3d as a physics backend.
///
/// This plugin should be used in addition to `WadeControllerPlugin`, and both plugins must use
/// the same schedule.
pub struct WadeAvian3dPlugin {
    schedule: InternedScheduleLabel,
}

impl WadeAvian3dPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for WadeAvian3dPlugin {
    fn default() -> Self {
        Self::new(FixedUpdate)
    }
}

impl Plugin for WadeAvian3dPlugin {
    fn build(&self, app: &mut App) {
        app.register_required_components::<WadeMotor, LinearVelocity>()
            .register_required_components_with::<WadeMotor, GravityScale>(|| GravityScale(0.0));
        app.configure_sets(
            self.schedule,
            WadeSystems
                .before(PhysicsSet::Prepare)
                .run_if(|physics_time: Res<Time<Physics>>| !physics_time.is_paused()),
        );
        app.add_systems(
            self.schedule,
            (
                update_rigid_body_trackers_system,
                update_environment_sensors_system,
            )
                .in_set(WadePipelineSystems::Sensors),
        );
        app.add_systems(
            self.schedule,
            apply_motors_system.in_set(WadePipelineSystems::Motors),
        );
    }
}

/// Add this component to detect ground contact by casting this shape instead of the character's
/// own collider.
#[derive(Component)]
pub struct WadeAvian3dSensorShape(pub Collider);

fn update_rigid_body_trackers_system(
    mut query: Query<(
        &Position,
        &Rotation,
        &mut WadeRigidBodyTracker,
        Option<&WadeToggle>,
    )>,
) {
    for (position, rotation, mut tracker, wade_toggle) in query.iter_mut() {
        match wade_toggle.copied().unwrap_or_default() {
            WadeToggle::Disabled => continue,
            WadeToggle::SenseOnly => {}
            WadeToggle::Enabled => {}
        }
        *tracker = WadeRigidBodyTracker {
            translation: position.0,
            rotation: rotation.0,
        };
    }
}

#[allow(clippy::type_complexity)]
fn update_environment_sensors_system(
    spatial_query: SpatialQuery,
    mut query: Query<(
        Entity,
        &Position,
        &Rotation,
        &mut WadeEnvironmentSensors,
        Option<&Collider>,
        Option<&WadeAvian3dSensorShape>,
        Option<&WadeToggle>,
    )>,
    water_query: Query<(), With<WadeWater>>,
    not_ground_query: Query<(), Or<(With<WadeWater>, With<Sensor>)>>,
) {
    for (owner_entity, position, rotation, mut sensors, collider, sensor_shape, wade_toggle) in
        query.iter_mut()
    {
        match wade_toggle.copied().unwrap_or_default() {
            WadeToggle::Disabled => continue,
            WadeToggle::SenseOnly => {}
            WadeToggle::Enabled => {}
        }
        let query_filter = SpatialQueryFilter::from_excluded_entities([owner_entity]);

        let ground_shape = sensor_shape
            .map(|WadeAvian3dSensorShape(shape)| shape)
            .or(collider);
        let grounded = if let Some(ground_shape) = ground_shape {
            spatial_query
                .cast_shape_predicate(
                    ground_shape,
                    position.0,
                    rotation.0,
                    Dir3::NEG_Y,
                    &ShapeCastConfig::from_max_distance(sensors.ground_contact_epsilon),
                    &query_filter,
                    &|entity| !not_ground_query.contains(entity),
                )
                .is_some()
        } else {
            spatial_query
                .cast_ray_predicate(
                    position.0,
                    Dir3::NEG_Y,
                    sensors.ground_contact_epsilon,
                    true,
                    &query_filter,
                    &|entity| !not_ground_query.contains(entity),
                )
                .is_some()
        };

        let submerged = spatial_query
            .shape_intersections(
                &Collider::sphere(sensors.water_probe_radius),
                position.0 + sensors.water_probe_offset,
                Quaternion::IDENTITY,
                &query_filter,
            )
            .into_iter()
            .any(|entity| water_query.contains(entity));

        sensors.output = WadeEnvironmentSample {
            grounded,
            submerged,
        };
    }
}

fn apply_motors_system(
    mut query: Query<(
        &WadeMotor,
        &mut LinearVelocity,
        &mut Rotation,
        Option<&WadeToggle>,
    )>,
) {
    for (motor, mut linear_velocity, mut rotation, wade_toggle) in query.iter_mut() {
        match wade_toggle.copied().unwrap_or_default() {
            WadeToggle::Disabled | WadeToggle::SenseOnly => continue,
            WadeToggle::Enabled => {}
        }
        linear_velocity.0 = motor.velocity();
        if let Some(target_rotation) = motor.rotation {
            if target_rotation.is_finite() {
                rotation.0 = target_rotation;
            }
        }
    }
}
