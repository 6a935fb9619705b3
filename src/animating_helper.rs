use std::mem::discriminant;

use bevy::prelude::*;

use crate::{WadeActivity, WadeController};

/// Utility for deciding when to switch animations.
///
/// Feed it a state every frame - typically [`WadeController::activity`] or
/// [`WadeController::state`] - and it reports whether the animation should keep playing or be
/// replaced.
///
/// ```
/// # use bevy_wade::{WadeActivity, WadeAnimatingState, WadeAnimatingStateDirective};
/// let mut animating_state = WadeAnimatingState::<WadeActivity>::default();
/// assert!(matches!(
///     animating_state.by_discriminant(WadeActivity::Jumping(6.0)),
///     WadeAnimatingStateDirective::Alter { old_state: None, .. }
/// ));
/// // Only the velocity changed - keep playing the jump animation.
/// assert!(matches!(
///     animating_state.by_discriminant(WadeActivity::Jumping(5.5)),
///     WadeAnimatingStateDirective::Maintain { .. }
/// ));
/// assert_eq!(animating_state.updates_since_change(), 1);
/// ```
#[derive(Component)]
pub struct WadeAnimatingState<State> {
    current: Option<State>,
    updates_since_change: u32,
}

impl<State> Default for WadeAnimatingState<State> {
    fn default() -> Self {
        Self {
            current: None,
            updates_since_change: 0,
        }
    }
}

pub enum WadeAnimatingStateDirective<'a, State> {
    /// The animation should continue. `state` may carry updated data (e.g. speed).
    Maintain { state: &'a State },
    /// A new animation should start. `old_state` is `None` on the very first update.
    Alter {
        old_state: Option<State>,
        state: &'a State,
    },
}

impl<State> WadeAnimatingState<State> {
    /// The state from the last update, if any.
    pub fn get(&self) -> Option<&State> {
        self.current.as_ref()
    }

    /// How many updates in a row kept the current animation. Zero right after it started.
    pub fn updates_since_change(&self) -> u32 {
        self.updates_since_change
    }

    /// Store the new state and decide using `same_animation`, which should return `true` if the
    /// old and the new states can share an animation.
    pub fn update_by(
        &mut self,
        new_state: State,
        same_animation: impl FnOnce(&State, &State) -> bool,
    ) -> WadeAnimatingStateDirective<'_, State> {
        let old_state = self.current.take();
        let keep_animation = old_state
            .as_ref()
            .is_some_and(|old_state| same_animation(old_state, &new_state));
        if keep_animation {
            self.updates_since_change = self.updates_since_change.saturating_add(1);
            WadeAnimatingStateDirective::Maintain {
                state: self.current.insert(new_state),
            }
        } else {
            self.updates_since_change = 0;
            WadeAnimatingStateDirective::Alter {
                old_state,
                state: self.current.insert(new_state),
            }
        }
    }

    pub fn by_value(&mut self, new_state: State) -> WadeAnimatingStateDirective<'_, State>
    where
        State: PartialEq,
    {
        self.update_by(new_state, |old, new| old == new)
    }

    /// Only switch animations when the enum variant changes, ignoring the data it carries.
    pub fn by_discriminant(&mut self, new_state: State) -> WadeAnimatingStateDirective<'_, State> {
        self.update_by(new_state, |old, new| discriminant(old) == discriminant(new))
    }
}

impl WadeAnimatingState<WadeActivity> {
    /// Update from the controller's [activity](WadeController::activity).
    ///
    /// Changes in the vertical velocity carried by `Jumping` and `Falling` do not restart the
    /// animation.
    pub fn by_controller(
        &mut self,
        controller: &WadeController,
    ) -> WadeAnimatingStateDirective<'_, WadeActivity> {
        self.by_discriminant(controller.activity())
    }
}
