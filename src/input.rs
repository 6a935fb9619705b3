use crate::math::{Float, Vector2};

/// What the player wants the character to do during a single step.
///
/// Produced fresh each step by the game's input handling. bevy-wade never polls input devices
/// itself, so the same sequence of `WadeStepInput`s always replays the same movement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct WadeStepInput {
    /// Directional input relative to the camera. `y` is forward and `x` is right.
    ///
    /// Each axis is expected in `[-1, 1]`. The vector does not need to be normalized, but its
    /// magnitude does not affect the speed either - any non-negligible input moves the character
    /// at full speed in that direction.
    pub direction: Vector2,

    /// The jump button was pressed during this step.
    ///
    /// This must be the press edge and not the button level. Holding the button should only
    /// report `true` on the first step.
    pub jump_pressed: bool,

    /// The swim-up button is held.
    pub ascend: bool,

    /// The swim-down button is held.
    pub descend: bool,
}

impl WadeStepInput {
    /// Input that moves the character in a direction without any action.
    pub fn moving(direction: Vector2) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    /// The vertical swim intent: `1.0` for ascend, `-1.0` for descend, `0.0` for both or neither.
    pub fn vertical_intent(&self) -> Float {
        match (self.ascend, self.descend) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}
