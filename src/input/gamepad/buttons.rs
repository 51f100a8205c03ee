//! Button resolution for gilrs controllers
//!
//! gilrs reports face buttons by physical position (South, East, North,
//! West). This gateway targets PlayStation-style pads, so positions map to
//! PlayStation names:
//!
//! ```text
//!     [Triangle/North]          (top)
//! [Square/West] [Circle/East]   (left/right)
//!     [X/South]                 (bottom)
//! ```
//!
//! Resolution is a pure function of the raw button reference. Buttons outside
//! the known set resolve to `None` and are dropped upstream without error.

use gilrs::Button;
use tracing::debug;

use crate::elements::ElementId;

/// Resolve a gilrs button to its physical element identifier
pub fn resolve_button(button: Button) -> Option<ElementId> {
    match button {
        // Face buttons (physical position -> PlayStation names)
        Button::South => Some(ElementId::ButtonX),
        Button::East => Some(ElementId::ButtonCircle),
        Button::West => Some(ElementId::ButtonSquare),
        Button::North => Some(ElementId::ButtonTriangle),

        // Shoulder buttons (L1/R1) and trigger buttons (L2/R2)
        Button::LeftTrigger => Some(ElementId::LeftShoulder),
        Button::RightTrigger => Some(ElementId::RightShoulder),
        Button::LeftTrigger2 => Some(ElementId::LeftTrigger),
        Button::RightTrigger2 => Some(ElementId::RightTrigger),

        // Directional pad
        Button::DPadUp => Some(ElementId::DpadUp),
        Button::DPadDown => Some(ElementId::DpadDown),
        Button::DPadLeft => Some(ElementId::DpadLeft),
        Button::DPadRight => Some(ElementId::DpadRight),

        // Stick clicks
        Button::LeftThumb => Some(ElementId::LeftThumbstickButton),
        Button::RightThumb => Some(ElementId::RightThumbstickButton),

        // Menu cluster. gilrs has no dedicated touchpad-click code; the
        // Mode (PS) button stands in for it on DualShock/DualSense pads.
        Button::Start => Some(ElementId::ButtonMenu),
        Button::Select => Some(ElementId::ButtonOptions),
        Button::Mode => Some(ElementId::TouchpadButton),

        _ => {
            debug!("Unrecognized gilrs button: {:?}", button);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_buttons_playstation_layout() {
        assert_eq!(resolve_button(Button::South), Some(ElementId::ButtonX));
        assert_eq!(resolve_button(Button::East), Some(ElementId::ButtonCircle));
        assert_eq!(resolve_button(Button::West), Some(ElementId::ButtonSquare));
        assert_eq!(resolve_button(Button::North), Some(ElementId::ButtonTriangle));
    }

    #[test]
    fn test_shoulders_and_triggers() {
        assert_eq!(resolve_button(Button::LeftTrigger), Some(ElementId::LeftShoulder));
        assert_eq!(resolve_button(Button::RightTrigger), Some(ElementId::RightShoulder));
        assert_eq!(resolve_button(Button::LeftTrigger2), Some(ElementId::LeftTrigger));
        assert_eq!(resolve_button(Button::RightTrigger2), Some(ElementId::RightTrigger));
    }

    #[test]
    fn test_dpad_buttons() {
        assert_eq!(resolve_button(Button::DPadUp), Some(ElementId::DpadUp));
        assert_eq!(resolve_button(Button::DPadDown), Some(ElementId::DpadDown));
        assert_eq!(resolve_button(Button::DPadLeft), Some(ElementId::DpadLeft));
        assert_eq!(resolve_button(Button::DPadRight), Some(ElementId::DpadRight));
    }

    #[test]
    fn test_menu_cluster() {
        assert_eq!(resolve_button(Button::Start), Some(ElementId::ButtonMenu));
        assert_eq!(resolve_button(Button::Select), Some(ElementId::ButtonOptions));
        assert_eq!(resolve_button(Button::Mode), Some(ElementId::TouchpadButton));
    }

    #[test]
    fn test_unrecognized_buttons_resolve_to_none() {
        assert_eq!(resolve_button(Button::C), None);
        assert_eq!(resolve_button(Button::Z), None);
        assert_eq!(resolve_button(Button::Unknown), None);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        // Same input -> same output across repeated calls
        for _ in 0..3 {
            assert_eq!(resolve_button(Button::South), Some(ElementId::ButtonX));
            assert_eq!(resolve_button(Button::Unknown), None);
        }
    }
}
