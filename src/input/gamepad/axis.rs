//! Axis resolution for gilrs controllers
//!
//! Triggers resolve to the same element identifiers as their button
//! counterparts, so an analog trigger update dispatches exactly like a
//! trigger press. Stick axes resolve to the stick element; the provider
//! couples X/Y into a single two-axis value.

use gilrs::Axis;
use tracing::debug;

use crate::elements::ElementId;

/// Resolve a gilrs axis to its physical element identifier
pub fn resolve_axis(axis: Axis) -> Option<ElementId> {
    match axis {
        Axis::LeftStickX | Axis::LeftStickY => Some(ElementId::LeftThumbstick),
        Axis::RightStickX | Axis::RightStickY => Some(ElementId::RightThumbstick),
        Axis::LeftZ => Some(ElementId::LeftTrigger),
        Axis::RightZ => Some(ElementId::RightTrigger),
        _ => {
            debug!("Unrecognized gilrs axis: {:?}", axis);
            None
        }
    }
}

/// Whether this axis is the vertical component of a stick
pub fn is_vertical(axis: Axis) -> bool {
    matches!(axis, Axis::LeftStickY | Axis::RightStickY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stick_axes_share_one_element() {
        assert_eq!(resolve_axis(Axis::LeftStickX), Some(ElementId::LeftThumbstick));
        assert_eq!(resolve_axis(Axis::LeftStickY), Some(ElementId::LeftThumbstick));
        assert_eq!(resolve_axis(Axis::RightStickX), Some(ElementId::RightThumbstick));
        assert_eq!(resolve_axis(Axis::RightStickY), Some(ElementId::RightThumbstick));
    }

    #[test]
    fn test_trigger_axes_match_trigger_buttons() {
        assert_eq!(resolve_axis(Axis::LeftZ), Some(ElementId::LeftTrigger));
        assert_eq!(resolve_axis(Axis::RightZ), Some(ElementId::RightTrigger));
    }

    #[test]
    fn test_unknown_axes_resolve_to_none() {
        assert_eq!(resolve_axis(Axis::DPadX), None);
        assert_eq!(resolve_axis(Axis::DPadY), None);
        assert_eq!(resolve_axis(Axis::Unknown), None);
    }

    #[test]
    fn test_vertical_detection() {
        assert!(is_vertical(Axis::LeftStickY));
        assert!(is_vertical(Axis::RightStickY));
        assert!(!is_vertical(Axis::LeftStickX));
        assert!(!is_vertical(Axis::LeftZ));
    }
}
