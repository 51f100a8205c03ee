//! Extended capability profile detection
//!
//! The binding layout assumes the full complement of gamepad elements: four
//! face buttons, shoulders, analog triggers, a D-Pad, and two clickable
//! sticks. Controllers missing any of those are rejected at connect time.

use gilrs::{Axis, Button, Gamepad};

/// Capability summary of one attached controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerProfile {
    pub face_buttons: bool,
    pub shoulders: bool,
    pub triggers: bool,
    pub dpad: bool,
    pub sticks: bool,
    pub thumb_buttons: bool,
}

impl ControllerProfile {
    /// Profile with every required capability present
    pub fn extended() -> Self {
        Self {
            face_buttons: true,
            shoulders: true,
            triggers: true,
            dpad: true,
            sticks: true,
            thumb_buttons: true,
        }
    }

    /// Probe an attached gilrs gamepad for the required element set
    pub fn from_gamepad(gamepad: &Gamepad<'_>) -> Self {
        let has_buttons = |buttons: &[Button]| {
            buttons.iter().all(|b| gamepad.button_code(*b).is_some())
        };
        let has_axes =
            |axes: &[Axis]| axes.iter().all(|a| gamepad.axis_code(*a).is_some());

        Self {
            face_buttons: has_buttons(&[
                Button::South,
                Button::East,
                Button::West,
                Button::North,
            ]),
            shoulders: has_buttons(&[Button::LeftTrigger, Button::RightTrigger]),
            triggers: has_buttons(&[Button::LeftTrigger2, Button::RightTrigger2]),
            dpad: has_buttons(&[
                Button::DPadUp,
                Button::DPadDown,
                Button::DPadLeft,
                Button::DPadRight,
            ]),
            sticks: has_axes(&[
                Axis::LeftStickX,
                Axis::LeftStickY,
                Axis::RightStickX,
                Axis::RightStickY,
            ]),
            thumb_buttons: has_buttons(&[Button::LeftThumb, Button::RightThumb]),
        }
    }

    /// Whether the controller satisfies the extended profile
    pub fn is_extended(&self) -> bool {
        self.face_buttons
            && self.shoulders
            && self.triggers
            && self.dpad
            && self.sticks
            && self.thumb_buttons
    }

    /// Names of missing capability groups, for connect-time reporting
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.face_buttons {
            missing.push("face buttons");
        }
        if !self.shoulders {
            missing.push("shoulder buttons");
        }
        if !self.triggers {
            missing.push("analog triggers");
        }
        if !self.dpad {
            missing.push("directional pad");
        }
        if !self.sticks {
            missing.push("thumbsticks");
        }
        if !self.thumb_buttons {
            missing.push("thumbstick buttons");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_profile() {
        let profile = ControllerProfile::extended();
        assert!(profile.is_extended());
        assert!(profile.missing().is_empty());
    }

    #[test]
    fn test_missing_capabilities_reported() {
        let profile = ControllerProfile { triggers: false, dpad: false, ..ControllerProfile::extended() };
        assert!(!profile.is_extended());
        assert_eq!(profile.missing(), vec!["analog triggers", "directional pad"]);
    }
}
