//! Physical controller element identifiers
//!
//! Every physical control on the gamepad has a stable symbolic identifier,
//! fixed at startup. Raw platform element references (gilrs buttons and axes)
//! resolve to exactly one of these, or to nothing at all for elements the
//! gateway does not know about.
//!
//! The string spellings (`buttonX`, `dpad.left`, ...) are the canonical names
//! used in config files and logs and must stay stable: the default binding
//! table is keyed on them.

use std::fmt;

/// Stable identifier for one physical controller element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    // Face buttons (PlayStation naming)
    ButtonX,
    ButtonCircle,
    ButtonSquare,
    ButtonTriangle,

    // Shoulder buttons and analog triggers
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,

    // Directional pad
    DpadLeft,
    DpadRight,
    DpadUp,
    DpadDown,

    // Thumbstick click-buttons and analog sticks
    LeftThumbstickButton,
    RightThumbstickButton,
    LeftThumbstick,
    RightThumbstick,

    // Menu cluster
    ButtonMenu,
    ButtonOptions,
    TouchpadButton,
}

impl ElementId {
    /// All known elements, in declaration order
    pub const ALL: [ElementId; 19] = [
        ElementId::ButtonX,
        ElementId::ButtonCircle,
        ElementId::ButtonSquare,
        ElementId::ButtonTriangle,
        ElementId::LeftShoulder,
        ElementId::RightShoulder,
        ElementId::LeftTrigger,
        ElementId::RightTrigger,
        ElementId::DpadLeft,
        ElementId::DpadRight,
        ElementId::DpadUp,
        ElementId::DpadDown,
        ElementId::LeftThumbstickButton,
        ElementId::RightThumbstickButton,
        ElementId::LeftThumbstick,
        ElementId::RightThumbstick,
        ElementId::ButtonMenu,
        ElementId::ButtonOptions,
        ElementId::TouchpadButton,
    ];

    /// Canonical identifier string
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::ButtonX => "buttonX",
            ElementId::ButtonCircle => "buttonCircle",
            ElementId::ButtonSquare => "buttonSquare",
            ElementId::ButtonTriangle => "buttonTriangle",
            ElementId::LeftShoulder => "leftShoulder",
            ElementId::RightShoulder => "rightShoulder",
            ElementId::LeftTrigger => "leftTrigger",
            ElementId::RightTrigger => "rightTrigger",
            ElementId::DpadLeft => "dpad.left",
            ElementId::DpadRight => "dpad.right",
            ElementId::DpadUp => "dpad.up",
            ElementId::DpadDown => "dpad.down",
            ElementId::LeftThumbstickButton => "leftThumbstickButton",
            ElementId::RightThumbstickButton => "rightThumbstickButton",
            ElementId::LeftThumbstick => "leftThumbstick",
            ElementId::RightThumbstick => "rightThumbstick",
            ElementId::ButtonMenu => "buttonMenu",
            ElementId::ButtonOptions => "buttonOptions",
            ElementId::TouchpadButton => "touchpadButton",
        }
    }

    /// Look up an element by its canonical identifier string
    pub fn from_name(name: &str) -> Option<ElementId> {
        ElementId::ALL.iter().copied().find(|e| e.as_str() == name)
    }

    /// Whether this element carries a continuous value (trigger or stick)
    /// rather than a pressed/released boolean
    pub fn is_analog(&self) -> bool {
        matches!(
            self,
            ElementId::LeftTrigger
                | ElementId::RightTrigger
                | ElementId::LeftThumbstick
                | ElementId::RightThumbstick
        )
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
