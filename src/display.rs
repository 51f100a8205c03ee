//! Controller display state for presentation collaborators
//!
//! The dispatcher is the only writer: it folds every recognized state-change
//! event into a per-element indicator snapshot and publishes it through a
//! `tokio::sync::watch` channel. UI code holds the receiving side and renders
//! whatever the latest snapshot says; it never reaches back into the
//! dispatch path.

use std::collections::HashMap;

use crate::dispatcher::ElementValue;
use crate::elements::ElementId;

/// Current value of one on-screen indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    /// Digital element, pressed flag only
    Button,
    /// Analog trigger, scalar in [0, 1]
    Trigger { value: f32 },
    /// Analog stick, two axes in [-1, 1]
    Stick { x: f32, y: f32 },
}

/// One on-screen indicator: symbol pair plus last-seen raw state
#[derive(Debug, Clone, PartialEq)]
pub struct ElementIndicator {
    pub off_symbol: &'static str,
    pub on_symbol: &'static str,
    pub pressed: bool,
    pub value: IndicatorValue,
}

impl ElementIndicator {
    fn new(off_symbol: &'static str, on_symbol: &'static str, value: IndicatorValue) -> Self {
        Self { off_symbol, on_symbol, pressed: false, value }
    }

    /// Symbol to render for the current pressed state
    pub fn symbol(&self) -> &'static str {
        if self.pressed {
            self.on_symbol
        } else {
            self.off_symbol
        }
    }
}

/// Snapshot of every indicator plus the connection flag
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub connected: bool,
    elements: HashMap<ElementId, ElementIndicator>,
}

impl Default for DisplayState {
    fn default() -> Self {
        let mut elements = HashMap::new();
        for element in ElementId::ALL {
            elements.insert(element, default_indicator(element));
        }
        Self { connected: false, elements }
    }
}

impl DisplayState {
    /// Fold one raw state change into the snapshot
    ///
    /// Keeps each indicator consistent with the last-seen raw value for its
    /// element: digital changes move the pressed flag, analog changes move
    /// the scalar/stick value and leave the pressed flag alone.
    pub fn apply(&mut self, element: ElementId, value: &ElementValue) {
        let Some(indicator) = self.elements.get_mut(&element) else {
            return;
        };
        match *value {
            ElementValue::Digital(pressed) => indicator.pressed = pressed,
            ElementValue::Analog(v) => indicator.value = IndicatorValue::Trigger { value: v },
            ElementValue::Stick { x, y } => indicator.value = IndicatorValue::Stick { x, y },
        }
    }

    /// Reset all indicators to their idle state (controller detached)
    pub fn reset(&mut self) {
        for (element, indicator) in self.elements.iter_mut() {
            *indicator = default_indicator(*element);
        }
    }

    /// Indicator for one element
    pub fn element(&self, element: ElementId) -> Option<&ElementIndicator> {
        self.elements.get(&element)
    }
}

/// Idle indicator for an element, with its symbol pair
fn default_indicator(element: ElementId) -> ElementIndicator {
    let (off, on) = symbols(element);
    let value = match element {
        ElementId::LeftTrigger | ElementId::RightTrigger => IndicatorValue::Trigger { value: 0.0 },
        ElementId::LeftThumbstick | ElementId::RightThumbstick => {
            IndicatorValue::Stick { x: 0.0, y: 0.0 }
        }
        _ => IndicatorValue::Button,
    };
    ElementIndicator::new(off, on, value)
}

/// Off/on symbol names per element, SF-Symbols style
fn symbols(element: ElementId) -> (&'static str, &'static str) {
    match element {
        ElementId::ButtonX => ("xmark.circle", "xmark.circle.fill"),
        ElementId::ButtonCircle => ("circle", "circle.fill"),
        ElementId::ButtonSquare => ("square", "square.fill"),
        ElementId::ButtonTriangle => ("triangle", "triangle.fill"),
        ElementId::LeftShoulder => ("l1.rectangle.roundedbottom", "l1.rectangle.roundedbottom.fill"),
        ElementId::RightShoulder => {
            ("r1.rectangle.roundedbottom", "r1.rectangle.roundedbottom.fill")
        }
        ElementId::LeftTrigger => ("l2.rectangle.roundedtop", "l2.rectangle.roundedtop.fill"),
        ElementId::RightTrigger => ("r2.rectangle.roundedtop", "r2.rectangle.roundedtop.fill"),
        ElementId::DpadLeft => ("dpad.left", "dpad.left.fill"),
        ElementId::DpadRight => ("dpad.right", "dpad.right.fill"),
        ElementId::DpadUp => ("dpad.up", "dpad.up.fill"),
        ElementId::DpadDown => ("dpad.down", "dpad.down.fill"),
        ElementId::LeftThumbstickButton => ("l.joystick.press.down", "l.joystick.press.down.fill"),
        ElementId::RightThumbstickButton => {
            ("r.joystick.press.down", "r.joystick.press.down.fill")
        }
        ElementId::LeftThumbstick => ("l.joystick", "l.joystick.fill"),
        ElementId::RightThumbstick => ("r.joystick", "r.joystick.fill"),
        ElementId::ButtonMenu => ("line.3.horizontal.circle", "line.3.horizontal.circle.fill"),
        ElementId::ButtonOptions => ("option.circle", "option.circle.fill"),
        ElementId::TouchpadButton => ("rectangle.topthird.inset", "rectangle.topthird.inset.filled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        let state = DisplayState::default();
        assert!(!state.connected);
        for element in ElementId::ALL {
            let indicator = state.element(element).unwrap();
            assert!(!indicator.pressed);
            assert_eq!(indicator.symbol(), indicator.off_symbol);
        }
    }

    #[test]
    fn test_apply_digital_moves_pressed_flag() {
        let mut state = DisplayState::default();
        state.apply(ElementId::ButtonX, &ElementValue::Digital(true));
        let indicator = state.element(ElementId::ButtonX).unwrap();
        assert!(indicator.pressed);
        assert_eq!(indicator.symbol(), indicator.on_symbol);

        state.apply(ElementId::ButtonX, &ElementValue::Digital(false));
        assert!(!state.element(ElementId::ButtonX).unwrap().pressed);
    }

    #[test]
    fn test_apply_analog_tracks_last_value() {
        let mut state = DisplayState::default();
        state.apply(ElementId::RightTrigger, &ElementValue::Analog(0.7));
        state.apply(ElementId::RightTrigger, &ElementValue::Analog(0.2));
        assert_eq!(
            state.element(ElementId::RightTrigger).unwrap().value,
            IndicatorValue::Trigger { value: 0.2 }
        );
    }

    #[test]
    fn test_apply_stick_tracks_both_axes() {
        let mut state = DisplayState::default();
        state.apply(ElementId::LeftThumbstick, &ElementValue::Stick { x: 0.5, y: -0.25 });
        assert_eq!(
            state.element(ElementId::LeftThumbstick).unwrap().value,
            IndicatorValue::Stick { x: 0.5, y: -0.25 }
        );
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut state = DisplayState::default();
        state.apply(ElementId::ButtonX, &ElementValue::Digital(true));
        state.apply(ElementId::RightTrigger, &ElementValue::Analog(0.9));
        state.reset();
        assert_eq!(state, DisplayState::default());
    }
}
