//! Binding table from physical elements to semantic actions
//!
//! At most one action per element; later bindings overwrite earlier ones.
//! Elements absent from the table are silently ignored by the dispatcher.
//! The table is built once at startup from the static defaults plus optional
//! config-file overrides, then shared read-mostly behind an `RwLock`.

use std::collections::HashMap;

use crate::actions::ControlAction;
use crate::elements::ElementId;

/// Error raised while applying binding overrides from config
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("unknown element identifier '{0}'")]
    UnknownElement(String),

    #[error("unknown action '{1}' bound to element '{0}'")]
    UnknownAction(String, String),
}

/// Mapping from physical element identifiers to semantic actions
#[derive(Debug, Clone)]
pub struct BindingTable {
    map: HashMap<ElementId, ControlAction>,
}

impl Default for BindingTable {
    /// The factory binding layout, reproduced exactly for config compatibility
    fn default() -> Self {
        let mut table = BindingTable::empty();
        table.bind(ElementId::ButtonX, ControlAction::TrackMute);
        table.bind(ElementId::ButtonCircle, ControlAction::TrackSolo);
        table.bind(ElementId::ButtonSquare, ControlAction::TrackArm);
        table.bind(ElementId::ButtonTriangle, ControlAction::TrackNext);
        table.bind(ElementId::LeftShoulder, ControlAction::TrackPrevious);
        table.bind(ElementId::RightShoulder, ControlAction::TrackVolumeInc);
        table.bind(ElementId::LeftTrigger, ControlAction::TrackVolumeDec);
        table.bind(ElementId::RightTrigger, ControlAction::TransportRecord);
        table.bind(ElementId::DpadLeft, ControlAction::PannerAzimuthLeft);
        table.bind(ElementId::DpadRight, ControlAction::PannerAzimuthRight);
        table.bind(ElementId::DpadUp, ControlAction::PannerElevationInc);
        table.bind(ElementId::DpadDown, ControlAction::PannerElevationDec);
        table.bind(ElementId::LeftThumbstickButton, ControlAction::TransportPlay);
        table.bind(ElementId::RightThumbstickButton, ControlAction::TransportStop);
        table.bind(ElementId::TouchpadButton, ControlAction::TransportUndo);
        table
    }
}

impl BindingTable {
    /// Create an empty table (no elements bound)
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    /// Resolve an element to its bound action, if any
    pub fn lookup(&self, element: ElementId) -> Option<ControlAction> {
        self.map.get(&element).copied()
    }

    /// Bind an element to an action, overwriting any previous binding
    ///
    /// Returns the action previously bound to the element, if any.
    pub fn bind(&mut self, element: ElementId, action: ControlAction) -> Option<ControlAction> {
        self.map.insert(element, action)
    }

    /// Remove the binding for an element
    pub fn unbind(&mut self, element: ElementId) -> Option<ControlAction> {
        self.map.remove(&element)
    }

    /// Apply config-file overrides given as (element name, action name) pairs
    ///
    /// Names outside the known element/action sets are rejected rather than
    /// silently dropped so that config typos surface at startup.
    pub fn apply_overrides(
        &mut self,
        overrides: &HashMap<String, String>,
    ) -> Result<(), BindingError> {
        for (element_name, action_name) in overrides {
            let element = ElementId::from_name(element_name)
                .ok_or_else(|| BindingError::UnknownElement(element_name.clone()))?;
            let action = ControlAction::from_name(action_name).ok_or_else(|| {
                BindingError::UnknownAction(element_name.clone(), action_name.clone())
            })?;
            self.bind(element, action);
        }
        Ok(())
    }

    /// Number of bound elements
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no elements are bound
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over bindings in stable element-declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, ControlAction)> + '_ {
        ElementId::ALL
            .iter()
            .filter_map(|e| self.map.get(e).map(|a| (*e, *a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_literal() {
        // Literal round-trip against the factory layout, all 15 entries
        let table = BindingTable::default();
        let expected = [
            (ElementId::ButtonX, ControlAction::TrackMute),
            (ElementId::ButtonCircle, ControlAction::TrackSolo),
            (ElementId::ButtonSquare, ControlAction::TrackArm),
            (ElementId::ButtonTriangle, ControlAction::TrackNext),
            (ElementId::LeftShoulder, ControlAction::TrackPrevious),
            (ElementId::RightShoulder, ControlAction::TrackVolumeInc),
            (ElementId::LeftTrigger, ControlAction::TrackVolumeDec),
            (ElementId::RightTrigger, ControlAction::TransportRecord),
            (ElementId::DpadLeft, ControlAction::PannerAzimuthLeft),
            (ElementId::DpadRight, ControlAction::PannerAzimuthRight),
            (ElementId::DpadUp, ControlAction::PannerElevationInc),
            (ElementId::DpadDown, ControlAction::PannerElevationDec),
            (ElementId::LeftThumbstickButton, ControlAction::TransportPlay),
            (ElementId::RightThumbstickButton, ControlAction::TransportStop),
            (ElementId::TouchpadButton, ControlAction::TransportUndo),
        ];
        assert_eq!(table.len(), expected.len());
        for (element, action) in expected {
            assert_eq!(table.lookup(element), Some(action), "binding for {element}");
        }
    }

    #[test]
    fn test_unbound_elements_resolve_to_none() {
        let table = BindingTable::default();
        assert_eq!(table.lookup(ElementId::ButtonMenu), None);
        assert_eq!(table.lookup(ElementId::ButtonOptions), None);
        assert_eq!(table.lookup(ElementId::LeftThumbstick), None);
        assert_eq!(table.lookup(ElementId::RightThumbstick), None);
    }

    #[test]
    fn test_later_bindings_overwrite() {
        let mut table = BindingTable::default();
        let previous = table.bind(ElementId::ButtonX, ControlAction::TransportPlay);
        assert_eq!(previous, Some(ControlAction::TrackMute));
        assert_eq!(table.lookup(ElementId::ButtonX), Some(ControlAction::TransportPlay));
    }

    #[test]
    fn test_apply_overrides() {
        let mut table = BindingTable::default();
        let overrides = HashMap::from([
            ("buttonMenu".to_string(), "transportRedo".to_string()),
            ("buttonX".to_string(), "transportStop".to_string()),
        ]);
        table.apply_overrides(&overrides).unwrap();
        assert_eq!(table.lookup(ElementId::ButtonMenu), Some(ControlAction::TransportRedo));
        assert_eq!(table.lookup(ElementId::ButtonX), Some(ControlAction::TransportStop));
    }

    #[test]
    fn test_apply_overrides_rejects_unknown_element() {
        let mut table = BindingTable::default();
        let overrides = HashMap::from([("buttonZ".to_string(), "trackMute".to_string())]);
        let err = table.apply_overrides(&overrides).unwrap_err();
        assert!(matches!(err, BindingError::UnknownElement(_)));
    }

    #[test]
    fn test_apply_overrides_rejects_unknown_action() {
        let mut table = BindingTable::default();
        let overrides = HashMap::from([("buttonX".to_string(), "trackDelete".to_string())]);
        let err = table.apply_overrides(&overrides).unwrap_err();
        assert!(matches!(err, BindingError::UnknownAction(_, _)));
    }
}
