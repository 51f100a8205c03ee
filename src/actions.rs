//! Semantic control actions
//!
//! A `ControlAction` is a discrete, named control intent independent of the
//! physical input that triggered it. The set is closed: the control surface
//! matches exhaustively, so adding a variant forces every surface
//! implementation to decide what to do with it.

use std::fmt;

/// Discrete remote-control intent sent to the audio application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    TrackMute,
    TrackSolo,
    TrackArm,
    TrackVolumeInc,
    TrackVolumeDec,
    TrackPrevious,
    TrackNext,
    PannerAzimuthLeft,
    PannerAzimuthRight,
    PannerElevationInc,
    PannerElevationDec,
    PannerDistanceInc,
    PannerDistanceDec,
    PannerSpreadInc,
    PannerSpreadDec,
    TransportPlay,
    TransportStop,
    TransportRecord,
    TransportUndo,
    TransportRedo,
}

impl ControlAction {
    /// All actions, in declaration order
    pub const ALL: [ControlAction; 20] = [
        ControlAction::TrackMute,
        ControlAction::TrackSolo,
        ControlAction::TrackArm,
        ControlAction::TrackVolumeInc,
        ControlAction::TrackVolumeDec,
        ControlAction::TrackPrevious,
        ControlAction::TrackNext,
        ControlAction::PannerAzimuthLeft,
        ControlAction::PannerAzimuthRight,
        ControlAction::PannerElevationInc,
        ControlAction::PannerElevationDec,
        ControlAction::PannerDistanceInc,
        ControlAction::PannerDistanceDec,
        ControlAction::PannerSpreadInc,
        ControlAction::PannerSpreadDec,
        ControlAction::TransportPlay,
        ControlAction::TransportStop,
        ControlAction::TransportRecord,
        ControlAction::TransportUndo,
        ControlAction::TransportRedo,
    ];

    /// Canonical action name as used in config files and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::TrackMute => "trackMute",
            ControlAction::TrackSolo => "trackSolo",
            ControlAction::TrackArm => "trackArm",
            ControlAction::TrackVolumeInc => "trackVolumeInc",
            ControlAction::TrackVolumeDec => "trackVolumeDec",
            ControlAction::TrackPrevious => "trackPrevious",
            ControlAction::TrackNext => "trackNext",
            ControlAction::PannerAzimuthLeft => "pannerAzimuthLeft",
            ControlAction::PannerAzimuthRight => "pannerAzimuthRight",
            ControlAction::PannerElevationInc => "pannerElevationInc",
            ControlAction::PannerElevationDec => "pannerElevationDec",
            ControlAction::PannerDistanceInc => "pannerDistanceInc",
            ControlAction::PannerDistanceDec => "pannerDistanceDec",
            ControlAction::PannerSpreadInc => "pannerSpreadInc",
            ControlAction::PannerSpreadDec => "pannerSpreadDec",
            ControlAction::TransportPlay => "transportPlay",
            ControlAction::TransportStop => "transportStop",
            ControlAction::TransportRecord => "transportRecord",
            ControlAction::TransportUndo => "transportUndo",
            ControlAction::TransportRedo => "transportRedo",
        }
    }

    /// Look up an action by its canonical name
    ///
    /// Returns `None` for names outside the closed set.
    pub fn from_name(name: &str) -> Option<ControlAction> {
        ControlAction::ALL.iter().copied().find(|a| a.as_str() == name)
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trip() {
        for action in ControlAction::ALL {
            assert_eq!(ControlAction::from_name(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_from_name_unknown() {
        assert_eq!(ControlAction::from_name("trackDelete"), None);
        assert_eq!(ControlAction::from_name(""), None);
        // Names are case-sensitive
        assert_eq!(ControlAction::from_name("trackmute"), None);
    }
}
