//! Controller attach/detach lifecycle
//!
//! Two-state machine: Disconnected (initial) and Connected with exactly one
//! active handle. Connect attempts are checked against the extended
//! capability profile; rejections are reported to the caller instead of being
//! silently swallowed. A second controller attaching while one is active is
//! rejected - the active connection is never replaced implicitly.

use tracing::{debug, info, warn};

use super::profile::ControllerProfile;

/// Opaque handle for one attached controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerHandle(pub usize);

impl From<gilrs::GamepadId> for ControllerHandle {
    fn from(id: gilrs::GamepadId) -> Self {
        Self(id.into())
    }
}

/// Outcome of a connect attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectDecision {
    /// Controller accepted; events from this handle are now routed
    Accepted,
    /// Same handle connected again; no state change
    AlreadyActive,
    /// Controller lacks the extended capability profile
    RejectedMissingProfile { missing: Vec<&'static str> },
    /// Another controller is already active
    RejectedBusy { active: ControllerHandle },
}

/// Connection state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected { handle: ControllerHandle, name: String },
}

/// Tracks the zero-or-one active controller
#[derive(Debug)]
pub struct ConnectionManager {
    state: ConnectionState,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self { state: ConnectionState::Disconnected }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Handle of the active controller, if any
    pub fn active(&self) -> Option<ControllerHandle> {
        match &self.state {
            ConnectionState::Connected { handle, .. } => Some(*handle),
            ConnectionState::Disconnected => None,
        }
    }

    /// Whether events from this handle should be routed
    pub fn is_active(&self, handle: ControllerHandle) -> bool {
        self.active() == Some(handle)
    }

    /// Process a connect event for a controller with the given profile
    pub fn on_connect(
        &mut self,
        handle: ControllerHandle,
        name: &str,
        profile: &ControllerProfile,
    ) -> ConnectDecision {
        if let ConnectionState::Connected { handle: active, name: active_name } = &self.state {
            if *active == handle {
                debug!("Controller \"{}\" already active, ignoring connect", name);
                return ConnectDecision::AlreadyActive;
            }
            warn!(
                "⚠️  Controller \"{}\" rejected: \"{}\" is already connected",
                name, active_name
            );
            return ConnectDecision::RejectedBusy { active: *active };
        }

        if !profile.is_extended() {
            let missing = profile.missing();
            warn!(
                "⚠️  Controller \"{}\" rejected: missing {}",
                name,
                missing.join(", ")
            );
            return ConnectDecision::RejectedMissingProfile { missing };
        }

        info!("✅ Controller connected: \"{}\" (handle {})", name, handle.0);
        self.state = ConnectionState::Connected { handle, name: name.to_string() };
        ConnectDecision::Accepted
    }

    /// Process a disconnect event
    ///
    /// Returns true when the active controller detached (subscription is
    /// invalidated); disconnects of non-active handles are ignored.
    pub fn on_disconnect(&mut self, handle: ControllerHandle) -> bool {
        match &self.state {
            ConnectionState::Connected { handle: active, name } if *active == handle => {
                info!("🔌 Controller disconnected: \"{}\"", name);
                self.state = ConnectionState::Disconnected;
                true
            }
            _ => {
                debug!("Disconnect for non-active handle {}, ignoring", handle.0);
                false
            }
        }
    }
}
