//! Gamepad input support using GilRs
//!
//! Provides gamepad input integration with hot-plug support, capability
//! profiling, and dispatcher integration.

pub mod axis;
pub mod buttons;
pub mod connection;
pub mod diagnostics;
pub mod profile;
pub mod provider;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::GamepadConfig;
use crate::dispatcher::DispatchEvent;

pub use connection::{ConnectDecision, ConnectionManager, ControllerHandle};
pub use diagnostics::print_gamepad_diagnostics;
pub use profile::ControllerProfile;
pub use provider::GamepadProvider;

/// Initialize gamepad input and attach it to the dispatcher
///
/// # Arguments
/// * `config` - Gamepad configuration
/// * `event_tx` - Dispatcher event channel
///
/// # Returns
/// Running provider instance, or None if gamepad input is disabled or
/// initialization fails
pub fn init(
    config: &GamepadConfig,
    event_tx: mpsc::UnboundedSender<DispatchEvent>,
) -> Option<GamepadProvider> {
    if !config.enabled {
        info!("Gamepad input disabled by config");
        return None;
    }

    info!("Initializing gamepad input...");

    let provider = match GamepadProvider::start(config.product_match.clone(), event_tx) {
        Ok(p) => p,
        Err(e) => {
            warn!("Failed to initialize gamepad provider: {}. Continuing without gamepad.", e);
            return None;
        }
    };

    info!("✅ Gamepad input initialized");
    Some(provider)
}
