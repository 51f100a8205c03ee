//! GilRs gamepad provider with hot-plug support
//!
//! Runs the blocking gilrs event loop on a dedicated thread and forwards
//! resolved events into the dispatcher channel. Wireless discovery runs for
//! the life of the provider: it starts with the loop and is guaranteed to
//! stop on shutdown, both on the explicit path and on drop.
//!
//! The delivery context here is never the application's async context; all
//! shared state crosses over as immutable event records on the channel.

use anyhow::Result;
use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::axis::{is_vertical, resolve_axis};
use super::buttons::resolve_button;
use super::connection::{ConnectDecision, ConnectionManager, ControllerHandle};
use super::profile::ControllerProfile;
use crate::dispatcher::{DispatchEvent, ElementValue, InputEvent};
use crate::elements::ElementId;

/// How long to poll for controller enumeration at startup
/// (Bluetooth controllers need a moment to announce themselves)
const INITIAL_SCAN: Duration = Duration::from_secs(2);

/// Interval for stale-connection and reconnect checks
const RECONNECT_INTERVAL: Duration = Duration::from_secs(2);

/// Gamepad provider handle; dropping it stops discovery and the event loop
pub struct GamepadProvider {
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl GamepadProvider {
    /// Start the provider and its blocking event loop
    ///
    /// # Arguments
    /// * `product_match` - Optional case-insensitive substring filter on the
    ///   controller product name
    /// * `event_tx` - Dispatcher channel receiving lifecycle and input events
    pub fn start(
        product_match: Option<String>,
        event_tx: mpsc::UnboundedSender<DispatchEvent>,
    ) -> Result<Self> {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);

        // gilrs is not Send-safe; it lives entirely on this thread
        std::thread::spawn(move || {
            event_loop_blocking(product_match, event_tx, shutdown_rx);
        });

        Ok(Self { shutdown_tx: Some(shutdown_tx) })
    }

    /// Stop discovery and the event loop
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.try_send(());
            info!("Gamepad provider shutdown requested");
        }
    }
}

impl Drop for GamepadProvider {
    fn drop(&mut self) {
        // Discovery must stop on every exit path
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.try_send(());
        }
    }
}

/// Loop-local routing state alongside the connection state machine
struct LoopState {
    manager: ConnectionManager,
    /// gilrs id of the active controller (the manager only sees handles)
    active_id: Option<GamepadId>,
    /// Last-seen stick axes, so one axis change emits a coherent (x, y) pair
    sticks: HashMap<ElementId, (f32, f32)>,
}

/// Main event loop (runs in dedicated blocking thread)
fn event_loop_blocking(
    product_match: Option<String>,
    event_tx: mpsc::UnboundedSender<DispatchEvent>,
    mut shutdown_rx: mpsc::Receiver<()>,
) {
    let mut gilrs = match Gilrs::new() {
        Ok(g) => {
            info!("GilRs initialized, wireless discovery running");
            g
        }
        Err(e) => {
            warn!("Failed to initialize GilRs: {:?}", e);
            return;
        }
    };

    let mut state =
        LoopState { manager: ConnectionManager::new(), active_id: None, sticks: HashMap::new() };

    // Poll events during the initial scan to trigger connection detection
    info!("Scanning for gamepads ({}s)...", INITIAL_SCAN.as_secs());
    let scan_start = std::time::Instant::now();
    while scan_start.elapsed() < INITIAL_SCAN {
        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            if event == EventType::Connected {
                debug!("Gamepad connected during initial scan: {:?}", id);
            }
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    attach_first_match(&gilrs, &product_match, &mut state, &event_tx);
    if state.manager.active().is_none() {
        info!("⏳ No controller attached yet, waiting for hot-plug");
    }

    let mut last_reconnect_check = std::time::Instant::now();

    loop {
        // Check for shutdown signal (non-blocking)
        match shutdown_rx.try_recv() {
            Ok(_) | Err(mpsc::error::TryRecvError::Disconnected) => {
                info!("Gamepad provider shutting down, discovery stopped");
                break;
            }
            Err(mpsc::error::TryRecvError::Empty) => {}
        }

        // Stale-connection and reconnect check
        if last_reconnect_check.elapsed() >= RECONNECT_INTERVAL {
            last_reconnect_check = std::time::Instant::now();

            if let Some(id) = state.active_id {
                if gilrs.connected_gamepad(id).is_none() {
                    handle_disconnect(id, &mut state, &event_tx);
                }
            }
            if state.manager.active().is_none() {
                attach_first_match(&gilrs, &product_match, &mut state, &event_tx);
            }
        }

        // Process gilrs events
        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::Connected => {
                    try_connect(&gilrs, id, &product_match, &mut state, &event_tx);
                }
                EventType::Disconnected => {
                    handle_disconnect(id, &mut state, &event_tx);
                }
                _ => {
                    // State changes from non-active controllers are never routed
                    if !state.manager.is_active(ControllerHandle::from(id)) {
                        continue;
                    }
                    for input in convert_event(&event, &mut state.sticks) {
                        if event_tx.send(DispatchEvent::Input(input)).is_err() {
                            warn!("Event receiver dropped, shutting down gamepad loop");
                            return;
                        }
                    }
                }
            }
        }

        // Sleep briefly to avoid busy-waiting
        std::thread::sleep(Duration::from_millis(4));
    }
}

/// Offer every currently connected gamepad to the connection manager
fn attach_first_match(
    gilrs: &Gilrs,
    product_match: &Option<String>,
    state: &mut LoopState,
    event_tx: &mpsc::UnboundedSender<DispatchEvent>,
) {
    let candidates: Vec<_> = gilrs
        .gamepads()
        .filter(|(_, gp)| gp.is_connected())
        .map(|(id, _)| id)
        .collect();
    for id in candidates {
        try_connect(gilrs, id, product_match, state, event_tx);
        if state.manager.active().is_some() {
            break;
        }
    }
}

/// Offer one gamepad to the connection manager, honoring the product filter
fn try_connect(
    gilrs: &Gilrs,
    id: GamepadId,
    product_match: &Option<String>,
    state: &mut LoopState,
    event_tx: &mpsc::UnboundedSender<DispatchEvent>,
) {
    let Some(gamepad) = gilrs.connected_gamepad(id) else {
        return;
    };
    let name = gamepad.name().to_string();

    if let Some(pattern) = product_match {
        if !name.to_lowercase().contains(&pattern.to_lowercase()) {
            debug!("Gamepad \"{}\" doesn't match product filter \"{}\"", name, pattern);
            return;
        }
    }

    let profile = ControllerProfile::from_gamepad(&gamepad);
    match state.manager.on_connect(ControllerHandle::from(id), &name, &profile) {
        ConnectDecision::Accepted => {
            state.active_id = Some(id);
            state.sticks.clear();
            if event_tx.send(DispatchEvent::Connected { name }).is_err() {
                warn!("Event receiver dropped during connect");
            }
        }
        // Rejections are reported by the connection manager; nothing to route
        ConnectDecision::AlreadyActive
        | ConnectDecision::RejectedMissingProfile { .. }
        | ConnectDecision::RejectedBusy { .. } => {}
    }
}

/// Tear down routing state when the active controller detaches
fn handle_disconnect(
    id: GamepadId,
    state: &mut LoopState,
    event_tx: &mpsc::UnboundedSender<DispatchEvent>,
) {
    if state.manager.on_disconnect(ControllerHandle::from(id)) {
        state.active_id = None;
        state.sticks.clear();
        if event_tx.send(DispatchEvent::Disconnected).is_err() {
            warn!("Event receiver dropped during disconnect");
        }
    }
}

/// Convert one gilrs event into input event(s) for the dispatcher
///
/// Unrecognized elements resolve to nothing and are dropped here.
fn convert_event(
    event: &EventType,
    sticks: &mut HashMap<ElementId, (f32, f32)>,
) -> Vec<InputEvent> {
    match *event {
        EventType::ButtonPressed(button, _) => button_event(button, true).into_iter().collect(),
        EventType::ButtonReleased(button, _) => button_event(button, false).into_iter().collect(),
        // Analog trigger travel resolves to the same element as the L2/R2 press
        EventType::ButtonChanged(button @ (Button::LeftTrigger2 | Button::RightTrigger2), value, _) => {
            trigger_travel(button, value).into_iter().collect()
        }
        EventType::AxisChanged(axis, value, _) => {
            axis_event(axis, value, sticks).into_iter().collect()
        }
        _ => vec![],
    }
}

/// Digital press/release on a recognized button
fn button_event(button: Button, pressed: bool) -> Option<InputEvent> {
    resolve_button(button)
        .map(|element| InputEvent { element, value: ElementValue::Digital(pressed) })
}

/// Trigger travel update in [0, 1]
fn trigger_travel(button: Button, value: f32) -> Option<InputEvent> {
    resolve_button(button).map(|element| InputEvent { element, value: ElementValue::Analog(value) })
}

/// Axis update; stick axes are coupled into a single (x, y) value
fn axis_event(
    axis: Axis,
    value: f32,
    sticks: &mut HashMap<ElementId, (f32, f32)>,
) -> Option<InputEvent> {
    match resolve_axis(axis)? {
        element @ (ElementId::LeftThumbstick | ElementId::RightThumbstick) => {
            let buffer = sticks.entry(element).or_insert((0.0, 0.0));
            if is_vertical(axis) {
                buffer.1 = value;
            } else {
                buffer.0 = value;
            }
            Some(InputEvent { element, value: ElementValue::Stick { x: buffer.0, y: buffer.1 } })
        }
        element => Some(InputEvent { element, value: ElementValue::Analog(value) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_press_and_release() {
        assert_eq!(
            button_event(Button::South, true),
            Some(InputEvent { element: ElementId::ButtonX, value: ElementValue::Digital(true) })
        );
        assert_eq!(
            button_event(Button::South, false),
            Some(InputEvent { element: ElementId::ButtonX, value: ElementValue::Digital(false) })
        );
    }

    #[test]
    fn test_unrecognized_button_drops_event() {
        assert_eq!(button_event(Button::Unknown, true), None);
        assert_eq!(button_event(Button::C, true), None);
    }

    #[test]
    fn test_trigger_travel() {
        assert_eq!(
            trigger_travel(Button::RightTrigger2, 0.7),
            Some(InputEvent {
                element: ElementId::RightTrigger,
                value: ElementValue::Analog(0.7),
            })
        );
    }

    #[test]
    fn test_stick_axes_couple_into_pairs() {
        let mut sticks = HashMap::new();
        axis_event(Axis::LeftStickX, 0.5, &mut sticks);
        let event = axis_event(Axis::LeftStickY, -0.25, &mut sticks);
        assert_eq!(
            event,
            Some(InputEvent {
                element: ElementId::LeftThumbstick,
                value: ElementValue::Stick { x: 0.5, y: -0.25 },
            })
        );
    }

    #[test]
    fn test_trigger_axis_is_scalar() {
        let mut sticks = HashMap::new();
        assert_eq!(
            axis_event(Axis::RightZ, 0.9, &mut sticks),
            Some(InputEvent { element: ElementId::RightTrigger, value: ElementValue::Analog(0.9) })
        );
        assert!(sticks.is_empty());
    }

    #[test]
    fn test_unknown_axis_drops_event() {
        let mut sticks = HashMap::new();
        assert_eq!(axis_event(Axis::Unknown, 0.3, &mut sticks), None);
    }
}
