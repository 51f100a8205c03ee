//! Input event dispatcher - transforms controller state changes into actions
//!
//! Uses a dedicated channel + single task for SEQUENTIAL event processing:
//! input-platform callbacks enqueue immutable event records, the task consumes
//! them in delivery order. No batching, no debouncing, no deduplication - each
//! delivered state change produces at most one surface invocation, and N
//! identical events produce N invocations.

use std::sync::Arc;
use tokio::sync::{mpsc, watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::bindings::BindingTable;
use crate::display::DisplayState;
use crate::elements::ElementId;
use crate::surface::ControlSurface;


/// New raw value of one physical element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementValue {
    /// Digital element pressed/released
    Digital(bool),
    /// Trigger-style analog element, [0, 1]
    Analog(f32),
    /// Stick-style analog element, both axes in [-1, 1]
    Stick { x: f32, y: f32 },
}

/// One state-change notification for a recognized element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub element: ElementId,
    pub value: ElementValue,
}

/// Event record consumed by the dispatch task
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    /// Recognized element changed state
    Input(InputEvent),
    /// Active controller attached
    Connected { name: String },
    /// Active controller detached
    Disconnected,
}

/// Dispatcher - connects provider events to the control surface
pub struct Dispatcher {
    /// Channel sender kept alive to prevent task shutdown
    event_tx: mpsc::UnboundedSender<DispatchEvent>,
    _task: JoinHandle<()>,
}

impl Dispatcher {
    /// Spawn the sequential dispatch task
    ///
    /// # Arguments
    /// * `bindings` - Shared binding table (read-mostly)
    /// * `surface` - Control surface receiving resolved actions
    /// * `display_tx` - Display state published to presentation collaborators
    pub fn spawn(
        bindings: Arc<RwLock<BindingTable>>,
        surface: Arc<dyn ControlSurface>,
        display_tx: watch::Sender<DisplayState>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<DispatchEvent>();
        let task = tokio::spawn(run_loop(event_rx, bindings, surface, display_tx));
        Self { event_tx, _task: task }
    }

    /// Sender for the input side (provider callbacks)
    pub fn sender(&self) -> mpsc::UnboundedSender<DispatchEvent> {
        self.event_tx.clone()
    }
}

/// Sequential event loop; runs until all senders are dropped
pub(crate) async fn run_loop(
    mut event_rx: mpsc::UnboundedReceiver<DispatchEvent>,
    bindings: Arc<RwLock<BindingTable>>,
    surface: Arc<dyn ControlSurface>,
    display_tx: watch::Sender<DisplayState>,
) {
    debug!("Dispatcher started (sequential mode)");

    while let Some(event) = event_rx.recv().await {
        match event {
            DispatchEvent::Input(input) => {
                handle_input(input, &bindings, &surface, &display_tx).await;
            }
            DispatchEvent::Connected { name } => {
                debug!("Dispatcher routing events for \"{}\"", name);
                display_tx.send_modify(|state| state.connected = true);
            }
            DispatchEvent::Disconnected => {
                debug!("Dispatcher detached from controller");
                display_tx.send_modify(|state| {
                    state.connected = false;
                    state.reset();
                });
            }
        }
    }

    debug!("Dispatcher stopped");
}

/// Handle one state-change event: display update, binding lookup, dispatch
async fn handle_input(
    event: InputEvent,
    bindings: &Arc<RwLock<BindingTable>>,
    surface: &Arc<dyn ControlSurface>,
    display_tx: &watch::Sender<DisplayState>,
) {
    trace!("Input event: {} = {:?}", event.element, event.value);

    display_tx.send_modify(|state| state.apply(event.element, &event.value));

    // Unbound elements are silently ignored
    let Some(action) = bindings.read().await.lookup(event.element) else {
        trace!("No binding for {}, ignoring", event.element);
        return;
    };

    debug!("Dispatching {} for {}", action, event.element);

    // Surface failures must never block further input processing
    if let Err(e) = surface.notify(action).await {
        warn!("Surface '{}' failed on {}: {}", surface.name(), action, e);
    }
}
