//! Control surface sessions (the remote end of the gateway)
//!
//! A `ControlSurface` receives semantic actions and turns them into whatever
//! remote protocol the target application speaks. Invocations are
//! fire-and-forget: the dispatcher never waits for confirmation and a surface
//! must deal with delivery failures itself rather than bubble them back into
//! the input path.
//!
//! All methods take `&self` to support `Arc<dyn ControlSurface>`; surfaces
//! use interior mutability (RwLock) for connection and cached track state.

use anyhow::Result;
use async_trait::async_trait;

use crate::actions::ControlAction;

/// Remote-control session to an external application
#[async_trait]
pub trait ControlSurface: Send + Sync {
    /// Surface name for logs (e.g. "console", "live")
    fn name(&self) -> &str;

    /// Open the session (bind sockets, connect, etc.)
    async fn init(&self) -> Result<()>;

    /// Deliver one semantic action
    ///
    /// Implementations handle remote failures internally; an `Err` here means
    /// the surface itself is unusable, and the dispatcher will log it and
    /// keep processing input.
    async fn notify(&self, action: ControlAction) -> Result<()>;

    /// Close the session gracefully
    async fn shutdown(&self) -> Result<()>;
}

pub mod console;
pub mod live;

pub use console::ConsoleSurface;
pub use live::LiveSurface;
