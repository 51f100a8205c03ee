//! Console surface - logs all actions for testing and debugging

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::actions::ControlAction;
use crate::surface::ControlSurface;

/// ConsoleSurface logs every dispatched action instead of talking to a DAW
///
/// This is useful for:
/// - Testing bindings without a running audio application
/// - Debugging the dispatch flow
/// - Development without hardware dependencies
pub struct ConsoleSurface {
    name: String,
    /// Track if the surface is initialized
    initialized: Arc<RwLock<bool>>,
    /// Execution counter for debugging
    execution_count: Arc<RwLock<u64>>,
}

impl ConsoleSurface {
    /// Create a new ConsoleSurface with a given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initialized: Arc::new(RwLock::new(false)),
            execution_count: Arc::new(RwLock::new(0)),
        }
    }
}

#[async_trait]
impl ControlSurface for ConsoleSurface {
    fn name(&self) -> &str {
        &self.name
    }

    async fn init(&self) -> Result<()> {
        *self.initialized.write().await = true;
        *self.execution_count.write().await = 0;
        info!("✅ ConsoleSurface '{}' initialized", self.name);
        Ok(())
    }

    async fn notify(&self, action: ControlAction) -> Result<()> {
        if !*self.initialized.read().await {
            warn!("⚠️  ConsoleSurface '{}' not initialized, skipping action", self.name);
            return Ok(());
        }

        let mut count = self.execution_count.write().await;
        *count += 1;
        let exec_num = *count;
        drop(count);

        info!(
            "🎮 [{}] Surface '{}' → {} [exec #{}]",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            self.name,
            action,
            exec_num
        );

        debug!(
            surface = %self.name,
            action = action.as_str(),
            exec_count = exec_num,
            "ConsoleSurface action"
        );

        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        let was_initialized = *self.initialized.read().await;

        if was_initialized {
            let final_count = *self.execution_count.read().await;
            info!(
                "🛑 ConsoleSurface '{}' shutting down (delivered {} actions)",
                self.name, final_count
            );
        }

        *self.initialized.write().await = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_surface_lifecycle() {
        let surface = ConsoleSurface::new("test");

        assert_eq!(surface.name(), "test");
        assert!(!*surface.initialized.read().await);

        surface.init().await.unwrap();
        assert!(*surface.initialized.read().await);

        surface.notify(ControlAction::TrackMute).await.unwrap();
        surface.notify(ControlAction::TransportPlay).await.unwrap();
        assert_eq!(*surface.execution_count.read().await, 2);

        surface.shutdown().await.unwrap();
        assert!(!*surface.initialized.read().await);
    }

    #[tokio::test]
    async fn test_console_surface_notify_without_init() {
        let surface = ConsoleSurface::new("uninit_test");

        // Should succeed but warn (not error)
        let result = surface.notify(ControlAction::TrackSolo).await;

        assert!(result.is_ok());
        assert_eq!(*surface.execution_count.read().await, 0);
    }

    #[tokio::test]
    async fn test_console_surface_counts_every_delivery() {
        let surface = ConsoleSurface::new("multi_test");
        surface.init().await.unwrap();

        for _ in 0..10 {
            surface.notify(ControlAction::TrackVolumeInc).await.unwrap();
        }

        assert_eq!(*surface.execution_count.read().await, 10);
    }
}
