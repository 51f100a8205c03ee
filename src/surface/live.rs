//! Ableton Live surface via AbletonOSC
//!
//! Speaks the AbletonOSC UDP dialect (default port 11000). Only a subset of
//! the action set has a remote effect today: mute/solo/arm toggles, volume
//! steps, and track selection. The remaining actions are accepted and
//! deliberately do nothing yet; they are placeholders, not failures.
//!
//! Delivery is fire-and-forget over UDP. Send failures are logged here and
//! never surface to the dispatcher.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rosc::{encoder, OscMessage, OscPacket, OscType};
use tokio::net::UdpSocket;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::actions::ControlAction;
use crate::surface::ControlSurface;

/// Volume change per TrackVolumeInc/Dec, in Live's [0, 1] fader range
const VOLUME_STEP: f32 = 0.05;

/// Live's default track fader level, used until we have observed a change
const DEFAULT_VOLUME: f32 = 0.85;

/// Cached state for the currently selected track
///
/// AbletonOSC's setters are absolute, so toggles and relative volume steps
/// are computed against this cache.
#[derive(Debug, Clone, Copy)]
struct TrackState {
    track: u32,
    volume: f32,
    muted: bool,
    soloed: bool,
    armed: bool,
}

impl Default for TrackState {
    fn default() -> Self {
        Self { track: 0, volume: DEFAULT_VOLUME, muted: false, soloed: false, armed: false }
    }
}

/// AbletonOSC session over UDP
pub struct LiveSurface {
    host: String,
    port: u16,
    socket: RwLock<Option<UdpSocket>>,
    state: RwLock<TrackState>,
}

impl LiveSurface {
    /// Create a surface targeting an AbletonOSC listener at host:port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            socket: RwLock::new(None),
            state: RwLock::new(TrackState::default()),
        }
    }

    /// Encode and send one OSC message; failures stay inside this surface
    async fn send(&self, addr: &str, args: Vec<OscType>) {
        let socket = self.socket.read().await;
        let Some(socket) = socket.as_ref() else {
            warn!("⚠️  LiveSurface not initialized, dropping {}", addr);
            return;
        };

        let packet = OscPacket::Message(OscMessage { addr: addr.to_string(), args });
        let buf = match encoder::encode(&packet) {
            Ok(buf) => buf,
            Err(e) => {
                warn!("Failed to encode OSC message {}: {:?}", addr, e);
                return;
            }
        };

        match socket.send(&buf).await {
            Ok(_) => debug!("📤 OSC {} sent", addr),
            Err(e) => warn!("Failed to send OSC message {}: {}", addr, e),
        }
    }

    async fn set_track_flag(&self, addr: &str, track: u32, on: bool) {
        self.send(addr, vec![OscType::Int(track as i32), OscType::Int(on as i32)]).await;
    }
}

#[async_trait]
impl ControlSurface for LiveSurface {
    fn name(&self) -> &str {
        "live"
    }

    async fn init(&self) -> Result<()> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .context("Failed to bind local OSC socket")?;
        socket
            .connect((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Failed to connect to AbletonOSC at {}:{}", self.host, self.port))?;

        *self.socket.write().await = Some(socket);
        *self.state.write().await = TrackState::default();

        info!("✅ LiveSurface connected to AbletonOSC at {}:{}", self.host, self.port);
        Ok(())
    }

    async fn notify(&self, action: ControlAction) -> Result<()> {
        let mut state = self.state.write().await;

        match action {
            ControlAction::TrackMute => {
                state.muted = !state.muted;
                let (track, on) = (state.track, state.muted);
                drop(state);
                self.set_track_flag("/live/track/set/mute", track, on).await;
            }
            ControlAction::TrackSolo => {
                state.soloed = !state.soloed;
                let (track, on) = (state.track, state.soloed);
                drop(state);
                self.set_track_flag("/live/track/set/solo", track, on).await;
            }
            ControlAction::TrackArm => {
                state.armed = !state.armed;
                let (track, on) = (state.track, state.armed);
                drop(state);
                self.set_track_flag("/live/track/set/arm", track, on).await;
            }
            ControlAction::TrackVolumeInc | ControlAction::TrackVolumeDec => {
                let delta = if action == ControlAction::TrackVolumeInc {
                    VOLUME_STEP
                } else {
                    -VOLUME_STEP
                };
                state.volume = step_volume(state.volume, delta);
                let (track, volume) = (state.track, state.volume);
                drop(state);
                self.send(
                    "/live/track/set/volume",
                    vec![OscType::Int(track as i32), OscType::Float(volume)],
                )
                .await;
            }
            ControlAction::TrackPrevious | ControlAction::TrackNext => {
                let track = step_track(state.track, action == ControlAction::TrackNext);
                // Cached per-track flags are stale on a different track
                if track != state.track {
                    *state = TrackState { track, ..TrackState::default() };
                }
                drop(state);
                self.send("/live/view/set/selected_track", vec![OscType::Int(track as i32)])
                    .await;
            }
            ControlAction::PannerAzimuthLeft
            | ControlAction::PannerAzimuthRight
            | ControlAction::PannerElevationInc
            | ControlAction::PannerElevationDec
            | ControlAction::PannerDistanceInc
            | ControlAction::PannerDistanceDec
            | ControlAction::PannerSpreadInc
            | ControlAction::PannerSpreadDec
            | ControlAction::TransportPlay
            | ControlAction::TransportStop
            | ControlAction::TransportRecord
            | ControlAction::TransportUndo
            | ControlAction::TransportRedo => {
                drop(state);
                // Accepted but not wired to a remote address yet
                debug!("No remote mapping for {} yet, ignoring", action);
            }
        }

        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        if self.socket.write().await.take().is_some() {
            info!("🛑 LiveSurface session to {}:{} closed", self.host, self.port);
        }
        Ok(())
    }
}

/// Step a fader level, clamped to Live's [0, 1] range
fn step_volume(volume: f32, delta: f32) -> f32 {
    (volume + delta).clamp(0.0, 1.0)
}

/// Step the selected track index, saturating at track 0
fn step_track(track: u32, forward: bool) -> u32 {
    if forward {
        track + 1
    } else {
        track.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_volume_clamps() {
        assert_eq!(step_volume(0.98, VOLUME_STEP), 1.0);
        assert_eq!(step_volume(0.02, -VOLUME_STEP), 0.0);
        let v = step_volume(0.5, VOLUME_STEP);
        assert!((v - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_step_track_saturates_at_zero() {
        assert_eq!(step_track(0, false), 0);
        assert_eq!(step_track(3, false), 2);
        assert_eq!(step_track(3, true), 4);
    }

    #[tokio::test]
    async fn test_notify_without_init_is_not_an_error() {
        // Uninitialized surface drops the message but never fails the dispatcher
        let surface = LiveSurface::new("127.0.0.1", 11000);
        assert!(surface.notify(ControlAction::TrackMute).await.is_ok());
        assert!(surface.notify(ControlAction::TransportRedo).await.is_ok());
    }

    #[tokio::test]
    async fn test_mute_toggles_cached_state() {
        let surface = LiveSurface::new("127.0.0.1", 11000);
        surface.notify(ControlAction::TrackMute).await.unwrap();
        assert!(surface.state.read().await.muted);
        surface.notify(ControlAction::TrackMute).await.unwrap();
        assert!(!surface.state.read().await.muted);
    }

    #[tokio::test]
    async fn test_track_change_resets_cached_flags() {
        let surface = LiveSurface::new("127.0.0.1", 11000);
        surface.notify(ControlAction::TrackMute).await.unwrap();
        surface.notify(ControlAction::TrackNext).await.unwrap();
        let state = *surface.state.read().await;
        assert_eq!(state.track, 1);
        assert!(!state.muted);
    }
}
