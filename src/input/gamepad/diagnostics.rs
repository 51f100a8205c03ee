//! Gamepad diagnostics tool for troubleshooting detection issues

use gilrs::{Event, EventType, Gilrs};
use std::thread;
use std::time::Duration;
use tracing::info;

use super::profile::ControllerProfile;

/// Print detailed information about all detected gamepads
///
/// This is useful for troubleshooting detection issues, especially for
/// Bluetooth controllers, and shows whether each controller satisfies the
/// extended capability profile the gateway requires.
pub fn print_gamepad_diagnostics() {
    info!("=== Gamepad Diagnostics ===");
    info!("Platform: {}", std::env::consts::OS);
    info!("Initializing gilrs...");

    let mut gilrs = match Gilrs::new() {
        Ok(g) => {
            info!("✅ gilrs initialized successfully");
            g
        }
        Err(e) => {
            info!("❌ Failed to initialize GilRs: {:?}", e);
            info!("This may indicate missing system libraries or permissions issues.");
            return;
        }
    };

    info!("⏳ Waiting for gamepads to connect (5 seconds)...");
    info!("   (Bluetooth controllers may take a moment to wake up)");

    // Poll events for 5 seconds to allow Bluetooth gamepads to connect
    let start = std::time::Instant::now();
    let wait_duration = Duration::from_secs(5);

    while start.elapsed() < wait_duration {
        while let Some(Event { event, .. }) = gilrs.next_event() {
            match event {
                EventType::Connected => {
                    info!("   📶 Gamepad connection detected...");
                }
                EventType::Disconnected => {
                    info!("   📵 Gamepad disconnection detected...");
                }
                _ => {} // Ignore other events during scan
            }
        }
        thread::sleep(Duration::from_millis(100));
    }

    info!("");
    info!("📋 Scan complete. Enumerating detected gamepads...");
    info!("");

    let gamepads: Vec<_> = gilrs.gamepads().collect();

    if gamepads.is_empty() {
        info!("⚠️  No gamepads detected");
        info!("   Please check:");
        info!("   - Gamepad is connected (USB or Bluetooth paired)");
        info!("   - Drivers are installed and the device is visible to the OS");
        return;
    }

    info!("✅ Found {} gamepad(s):", gamepads.len());
    info!("");

    for (id, gamepad) in gamepads {
        info!("📋 Gamepad ID: {:?}", id);
        info!("   Name: \"{}\"", gamepad.name());
        info!("   Connected: {}", gamepad.is_connected());
        info!("   Power Info: {:?}", gamepad.power_info());
        info!("   UUID: {:?}", gamepad.uuid());
        info!("");

        let profile = ControllerProfile::from_gamepad(&gamepad);
        if profile.is_extended() {
            info!("   ✅ Extended capability profile satisfied");
        } else {
            info!("   ⚠️  Missing capabilities: {}", profile.missing().join(", "));
            info!("      This controller would be rejected at connect time.");
        }

        info!("");
        info!("   📌 Config pattern suggestion:");
        info!("      product_match: \"{}\"", gamepad.name());
        info!("");
        info!("   ─────────────────────────────────");
        info!("");
    }

    info!("=== End Diagnostics ===");
    info!("");
    info!("💡 Tips:");
    info!("   - Use the 'Name' field value in your config's product_match");
    info!("   - Product matching is case-insensitive substring matching");
    info!("");
}
