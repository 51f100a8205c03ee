//! Gamepad GW - control Ableton Live from a game controller

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gamepad_gw::bindings::BindingTable;
use gamepad_gw::config::AppConfig;
use gamepad_gw::dispatcher::Dispatcher;
use gamepad_gw::display::DisplayState;
use gamepad_gw::input::gamepad;
use gamepad_gw::surface::{ConsoleSurface, ControlSurface, LiveSurface};

/// Gamepad Gateway - control Ableton Live from a game controller
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Scan for gamepads and print capability diagnostics
    #[arg(long)]
    list_gamepads: bool,

    /// Print the effective binding table
    #[arg(long)]
    test_bindings: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Starting Gamepad GW...");
    info!("Configuration file: {}", args.config);

    // Handle gamepad diagnostics
    if args.list_gamepads {
        gamepad::print_gamepad_diagnostics();
        return Ok(());
    }

    let config = AppConfig::load_or_default(&args.config).await?;

    // Build the binding table: factory defaults plus config overrides
    let mut bindings = BindingTable::default();
    bindings.apply_overrides(&config.bindings)?;
    info!("Binding table ready ({} elements bound)", bindings.len());

    // Handle binding table dump
    if args.test_bindings {
        print_bindings(&bindings);
        return Ok(());
    }

    // Select the control surface
    let surface: Arc<dyn ControlSurface> = if config.live.enabled {
        Arc::new(LiveSurface::new(config.live.host.clone(), config.live.port))
    } else {
        info!("Live surface disabled, logging actions to console");
        Arc::new(ConsoleSurface::new("console"))
    };
    surface.init().await?;

    // Wire up display state, dispatcher, and gamepad input
    let (display_tx, mut display_rx) = watch::channel(DisplayState::default());
    let bindings = Arc::new(RwLock::new(bindings));
    let dispatcher = Dispatcher::spawn(bindings.clone(), surface.clone(), display_tx);

    let provider = gamepad::init(&config.gamepad, dispatcher.sender());
    if provider.is_none() {
        warn!("Running without gamepad input");
    }

    info!("Ready to process controller events!");

    // Main loop: follow connection transitions until shutdown
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut connected = display_rx.borrow().connected;
    loop {
        tokio::select! {
            changed = display_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let now_connected = display_rx.borrow().connected;
                if now_connected != connected {
                    connected = now_connected;
                    if connected {
                        info!("🎮 Controller attached, routing input");
                    } else {
                        info!("🔌 Controller detached, waiting for reconnect");
                    }
                }
            }

            _ = &mut shutdown => {
                info!("Shutdown signal received, stopping event loop");
                break;
            }
        }
    }

    // Cleanup: discovery and the remote session stop on every exit path
    info!("Shutting down...");
    if let Some(mut provider) = provider {
        provider.shutdown();
    }
    surface.shutdown().await?;
    info!("Gamepad GW shutdown complete");

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    info!("Shutdown signal received");
}

fn print_bindings(bindings: &BindingTable) {
    use colored::*;

    println!("\n{}", "=== Effective Binding Table ===".bold().cyan());
    println!("  Bound elements: {}", bindings.len().to_string().green());
    println!();

    for (element, action) in bindings.iter() {
        println!("  {:>24} → {}", element.as_str().yellow(), action.as_str().green());
    }

    println!("\n{}", "✅ Binding table check complete!".green().bold());
}
