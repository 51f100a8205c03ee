//! Gamepad GW - map a game controller to Ableton Live remote control
//!
//! Event flow: the gamepad provider detects a controller, resolves each raw
//! state change to a stable element identifier, and enqueues it; the
//! dispatcher looks the element up in the binding table and delivers the
//! bound semantic action to a control surface (AbletonOSC over UDP, or the
//! console surface for development).

pub mod actions;
pub mod bindings;
pub mod config;
pub mod dispatcher;
pub mod display;
pub mod elements;
pub mod input;
pub mod surface;
