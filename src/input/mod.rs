//! Physical input sources

pub mod gamepad;
