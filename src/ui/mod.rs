//! UI module - HUD, drone health indicators, and overlays.

mod hud;
mod indicator;
mod plugin;

pub use plugin::UiPlugin;
