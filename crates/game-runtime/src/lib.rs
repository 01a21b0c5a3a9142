//! Turn runtime around the `tile-grid` rules engine: the session state
//! machine, the presentation-layer contract with per-effect
//! acknowledgements, keyboard input plumbing, and TOML configuration.

pub mod config;
pub mod controller;
pub mod frontend;
pub mod input;
