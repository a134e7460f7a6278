//! Flappy - terminal side-scroller with operational telemetry.
//!
//! This module exposes the game logic for testing and for the binary.

pub mod assets;
pub mod core;
pub mod entities;
pub mod input;
pub mod telemetry;
pub mod ui;
pub mod utils;
