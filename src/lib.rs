//! Gesture Snake - a grid Snake steered by keyboard or by hand swipes
//!
//! This library provides:
//! - Core game logic (game module)
//! - Swipe classification of hand landmark frames (gesture module)
//! - Single-tick composition of both input paths (session module)
//! - TUI rendering and the interactive loop (render, modes)

pub mod config;
pub mod game;
pub mod gesture;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
