pub mod handler;

pub use handler::{InputHandler, KeyAction};

use clap::ValueEnum;

/// Where gesture samples come from. The keyboard is always active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputSource {
    /// Keyboard only
    Keyboard,
    /// Terminal mouse pointer, classified as swipes
    Mouse,
    /// Hand landmark frames from an external tracker
    Landmarks,
}

impl InputSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyboard => "Keyboard",
            Self::Mouse => "Mouse swipe",
            Self::Landmarks => "Hand gesture",
        }
    }
}
