//! Gesture input: landmark frames in, a debounced direction out.

pub mod classifier;
pub mod error;
pub mod feed;
pub mod landmarks;

pub use classifier::{ClassifierConfig, DirectionClassifier};
pub use error::LandmarkError;
pub use feed::{HandFrame, LandmarkFeed};
pub use landmarks::{Fingers, HandLandmarks, fingers_up, is_fist};
