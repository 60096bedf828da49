pub mod renderer;

pub use renderer::{InputStatus, Renderer};
