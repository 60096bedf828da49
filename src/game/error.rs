use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid grid {width}x{height}: need at least two cells")]
    InvalidGrid { width: usize, height: usize },
    #[error("No free cell left to place food")]
    BoardFull,
}

pub type Result<T> = core::result::Result<T, GameError>;
