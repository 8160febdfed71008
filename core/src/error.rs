use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration")]
    InvalidConfig,
    #[error("Mines do not fit outside the first-click safe zone")]
    MinesDoNotFit,
    #[error("Mines have already been placed on this board")]
    AlreadyPlaced,
    #[error("No usable boards could be generated for the sample batch")]
    EmptyBatch,
}

pub type Result<T> = core::result::Result<T, GameError>;
