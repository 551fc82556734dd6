// Crate-level error aggregating the per-stage errors

use crate::core::profile::ProfileError;
use crate::core::validation::ValidationError;
use crate::messages::frame::FrameError;
use crate::messages::header::HeaderError;
use crate::registers::block::BlockError;
use crate::registers::evaluator::EvaluationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Tulip3Error {
    /// Wrong length, type or sub-type, raised before any register parsing
    #[error("Envelope error: {0}")]
    Header(#[from] HeaderError),

    /// Truncated or oversize register blocks
    #[error("Framing error: {0}")]
    Block(#[from] BlockError),

    /// Unknown registers, short registers and rejected register content
    #[error("Register error: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Decoded content disagrees with the device profile
    #[error("Profile mismatch: {0}")]
    Validation(#[from] ValidationError),

    #[error("Write response error: {0}")]
    Frame(#[from] FrameError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
}

pub type Result<T> = std::result::Result<T, Tulip3Error>;
