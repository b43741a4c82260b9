//! Codegen error types.

use brush_types::StrokeError;
use thiserror::Error;

/// Errors raised while reading frames back from a byte stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The high nibble does not name an instruction.
    #[error("unknown opcode {byte:#04x} at offset {offset}")]
    UnknownOpcode { offset: usize, byte: u8 },

    /// The stream ends in the middle of a frame.
    #[error("truncated frame at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A move frame carries a mask outside the supported shapes.
    #[error("invalid axis mask {mask:#06b} at offset {offset}")]
    InvalidAxisMask { offset: usize, mask: u8 },

    /// A cup holder frame names a position that does not exist.
    #[error("unknown cup holder position {value} at offset {offset}")]
    UnknownCupHolderPosition { offset: usize, value: u8 },
}

/// Errors raised while writing a pass to a byte sink.
#[derive(Debug, Error)]
pub enum WriteError {
    /// An instruction could not be encoded; nothing was written.
    #[error(transparent)]
    Encode(#[from] StrokeError),

    /// The sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode result type alias.
pub type DecodeResult<T> = Result<T, DecodeError>;
