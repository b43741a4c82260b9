//! Shared types for the brush stroke compiler.
//!
//! This crate defines the geometry handed over by the outline stages
//! ([`Point`], [`Polyline`]), the closed instruction set understood by the
//! painting robot's controller ([`Instruction`]), and the error taxonomy
//! used by every stage of the compiler.

mod error;
mod geometry;
pub mod instruction;

pub use error::{
    CompileErrors, Diagnostic, ErrorCategory, ErrorCode, Severity, StrokeError, MAX_ERRORS,
};
pub use geometry::{Point, Polyline};
pub use instruction::{
    Axis, ConfigParameter, Configuration, CupHolderPosition, Instruction, Move, MoveTarget,
    PaintMix, SpeedProfile,
};

/// Result type used throughout the brush compiler.
pub type Result<T> = std::result::Result<T, StrokeError>;
