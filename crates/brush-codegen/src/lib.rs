//! Brush instruction encoder: turns typed [`Instruction`]s into the byte
//! frames the painting robot's controller reads.
//!
//! # Wire format
//!
//! A stream is the plain concatenation of frames, with no header, length
//! prefix, checksum, or terminator. The high nibble of each frame's first
//! byte is the opcode, and the opcode alone determines the frame length
//! (see [`frame`]). A reader that meets an unknown opcode cannot resync.
//!
//! ## Modules
//! - [`encoder`]: instruction → frame, pure and deterministic
//! - [`decoder`]: frame → instruction, for inspection and round-trip checks
//! - [`writer`]: appends whole, validated passes to a byte sink
//!
//! [`Instruction`]: brush_types::Instruction

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod writer;

pub use decoder::{decode_frame, decode_stream};
pub use encoder::{encode, encode_all, encode_into};
pub use error::{DecodeError, WriteError};
pub use frame::Opcode;
pub use writer::{save_stream, StreamWriter};
