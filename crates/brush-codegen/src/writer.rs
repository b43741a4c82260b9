//! Instruction stream writer.
//!
//! A half-written stream is useless to the controller, so a pass is encoded
//! completely in memory and only then appended to the sink.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use brush_types::Instruction;

use crate::encoder::encode_all;
use crate::error::WriteError;

/// Appends encoded passes to a byte sink, in call order.
#[derive(Debug)]
pub struct StreamWriter<W: Write> {
    sink: W,
    frames_written: usize,
    bytes_written: u64,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            frames_written: 0,
            bytes_written: 0,
        }
    }

    /// Encode `instructions` and append them as one write.
    ///
    /// If any instruction fails to encode, the sink is not touched.
    /// Returns the number of bytes appended.
    pub fn write_pass(&mut self, instructions: &[Instruction]) -> Result<usize, WriteError> {
        let bytes = encode_all(instructions)?;
        self.sink.write_all(&bytes)?;
        self.frames_written += instructions.len();
        self.bytes_written += bytes.len() as u64;
        log::debug!(
            "appended {} frames ({} bytes) to stream",
            instructions.len(),
            bytes.len()
        );
        Ok(bytes.len())
    }

    pub fn flush(&mut self) -> Result<(), WriteError> {
        self.sink.flush()?;
        Ok(())
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Write a complete stream to `path`.
///
/// The bytes go to a sibling `.part` file first, which is renamed over
/// `path` once everything is on disk. A failure leaves any previous file at
/// `path` untouched.
pub fn save_stream(path: &Path, instructions: &[Instruction]) -> Result<u64, WriteError> {
    let bytes = encode_all(instructions)?;
    let partial = partial_path(path);
    let result = fs::write(&partial, &bytes).and_then(|()| fs::rename(&partial, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    log::info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len() as u64)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}
