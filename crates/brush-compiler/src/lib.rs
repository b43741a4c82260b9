//! Brush stroke compiler: orchestrates the full compilation pipeline.
//!
//! ```text
//! outlines JSON → Polyline validation → Stroke Segmenter → instruction list
//!               → Instruction Encoder → byte stream
//! ```
//!
//! Compilation is fail-fast: the first invalid value aborts it, and no
//! bytes are produced for a failed compilation.

pub mod config;
pub mod input;
pub mod program;
pub mod reload;
pub mod segmenter;

use brush_types::{CompileErrors, Diagnostic, ErrorCode, Polyline};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use config::{CompileOptions, StrokeConfig};
pub use program::{Program, ProgramBuilder, ProgramStats};
pub use reload::reload_sequence;
pub use segmenter::{Segment, SegmentStats, Segmenter, StrokeState};

/// Compile validated outlines into a program.
pub fn build_program(
    outlines: &[Polyline],
    options: &CompileOptions,
) -> brush_types::Result<Program> {
    let mut builder = ProgramBuilder::new(options)?;
    for outline in outlines {
        builder.add_outline(outline)?;
    }
    Ok(builder.finish())
}

/// Compile validated outlines straight to the controller byte stream.
pub fn compile(outlines: &[Polyline], options: &CompileOptions) -> brush_types::Result<Vec<u8>> {
    build_program(outlines, options)?.encode()
}

/// Result of a compilation, serializable for hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileResult {
    pub success: bool,
    /// The encoded stream, present only on success.
    pub stream: Option<Vec<u8>>,
    /// Lower-case hex SHA-256 of `stream`.
    pub stream_sha256: Option<String>,
    pub errors: CompileErrors,
    pub instruction_count: usize,
    pub reload_count: usize,
    pub stats: ProgramStats,
}

impl CompileResult {
    fn failure(errors: CompileErrors, stats: ProgramStats) -> Self {
        Self {
            success: false,
            stream: None,
            stream_sha256: None,
            errors,
            instruction_count: 0,
            reload_count: 0,
            stats,
        }
    }
}

/// Compile an outlines JSON document into a structured result.
///
/// Never panics and never returns a partial stream: any error produces
/// `success: false` with the error in `errors`. Over-budget edges are
/// reported as warnings on an otherwise successful result.
pub fn compile_to_result(json: &str, options: &CompileOptions) -> CompileResult {
    let mut errors = CompileErrors::empty();

    let raw = match input::read_outlines(json) {
        Ok(raw) => raw,
        Err(e) => {
            errors.push_error(Diagnostic::from(&e));
            return CompileResult::failure(errors, ProgramStats::default());
        }
    };
    let mut builder = match ProgramBuilder::new(options) {
        Ok(builder) => builder,
        Err(e) => {
            errors.push_error(Diagnostic::from(&e));
            return CompileResult::failure(errors, ProgramStats::default());
        }
    };

    for (index, points) in raw.into_iter().enumerate() {
        let added = Polyline::new(points).and_then(|outline| builder.add_outline(&outline));
        match added {
            Ok(Some(stats)) => {
                for edge in stats.oversized_edges {
                    errors.push_warning(
                        Diagnostic::warning(
                            ErrorCode::EDGE_EXCEEDS_BUDGET,
                            format!(
                                "edge alone reaches the paint budget of {}",
                                options.stroke.max_continuous_length
                            ),
                        )
                        .in_outline(index)
                        .at_edge(edge),
                    );
                }
            }
            Ok(None) => {}
            Err(e) => {
                log::debug!("outline {index} failed: {e}");
                errors.push_error(Diagnostic::from(&e).in_outline(index));
                return CompileResult::failure(errors, builder.stats().clone());
            }
        }
    }

    let program = builder.finish();
    match program.encode() {
        Ok(stream) => CompileResult {
            success: true,
            stream_sha256: Some(sha256_hex(&stream)),
            stream: Some(stream),
            errors,
            instruction_count: program.len(),
            reload_count: program.stats.reloads,
            stats: program.stats,
        },
        Err(e) => {
            errors.push_error(Diagnostic::from(&e));
            CompileResult::failure(errors, program.stats)
        }
    }
}

/// Lower-case hex SHA-256 digest.
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
