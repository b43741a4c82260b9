use crate::Axis;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum number of diagnostics stored in a [`CompileErrors`] report.
pub const MAX_ERRORS: usize = 20;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// The caller handed over something the compiler cannot draw.
    Input,
    /// An instruction was constructed in a shape the wire format cannot carry.
    Internal,
    /// An instruction operand does not fit its frame.
    Encoding,
    /// A polyline compiled, but not within the paint budget.
    Segmentation,
}

/// Numeric error code (E100–E399, warnings E900–E999).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Input errors (E100–E199) ──
    pub const INVALID_POLYLINE: Self = Self(100);
    pub const COORDINATE_OUT_OF_RANGE: Self = Self(101);
    pub const MALFORMED_INPUT: Self = Self(102);
    pub const INVALID_CONFIG: Self = Self(103);

    // ── Internal errors (E200–E299) ──
    pub const INVALID_AXIS_COMBINATION: Self = Self(200);

    // ── Encoding errors (E300–E399) ──
    pub const CONFIGURATION_OVERFLOW: Self = Self(300);
    pub const TOOL_OUT_OF_RANGE: Self = Self(301);

    // ── Warnings (E900–E999) ──
    pub const EDGE_EXCEEDS_BUDGET: Self = Self(900);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            200..=299 => ErrorCategory::Internal,
            300..=399 => ErrorCategory::Encoding,
            900..=999 => ErrorCategory::Segmentation,
            _ => ErrorCategory::Input,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Internal => write!(f, "internal"),
            Self::Encoding => write!(f, "encoding"),
            Self::Segmentation => write!(f, "segmentation"),
        }
    }
}

/// Errors raised while segmenting outlines or encoding instructions.
///
/// Every error aborts the compilation it occurs in. Nothing is retried:
/// the compiler is deterministic, so the same input fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrokeError {
    /// Fewer than two points, or two identical consecutive points.
    #[error("invalid polyline: {0}")]
    InvalidPolyline(String),

    /// A coordinate does not fit the signed 16-bit operand of a frame.
    #[error("{axis} coordinate {value} does not fit in a signed 16-bit operand")]
    CoordinateOutOfRange { axis: Axis, value: i64 },

    /// The outline document could not be read.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A compiler setting is outside its usable range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A move was requested with a set of present axes that has no mask.
    #[error("unsupported axis combination (x: {x}, y: {y}, z: {z})")]
    InvalidAxisCombination { x: bool, y: bool, z: bool },

    /// A configure payload is larger than the fixed frame capacity.
    #[error("configuration payload of {len} bytes exceeds the {capacity}-byte frame capacity")]
    ConfigurationOverflow { len: usize, capacity: usize },

    /// Tool ids are 4 bits wide.
    #[error("tool id {0} is outside 0..=15")]
    ToolOutOfRange(u8),
}

impl StrokeError {
    /// The stable numeric code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPolyline(_) => ErrorCode::INVALID_POLYLINE,
            Self::CoordinateOutOfRange { .. } => ErrorCode::COORDINATE_OUT_OF_RANGE,
            Self::MalformedInput(_) => ErrorCode::MALFORMED_INPUT,
            Self::InvalidConfig(_) => ErrorCode::INVALID_CONFIG,
            Self::InvalidAxisCombination { .. } => ErrorCode::INVALID_AXIS_COMBINATION,
            Self::ConfigurationOverflow { .. } => ErrorCode::CONFIGURATION_OVERFLOW,
            Self::ToolOutOfRange(_) => ErrorCode::TOOL_OUT_OF_RANGE,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }
}

/// A structured compiler diagnostic, serializable for hosts.
///
/// Hosts render these; they must not parse free-form strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error code (e.g., E100).
    pub code: ErrorCode,
    /// Diagnostic severity.
    pub severity: Severity,
    /// Category (derived from code).
    pub category: ErrorCategory,
    /// Human-readable message.
    pub message: String,
    /// Zero-based index of the outline the diagnostic refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<usize>,
    /// Zero-based index of the edge inside that outline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge: Option<usize>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            category: code.category(),
            message: message.into(),
            outline: None,
            edge: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, message)
        }
    }

    /// Attach the outline index.
    pub fn in_outline(mut self, outline: usize) -> Self {
        self.outline = Some(outline);
        self
    }

    /// Attach the edge index.
    pub fn at_edge(mut self, edge: usize) -> Self {
        self.edge = Some(edge);
        self
    }
}

impl From<&StrokeError> for Diagnostic {
    fn from(err: &StrokeError) -> Self {
        Diagnostic::error(err.code(), err.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(outline) = self.outline {
            write!(f, "outline {outline}")?;
            if let Some(edge) = self.edge {
                write!(f, ", edge {edge}")?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} [{}] {}", self.code, self.category, self.message)
    }
}

/// The structured report attached to every compilation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileErrors {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl CompileErrors {
    /// Create an empty report.
    pub fn empty() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            total_errors: 0,
            total_warnings: 0,
        }
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Add an error, respecting the MAX_ERRORS limit.
    pub fn push_error(&mut self, error: Diagnostic) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }

    /// Add a warning, respecting the MAX_ERRORS limit.
    pub fn push_warning(&mut self, warning: Diagnostic) {
        if self.warnings.len() < MAX_ERRORS {
            self.warnings.push(warning);
        }
        self.total_warnings += 1;
    }
}

impl Default for CompileErrors {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::INVALID_POLYLINE.category(), ErrorCategory::Input);
        assert_eq!(ErrorCode::INVALID_CONFIG.category(), ErrorCategory::Input);
        assert_eq!(
            ErrorCode::INVALID_AXIS_COMBINATION.category(),
            ErrorCategory::Internal
        );
        assert_eq!(
            ErrorCode::CONFIGURATION_OVERFLOW.category(),
            ErrorCategory::Encoding
        );
        assert_eq!(ErrorCode::TOOL_OUT_OF_RANGE.category(), ErrorCategory::Encoding);
        assert_eq!(
            ErrorCode::EDGE_EXCEEDS_BUDGET.category(),
            ErrorCategory::Segmentation
        );
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::INVALID_POLYLINE), "E100");
        assert_eq!(format!("{}", ErrorCode::INVALID_AXIS_COMBINATION), "E200");
    }

    #[test]
    fn test_stroke_error_codes() {
        let err = StrokeError::CoordinateOutOfRange {
            axis: Axis::X,
            value: 40_000,
        };
        assert_eq!(err.code(), ErrorCode::COORDINATE_OUT_OF_RANGE);
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(
            err.to_string(),
            "x coordinate 40000 does not fit in a signed 16-bit operand"
        );

        let err = StrokeError::InvalidAxisCombination {
            x: true,
            y: true,
            z: false,
        };
        assert_eq!(err.category(), ErrorCategory::Internal);

        let err = StrokeError::ConfigurationOverflow {
            len: 25,
            capacity: 24,
        };
        assert_eq!(err.code(), ErrorCode::CONFIGURATION_OVERFLOW);
    }

    #[test]
    fn test_diagnostic_from_error() {
        let err = StrokeError::InvalidPolyline("needs at least 2 points, got 1".into());
        let diag = Diagnostic::from(&err).in_outline(3);
        assert_eq!(diag.code, ErrorCode::INVALID_POLYLINE);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.outline, Some(3));
        assert_eq!(
            diag.to_string(),
            "outline 3: E100 [input] invalid polyline: needs at least 2 points, got 1"
        );
    }

    #[test]
    fn test_diagnostic_json_serialization() {
        let diag = Diagnostic::warning(ErrorCode::EDGE_EXCEEDS_BUDGET, "edge is longer than budget")
            .in_outline(0)
            .at_edge(4);
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"severity\":\"warning\""));
        assert!(json.contains("\"category\":\"segmentation\""));
        assert!(json.contains("\"edge\":4"));

        let plain = Diagnostic::error(ErrorCode::MALFORMED_INPUT, "bad json");
        let json = serde_json::to_string(&plain).unwrap();
        assert!(!json.contains("\"outline\""));

        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code, ErrorCode::MALFORMED_INPUT);
    }

    #[test]
    fn test_compile_errors_max_limit() {
        let mut errs = CompileErrors::empty();
        for i in 0..25 {
            errs.push_error(Diagnostic::error(
                ErrorCode::INVALID_POLYLINE,
                format!("Error {i}"),
            ));
        }
        assert_eq!(errs.errors.len(), 20);
        assert_eq!(errs.total_errors, 25);
        assert!(errs.has_errors());
    }

    #[test]
    fn test_compile_errors_empty() {
        let errs = CompileErrors::empty();
        assert!(!errs.has_errors());
        assert_eq!(errs.total_errors, 0);
        assert_eq!(errs.total_warnings, 0);
    }
}
