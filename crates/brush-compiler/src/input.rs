//! Outline documents.
//!
//! The outline stages hand over JSON of the shape `[[[x, y], ...], ...]`:
//! a list of outlines, each a list of integer points in device units.

use brush_types::{Point, Polyline, StrokeError};

/// Read the raw point lists without validating them as polylines.
pub fn read_outlines(json: &str) -> brush_types::Result<Vec<Vec<Point>>> {
    serde_json::from_str(json).map_err(|e| StrokeError::MalformedInput(e.to_string()))
}

/// Read and validate every outline in the document.
pub fn parse_outlines(json: &str) -> brush_types::Result<Vec<Polyline>> {
    read_outlines(json)?
        .into_iter()
        .enumerate()
        .map(|(i, points)| {
            Polyline::new(points).map_err(|e| match e {
                StrokeError::InvalidPolyline(msg) => {
                    StrokeError::InvalidPolyline(format!("outline {i}: {msg}"))
                }
                other => other,
            })
        })
        .collect()
}
