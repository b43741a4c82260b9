//! Stroke segmentation.
//!
//! Walks a polyline edge by edge and packs path length greedily into
//! strokes, one dip of paint each. When the next edge would use up the
//! remaining paint, a reload is inserted and the edge is drawn again from
//! its start point. Boundaries are never revisited to save reloads.
//!
//! ```text
//! approach   MOVE* x0 y0 clearance
//! per edge   MOVE* x1 y1 contact                        (stroke continues)
//!        or  <reload> MOVE* x0 y0 contact MOVE* x1 y1 contact
//! lift       MOVE* z=clearance
//! ```

use brush_types::{Axis, Instruction, Move, Point, Polyline, StrokeError};
use serde::{Deserialize, Serialize};

use crate::config::StrokeConfig;
use crate::reload::reload_sequence;

/// Paint state of the brush while a polyline is compiled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    /// The brush has not been dipped yet in this pass.
    Fresh,
    /// The brush carries paint and has drawn `running_length` since the dip.
    Loaded { running_length: f64 },
}

impl StrokeState {
    /// Whether an edge of `length` fits into the current stroke.
    pub fn can_extend(self, length: f64, budget: f64) -> bool {
        match self {
            Self::Fresh => false,
            Self::Loaded { running_length } => running_length + length < budget,
        }
    }
}

/// Counters for one compiled polyline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentStats {
    pub edges: usize,
    pub reloads: usize,
    /// Sum of edge lengths, each edge counted once.
    pub painted_length: f64,
    /// Edges that alone reach the paint budget. They are still drawn, from
    /// a fresh dip, but their stroke is over budget.
    pub oversized_edges: Vec<usize>,
}

/// The instructions for one polyline, with counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub instructions: Vec<Instruction>,
    pub stats: SegmentStats,
}

/// Turns polylines into paint passes.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: StrokeConfig,
}

impl Segmenter {
    pub fn new(config: StrokeConfig) -> brush_types::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StrokeConfig {
        &self.config
    }

    /// Compile one polyline into a fresh instruction list.
    pub fn segment(&self, polyline: &Polyline) -> brush_types::Result<Segment> {
        let mut instructions = Vec::new();
        let stats = self.segment_into(polyline, &mut instructions)?;
        Ok(Segment {
            instructions,
            stats,
        })
    }

    /// Append the pass for `polyline` to `out`.
    ///
    /// Coordinates are range-checked before anything is appended, so on
    /// error `out` is unchanged.
    pub fn segment_into(
        &self,
        polyline: &Polyline,
        out: &mut Vec<Instruction>,
    ) -> brush_types::Result<SegmentStats> {
        let device = polyline
            .points()
            .iter()
            .map(|&p| to_device(p))
            .collect::<brush_types::Result<Vec<_>>>()?;

        let StrokeConfig {
            max_continuous_length: budget,
            clearance_z,
            contact_z,
        } = self.config;
        let contact = |(x, y): (i16, i16)| Instruction::Move(Move::to(x, y, contact_z, true));

        let mut stats = SegmentStats::default();
        let (fx, fy) = device[0];
        out.push(Instruction::Move(Move::to(fx, fy, clearance_z, true)));

        let mut state = StrokeState::Fresh;
        for (edge, (v0, v1)) in polyline.edges().enumerate() {
            let length = v0.distance(v1);
            let (start, end) = (device[edge], device[edge + 1]);

            state = match state {
                StrokeState::Loaded { running_length } if state.can_extend(length, budget) => {
                    out.push(contact(end));
                    StrokeState::Loaded {
                        running_length: running_length + length,
                    }
                }
                _ => {
                    if length >= budget {
                        log::warn!(
                            "edge {edge} from {v0} to {v1} is {length:.1} long, \
                             at or above the paint budget of {budget}"
                        );
                        stats.oversized_edges.push(edge);
                    }
                    log::debug!("reload before edge {edge} at {v0}");
                    out.extend(reload_sequence());
                    // Re-anchor at the edge start; the edge is drawn from v0 again.
                    out.push(contact(start));
                    out.push(contact(end));
                    stats.reloads += 1;
                    StrokeState::Loaded {
                        running_length: length,
                    }
                }
            };
            stats.edges += 1;
            stats.painted_length += length;
        }

        out.push(Instruction::Move(Move::z_only(clearance_z, true)));
        Ok(stats)
    }
}

fn to_device(p: Point) -> brush_types::Result<(i16, i16)> {
    let narrow = |axis, value: i32| {
        i16::try_from(value).map_err(|_| StrokeError::CoordinateOutOfRange {
            axis,
            value: i64::from(value),
        })
    };
    Ok((narrow(Axis::X, p.x)?, narrow(Axis::Y, p.y)?))
}
