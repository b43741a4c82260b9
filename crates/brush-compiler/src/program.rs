//! Whole painting sessions.
//!
//! A [`ProgramBuilder`] collects the passes for several outlines, plus any
//! tool-handling instructions the caller wants between them, into one
//! instruction list. Outlines are emitted in the order they are added.

use std::io::Write;
use std::path::Path;

use brush_codegen::{encode_all, save_stream, StreamWriter, WriteError};
use brush_types::{
    CupHolderPosition, Instruction, PaintMix, Polyline, SpeedProfile, StrokeError,
};
use serde::{Deserialize, Serialize};

use crate::config::CompileOptions;
use crate::segmenter::{SegmentStats, Segmenter};

/// Counters for a whole program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramStats {
    /// Outlines compiled into the program.
    pub outlines: usize,
    /// Outlines dropped for being shorter than `min_outline_length`.
    pub skipped_outlines: usize,
    pub edges: usize,
    pub reloads: usize,
    pub painted_length: f64,
}

impl ProgramStats {
    fn record(&mut self, stats: &SegmentStats) {
        self.outlines += 1;
        self.edges += stats.edges;
        self.reloads += stats.reloads;
        self.painted_length += stats.painted_length;
    }
}

/// Accumulates instructions for one painting session.
#[derive(Debug)]
pub struct ProgramBuilder {
    segmenter: Segmenter,
    min_outline_length: Option<f64>,
    split_long_edges: bool,
    instructions: Vec<Instruction>,
    stats: ProgramStats,
}

impl ProgramBuilder {
    pub fn new(options: &CompileOptions) -> brush_types::Result<Self> {
        options.validate()?;
        Ok(Self {
            segmenter: Segmenter::new(options.stroke)?,
            min_outline_length: options.min_outline_length,
            split_long_edges: options.split_long_edges,
            instructions: Vec::new(),
            stats: ProgramStats::default(),
        })
    }

    /// Append the paint pass for `outline`.
    ///
    /// Returns `None` when the outline was skipped as too short. On error
    /// the program is left as it was before the call. With
    /// `split_long_edges`, edge indices in the returned stats refer to the
    /// subdivided outline.
    pub fn add_outline(&mut self, outline: &Polyline) -> brush_types::Result<Option<SegmentStats>> {
        if let Some(min) = self.min_outline_length {
            let length = outline.length();
            if length < min {
                log::debug!("skipping outline of length {length:.1} (minimum {min})");
                self.stats.skipped_outlines += 1;
                return Ok(None);
            }
        }
        let split;
        let outline = if self.split_long_edges {
            split = outline.split_long_edges(self.segmenter.config().max_continuous_length);
            &split
        } else {
            outline
        };
        let stats = self
            .segmenter
            .segment_into(outline, &mut self.instructions)?;
        log::debug!(
            "outline {}: {} edges, {} reloads",
            self.stats.outlines,
            stats.edges,
            stats.reloads
        );
        self.stats.record(&stats);
        Ok(Some(stats))
    }

    pub fn home(&mut self) -> &mut Self {
        self.instructions.push(Instruction::Home);
        self
    }

    pub fn wash_tool(&mut self) -> &mut Self {
        self.instructions.push(Instruction::WashTool);
        self
    }

    /// Pick up tool `tool` (0–15).
    pub fn load_tool(&mut self, tool: u8) -> brush_types::Result<&mut Self> {
        if tool > 15 {
            return Err(StrokeError::ToolOutOfRange(tool));
        }
        self.instructions.push(Instruction::LoadTool { tool });
        Ok(self)
    }

    pub fn dispense_paint(&mut self, mix: PaintMix) -> &mut Self {
        self.instructions.push(Instruction::DispensePaint(mix));
        self
    }

    pub fn set_cup_holder(&mut self, position: CupHolderPosition, move_tool: bool) -> &mut Self {
        self.instructions.push(Instruction::SetCupHolderPosition {
            position,
            move_tool,
        });
        self
    }

    pub fn configure_speed(&mut self, speed: SpeedProfile) -> &mut Self {
        self.instructions
            .push(Instruction::configure_speed(speed.ramp, speed.speed_min, speed.speed_max));
        self
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn stats(&self) -> &ProgramStats {
        &self.stats
    }

    pub fn finish(self) -> Program {
        Program {
            instructions: self.instructions,
            stats: self.stats,
        }
    }
}

/// A finished instruction list.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    pub stats: ProgramStats,
}

impl Program {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Encode the whole program into one byte stream.
    pub fn encode(&self) -> brush_types::Result<Vec<u8>> {
        encode_all(&self.instructions)
    }

    /// Append the encoded program to `sink`. Returns the bytes written.
    pub fn write_to<W: Write>(&self, sink: W) -> Result<usize, WriteError> {
        let mut writer = StreamWriter::new(sink);
        let len = writer.write_pass(&self.instructions)?;
        writer.flush()?;
        Ok(len)
    }

    /// Replace the file at `path` with the encoded program.
    pub fn save(&self, path: &Path) -> Result<u64, WriteError> {
        save_stream(path, &self.instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrokeConfig;

    fn square() -> Polyline {
        Polyline::from_coords(&[(0, 0), (100, 0), (100, 100), (0, 100)]).unwrap()
    }

    #[test]
    fn outlines_are_emitted_in_order() {
        let mut builder = ProgramBuilder::new(&CompileOptions::default()).unwrap();
        let a = Polyline::from_coords(&[(0, 0), (10, 0)]).unwrap();
        let b = Polyline::from_coords(&[(500, 500), (510, 500)]).unwrap();
        builder.add_outline(&a).unwrap();
        let split = builder.instructions().len();
        builder.add_outline(&b).unwrap();

        let program = builder.finish();
        assert_eq!(program.stats.outlines, 2);
        assert_eq!(program.stats.reloads, 2);
        assert_eq!(
            program.instructions[split],
            Instruction::Move(brush_types::Move::to(500, 500, 2500, true))
        );
    }

    #[test]
    fn short_outlines_are_skipped() {
        let options = CompileOptions::default().with_min_outline_length(250.0);
        let mut builder = ProgramBuilder::new(&options).unwrap();
        let short = Polyline::from_coords(&[(0, 0), (100, 0)]).unwrap();
        assert_eq!(builder.add_outline(&short).unwrap(), None);
        assert!(builder.add_outline(&square()).unwrap().is_some());
        assert_eq!(builder.stats().skipped_outlines, 1);
        assert_eq!(builder.stats().outlines, 1);
        assert_eq!(builder.stats().painted_length, 300.0);
    }

    #[test]
    fn failed_outline_leaves_program_intact() {
        let mut builder = ProgramBuilder::new(&CompileOptions::default()).unwrap();
        builder.home();
        let far = Polyline::from_coords(&[(0, 0), (0, 99_999)]).unwrap();
        assert!(builder.add_outline(&far).is_err());
        assert_eq!(builder.instructions(), &[Instruction::Home]);
        assert_eq!(builder.stats().outlines, 0);
    }

    #[test]
    fn manual_instructions() {
        let mut builder = ProgramBuilder::new(&CompileOptions::default()).unwrap();
        builder
            .home()
            .dispense_paint(PaintMix {
                red: 200,
                ..PaintMix::default()
            })
            .set_cup_holder(CupHolderPosition::Standard, true)
            .configure_speed(SpeedProfile::new(1, 2, 3))
            .wash_tool();
        builder.load_tool(3).unwrap();
        assert!(matches!(
            builder.load_tool(16),
            Err(StrokeError::ToolOutOfRange(16))
        ));

        let program = builder.finish();
        assert_eq!(program.len(), 6);
        let bytes = program.encode().unwrap();
        assert_eq!(bytes.len(), 1 + 21 + 1 + 26 + 1 + 1);
        assert_eq!(bytes[0], 0x00);
        assert_eq!(*bytes.last().unwrap(), 0x23);
    }

    #[test]
    fn long_edges_are_split_when_asked() {
        let line = Polyline::from_coords(&[(0, 0), (500, 0)]).unwrap();
        let options = CompileOptions::new(StrokeConfig::default().with_max_continuous_length(100.0));

        let mut plain = ProgramBuilder::new(&options).unwrap();
        let stats = plain.add_outline(&line).unwrap().unwrap();
        assert_eq!(stats.oversized_edges, vec![0]);
        assert_eq!(stats.reloads, 1);

        let mut split = ProgramBuilder::new(&options.with_split_long_edges(true)).unwrap();
        let stats = split.add_outline(&line).unwrap().unwrap();
        assert!(stats.oversized_edges.is_empty());
        assert_eq!(stats.edges, 6);
        assert_eq!(stats.reloads, 6);
        assert_eq!(stats.painted_length, 500.0);
    }

    #[test]
    fn write_to_matches_encode() {
        let options = CompileOptions::new(StrokeConfig::default().with_max_continuous_length(150.0));
        let mut builder = ProgramBuilder::new(&options).unwrap();
        builder.add_outline(&square()).unwrap();
        let program = builder.finish();

        let mut sink = Vec::new();
        let written = program.write_to(&mut sink).unwrap();
        assert_eq!(written, sink.len());
        assert_eq!(sink, program.encode().unwrap());
    }
}
