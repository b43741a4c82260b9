//! Instruction → frame encoding.
//!
//! Every function here is pure: the same instruction always produces the
//! same bytes, and a failed encode never leaves a partial frame behind.

use brush_types::{Configuration, Instruction, Move, MoveTarget, StrokeError};

use crate::frame::*;

/// Encode one instruction into a fresh frame.
pub fn encode(instruction: &Instruction) -> brush_types::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(Opcode::of(instruction).frame_len());
    encode_into(instruction, &mut out)?;
    Ok(out)
}

/// Append the frame for `instruction` to `out`.
///
/// On error `out` is left exactly as it was.
pub fn encode_into(instruction: &Instruction, out: &mut Vec<u8>) -> brush_types::Result<()> {
    let start = out.len();
    let result = emit(instruction, out);
    match &result {
        Ok(()) => debug_assert_eq!(out.len() - start, Opcode::of(instruction).frame_len()),
        Err(_) => out.truncate(start),
    }
    result
}

/// Encode a whole instruction list, stopping at the first failure.
pub fn encode_all(instructions: &[Instruction]) -> brush_types::Result<Vec<u8>> {
    let len = instructions
        .iter()
        .map(|i| Opcode::of(i).frame_len())
        .sum();
    let mut out = Vec::with_capacity(len);
    for (index, instruction) in instructions.iter().enumerate() {
        encode_into(instruction, &mut out).inspect_err(|e| {
            log::debug!("encoding stopped at instruction {index} ({instruction}): {e}");
        })?;
        log::trace!("frame {index}: {instruction}");
    }
    Ok(out)
}

/// The axis mask for a move target.
pub fn axis_mask(target: MoveTarget) -> u8 {
    match target {
        MoveTarget::Full { .. } => AXIS_MASK_FULL,
        MoveTarget::XOnly(_) => AXIS_MASK_X_ONLY,
        MoveTarget::YOnly(_) => AXIS_MASK_Y_ONLY,
        MoveTarget::ZOnly(_) => AXIS_MASK_Z_ONLY,
    }
}

/// The configure payload before padding.
pub fn configuration_payload(config: &Configuration) -> Vec<u8> {
    match config {
        Configuration::Speed(speed) => [speed.ramp, speed.speed_min, speed.speed_max]
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .collect(),
        Configuration::Raw { values, .. } => values.clone(),
    }
}

fn emit(instruction: &Instruction, out: &mut Vec<u8>) -> brush_types::Result<()> {
    let op = Opcode::of(instruction).byte();
    match instruction {
        Instruction::Home | Instruction::WashTool => out.push(op),
        Instruction::Move(m) => emit_move(m, out),
        Instruction::LoadTool { tool } => {
            if *tool > TOOL_BITS {
                return Err(StrokeError::ToolOutOfRange(*tool));
            }
            out.push(op | tool);
        }
        Instruction::SetCupHolderPosition {
            position,
            move_tool,
        } => {
            let flag = if *move_tool { MOVE_TOOL_FLAG } else { 0 };
            out.push(op | (position.code() & CUP_POSITION_BITS) | flag);
        }
        Instruction::DispensePaint(mix) => {
            out.push(op);
            out.extend_from_slice(&mix.channels());
            out.extend_from_slice(&[0; DISPENSE_PADDING]);
        }
        Instruction::Configure(config) => {
            let payload = configuration_payload(config);
            if payload.len() > CONFIG_PAYLOAD_CAPACITY {
                return Err(StrokeError::ConfigurationOverflow {
                    len: payload.len(),
                    capacity: CONFIG_PAYLOAD_CAPACITY,
                });
            }
            out.push(op);
            out.push(config.parameter());
            out.extend_from_slice(&payload);
            out.resize(out.len() + CONFIG_PAYLOAD_CAPACITY - payload.len(), 0);
        }
    }
    Ok(())
}

fn emit_move(m: &Move, out: &mut Vec<u8>) {
    let flag = if m.subspace { SUBSPACE_FLAG } else { 0 };
    out.push(Opcode::Move.byte() | flag | axis_mask(m.target));
    let (x, y, z) = m.target.axes();
    for value in [x, y, z] {
        // Absent axes go out as zero; the controller ignores them.
        out.extend_from_slice(&value.unwrap_or(0).to_be_bytes());
    }
}
