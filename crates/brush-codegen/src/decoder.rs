//! Frame → instruction decoding.
//!
//! Frames produced by [`crate::encoder`] decode back to instructions that
//! re-encode to the same bytes. Operands of absent move axes are dropped,
//! since the controller ignores them too.

use brush_types::{
    ConfigParameter, Configuration, CupHolderPosition, Instruction, Move, MoveTarget, PaintMix,
    SpeedProfile,
};

use crate::error::{DecodeError, DecodeResult};
use crate::frame::*;

/// Decode the frame at the start of `bytes`.
///
/// Returns the instruction and the number of bytes it occupied.
pub fn decode_frame(bytes: &[u8]) -> DecodeResult<(Instruction, usize)> {
    decode_at(bytes, 0)
}

/// Split a whole stream into instructions.
pub fn decode_stream(bytes: &[u8]) -> DecodeResult<Vec<Instruction>> {
    let mut offset = 0;
    let mut instructions = Vec::new();
    while offset < bytes.len() {
        let (instruction, len) = decode_at(bytes, offset)?;
        instructions.push(instruction);
        offset += len;
    }
    Ok(instructions)
}

fn decode_at(stream: &[u8], offset: usize) -> DecodeResult<(Instruction, usize)> {
    let bytes = &stream[offset..];
    let Some(&head) = bytes.first() else {
        return Err(DecodeError::Truncated {
            offset,
            needed: 1,
            available: 0,
        });
    };
    let op = Opcode::from_byte(head).ok_or(DecodeError::UnknownOpcode { offset, byte: head })?;
    let len = op.frame_len();
    if bytes.len() < len {
        return Err(DecodeError::Truncated {
            offset,
            needed: len,
            available: bytes.len(),
        });
    }
    let frame = &bytes[..len];
    let flags = head & 0x0F;

    let instruction = match op {
        Opcode::Home => Instruction::Home,
        Opcode::WashTool => Instruction::WashTool,
        Opcode::Move => Instruction::Move(decode_move(frame, offset)?),
        Opcode::LoadTool => Instruction::LoadTool {
            tool: flags & TOOL_BITS,
        },
        Opcode::SetCupHolderPosition => {
            let value = flags & CUP_POSITION_BITS;
            let position = CupHolderPosition::from_code(value)
                .ok_or(DecodeError::UnknownCupHolderPosition { offset, value })?;
            Instruction::SetCupHolderPosition {
                position,
                move_tool: flags & MOVE_TOOL_FLAG != 0,
            }
        }
        Opcode::DispensePaint => Instruction::DispensePaint(PaintMix {
            white: frame[1],
            black: frame[2],
            blue: frame[3],
            yellow: frame[4],
            red: frame[5],
        }),
        Opcode::Configure => Instruction::Configure(decode_configuration(frame)),
    };
    Ok((instruction, len))
}

fn decode_move(frame: &[u8], offset: usize) -> DecodeResult<Move> {
    let word = |i: usize| i16::from_be_bytes([frame[i], frame[i + 1]]);
    let (x, y, z) = (word(1), word(3), word(5));
    let target = match frame[0] & AXIS_MASK_BITS {
        AXIS_MASK_FULL => MoveTarget::Full { x, y, z },
        AXIS_MASK_X_ONLY => MoveTarget::XOnly(x),
        AXIS_MASK_Y_ONLY => MoveTarget::YOnly(y),
        AXIS_MASK_Z_ONLY => MoveTarget::ZOnly(z),
        mask => return Err(DecodeError::InvalidAxisMask { offset, mask }),
    };
    Ok(Move {
        target,
        subspace: frame[0] & SUBSPACE_FLAG != 0,
    })
}

fn decode_configuration(frame: &[u8]) -> Configuration {
    let parameter = frame[1];
    let payload = &frame[2..];
    let speed_only = payload[SPEED_PAYLOAD_LEN..].iter().all(|&b| b == 0);
    if parameter == ConfigParameter::Speed.id() && speed_only {
        let word = |i: usize| u16::from_be_bytes([payload[i], payload[i + 1]]);
        Configuration::Speed(SpeedProfile::new(word(0), word(2), word(4)))
    } else {
        // The logical payload length is not on the wire; keep every byte.
        Configuration::Raw {
            parameter,
            values: payload.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;

    #[test]
    fn decodes_z_only_move() {
        let (instr, len) = decode_frame(&[0x16, 0, 0, 0, 0, 0x27, 0x10]).unwrap();
        assert_eq!(len, 7);
        assert_eq!(instr, Instruction::Move(Move::z_only(10000, false)));
    }

    #[test]
    fn absent_axis_operands_are_ignored() {
        // X-only move with garbage in the y/z slots.
        let (instr, _) = decode_frame(&[0x12, 0x00, 0x05, 0xAB, 0xCD, 0x12, 0x34]).unwrap();
        assert_eq!(
            instr,
            Instruction::Move(Move {
                target: MoveTarget::XOnly(5),
                subspace: false
            })
        );
    }

    #[test]
    fn rejects_unknown_mask() {
        let err = decode_frame(&[0x11, 0, 0, 0, 0, 0, 0]).unwrap_err();
        assert_eq!(err, DecodeError::InvalidAxisMask { offset: 0, mask: 1 });
    }

    #[test]
    fn rejects_unknown_opcode() {
        let err = decode_stream(&[0x00, 0x70]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownOpcode {
                offset: 1,
                byte: 0x70
            }
        );
    }

    #[test]
    fn rejects_truncated_frame() {
        let err = decode_stream(&[0x80, 0x18, 0x00]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                offset: 1,
                needed: 7,
                available: 2
            }
        );
    }

    #[test]
    fn rejects_unknown_cup_holder_position() {
        let err = decode_frame(&[0x35]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownCupHolderPosition {
                offset: 0,
                value: 5
            }
        );
    }

    #[test]
    fn speed_configuration_is_recognised() {
        let bytes = encode(&Instruction::configure_speed(800, 120, 1200)).unwrap();
        let (instr, len) = decode_frame(&bytes).unwrap();
        assert_eq!(len, 26);
        assert_eq!(instr, Instruction::configure_speed(800, 120, 1200));
    }

    #[test]
    fn raw_configuration_keeps_full_payload() {
        let original = Instruction::Configure(Configuration::Raw {
            parameter: 7,
            values: vec![1, 2, 3],
        });
        let bytes = encode(&original).unwrap();
        let (decoded, _) = decode_frame(&bytes).unwrap();
        let Instruction::Configure(Configuration::Raw { parameter, values }) = &decoded else {
            panic!("expected raw configuration, got {decoded:?}");
        };
        assert_eq!(*parameter, 7);
        assert_eq!(values.len(), 24);
        assert_eq!(encode(&decoded).unwrap(), bytes);
    }

    #[test]
    fn empty_stream_decodes_to_nothing() {
        assert_eq!(decode_stream(&[]).unwrap(), vec![]);
    }
}
