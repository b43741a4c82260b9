//! Frame layout constants.
//!
//! ```text
//! byte 0 : [opcode: 4 bits][flags / sub-parameter: 4 bits]
//! byte 1.. : operands (fixed per opcode)
//! ```
//!
//! | Opcode | Instruction            | Length | Operands                               |
//! |--------|------------------------|--------|----------------------------------------|
//! | 0000   | Home                   | 1      | none                                   |
//! | 0001   | Move                   | 7      | x, y, z as big-endian i16              |
//! | 0010   | LoadTool               | 1      | tool id in the low nibble              |
//! | 0011   | SetCupHolderPosition   | 1      | position in bits 0..3, move_tool bit 3 |
//! | 0100   | DispensePaint          | 21     | 5 channel bytes, 15 zero bytes         |
//! | 0101   | Configure              | 26     | parameter id, 24 payload bytes         |
//! | 1000   | WashTool               | 1      | none                                   |

use brush_types::Instruction;

// ── Move flags ───────────────────────────────────────────────────────────────

/// Set on canvas-relative moves.
pub const SUBSPACE_FLAG: u8 = 0b1000;
/// Bits of byte 0 holding the axis mask.
pub const AXIS_MASK_BITS: u8 = 0b0111;

/// All three axes are meaningful.
pub const AXIS_MASK_FULL: u8 = 0b0000;
/// Only X is meaningful.
pub const AXIS_MASK_X_ONLY: u8 = 0b0010;
/// Only Y is meaningful.
pub const AXIS_MASK_Y_ONLY: u8 = 0b0100;
/// Only Z is meaningful. The controller reads this pattern as "Y and Z
/// selected, X forced to 0"; the encoder writes absent axes as 0, so Y is
/// zero as well.
pub const AXIS_MASK_Z_ONLY: u8 = 0b0110;

// ── Other sub-parameters ─────────────────────────────────────────────────────

/// LoadTool carries the tool id in the low nibble.
pub const TOOL_BITS: u8 = 0b1111;
/// SetCupHolderPosition: position code bits.
pub const CUP_POSITION_BITS: u8 = 0b0111;
/// SetCupHolderPosition: move the tool along with the holder.
pub const MOVE_TOOL_FLAG: u8 = 0b1000;

// ── Payload sizes ────────────────────────────────────────────────────────────

/// Paint channels in a dispense frame.
pub const PAINT_CHANNELS: usize = 5;
/// Trailing zero bytes in a dispense frame.
pub const DISPENSE_PADDING: usize = 15;
/// Payload bytes in a configure frame, after the parameter id.
pub const CONFIG_PAYLOAD_CAPACITY: usize = 24;
/// Bytes used by a speed profile inside the configure payload.
pub const SPEED_PAYLOAD_LEN: usize = 6;

/// Instruction opcodes (high nibble of byte 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Home = 0b0000,
    Move = 0b0001,
    LoadTool = 0b0010,
    SetCupHolderPosition = 0b0011,
    DispensePaint = 0b0100,
    Configure = 0b0101,
    WashTool = 0b1000,
}

impl Opcode {
    /// Frame length in bytes. Depends on nothing but the opcode.
    pub const fn frame_len(self) -> usize {
        match self {
            Self::Home | Self::LoadTool | Self::SetCupHolderPosition | Self::WashTool => 1,
            Self::Move => 7,
            Self::DispensePaint => 1 + PAINT_CHANNELS + DISPENSE_PADDING,
            Self::Configure => 2 + CONFIG_PAYLOAD_CAPACITY,
        }
    }

    /// The opcode shifted into place, flags cleared.
    pub const fn byte(self) -> u8 {
        (self as u8) << 4
    }

    /// Read the opcode from the first byte of a frame.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte >> 4 {
            0b0000 => Some(Self::Home),
            0b0001 => Some(Self::Move),
            0b0010 => Some(Self::LoadTool),
            0b0011 => Some(Self::SetCupHolderPosition),
            0b0100 => Some(Self::DispensePaint),
            0b0101 => Some(Self::Configure),
            0b1000 => Some(Self::WashTool),
            _ => None,
        }
    }

    /// The opcode an instruction is encoded with.
    pub fn of(instruction: &Instruction) -> Self {
        match instruction {
            Instruction::Home => Self::Home,
            Instruction::Move(_) => Self::Move,
            Instruction::LoadTool { .. } => Self::LoadTool,
            Instruction::SetCupHolderPosition { .. } => Self::SetCupHolderPosition,
            Instruction::DispensePaint(_) => Self::DispensePaint,
            Instruction::Configure(_) => Self::Configure,
            Instruction::WashTool => Self::WashTool,
        }
    }
}
