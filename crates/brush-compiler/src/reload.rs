//! The paint reload maneuver.
//!
//! Switches to a fast Z profile, lowers the cup holder, dips the brush and
//! drains it, hides the cup holder again and restores the drawing profile.
//! The sequence is the same every time it is inserted.

use brush_types::{Configuration, CupHolderPosition, Instruction, Move, SpeedProfile};

/// Speed profile for the dip itself.
pub const TRANSIT_SPEED: SpeedProfile = SpeedProfile::new(300, 80, 120);
/// Speed profile for drawing, restored after the dip.
pub const DRAWING_SPEED: SpeedProfile = SpeedProfile::new(800, 120, 1200);
/// Height the tool is lifted to before the cup holder moves.
pub const DIP_LIFT_Z: i16 = 2000;
/// Z positions of the dip-and-drain pattern, in order.
pub const DIP_PATTERN: [i16; 4] = [10000, 8000, 9000, 2000];

/// Number of instructions in a reload.
pub const RELOAD_LEN: usize = 9;

/// The reload instructions, in emission order.
pub fn reload_sequence() -> [Instruction; RELOAD_LEN] {
    let dip = |z| Instruction::Move(Move::z_only(z, false));
    [
        Instruction::Configure(Configuration::Speed(TRANSIT_SPEED)),
        dip(DIP_LIFT_Z),
        Instruction::cup_holder(CupHolderPosition::Standard),
        dip(DIP_PATTERN[0]),
        dip(DIP_PATTERN[1]),
        dip(DIP_PATTERN[2]),
        dip(DIP_PATTERN[3]),
        Instruction::cup_holder(CupHolderPosition::Hidden),
        Instruction::Configure(Configuration::Speed(DRAWING_SPEED)),
    ]
}

/// Whether a full reload sequence starts at `index`.
pub fn reload_starts_at(instructions: &[Instruction], index: usize) -> bool {
    instructions
        .get(index..)
        .and_then(|rest| rest.get(..RELOAD_LEN))
        .is_some_and(|window| window == reload_sequence().as_slice())
}
