//! The controller's instruction set.
//!
//! The set is closed: the wire format has no self-describing length field,
//! so a controller cannot skip an instruction it does not know. Adding a
//! variant here means extending the frame table in `brush-codegen` as well.

use crate::StrokeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tool-head axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// The axis shapes a move frame can carry.
///
/// Only these four combinations have a mask on the wire. Any other
/// present/absent mix is rejected by [`Move::from_axes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    Full { x: i16, y: i16, z: i16 },
    XOnly(i16),
    YOnly(i16),
    ZOnly(i16),
}

impl MoveTarget {
    /// The target as optional per-axis operands.
    pub fn axes(self) -> (Option<i16>, Option<i16>, Option<i16>) {
        match self {
            Self::Full { x, y, z } => (Some(x), Some(y), Some(z)),
            Self::XOnly(x) => (Some(x), None, None),
            Self::YOnly(y) => (None, Some(y), None),
            Self::ZOnly(z) => (None, None, Some(z)),
        }
    }
}

/// A tool-head move.
///
/// `subspace` marks a canvas-relative move, as opposed to an absolute
/// transit move in machine space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub target: MoveTarget,
    pub subspace: bool,
}

impl Move {
    /// Move all three axes.
    pub const fn to(x: i16, y: i16, z: i16, subspace: bool) -> Self {
        Self {
            target: MoveTarget::Full { x, y, z },
            subspace,
        }
    }

    /// Move only the Z axis.
    pub const fn z_only(z: i16, subspace: bool) -> Self {
        Self {
            target: MoveTarget::ZOnly(z),
            subspace,
        }
    }

    /// Build a move from optional axis operands.
    ///
    /// Accepts all three axes, or exactly one of them. Everything else
    /// (including no axis at all) is [`StrokeError::InvalidAxisCombination`].
    pub fn from_axes(
        x: Option<i16>,
        y: Option<i16>,
        z: Option<i16>,
        subspace: bool,
    ) -> crate::Result<Self> {
        let target = match (x, y, z) {
            (Some(x), Some(y), Some(z)) => MoveTarget::Full { x, y, z },
            (Some(x), None, None) => MoveTarget::XOnly(x),
            (None, Some(y), None) => MoveTarget::YOnly(y),
            (None, None, Some(z)) => MoveTarget::ZOnly(z),
            _ => {
                return Err(StrokeError::InvalidAxisCombination {
                    x: x.is_some(),
                    y: y.is_some(),
                    z: z.is_some(),
                })
            }
        };
        Ok(Self { target, subspace })
    }

    pub fn x(&self) -> Option<i16> {
        self.target.axes().0
    }

    pub fn y(&self) -> Option<i16> {
        self.target.axes().1
    }

    pub fn z(&self) -> Option<i16> {
        self.target.axes().2
    }
}

/// Paint cup holder positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CupHolderPosition {
    Hidden = 0,
    Standard = 1,
}

impl CupHolderPosition {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Hidden),
            1 => Some(Self::Standard),
            _ => None,
        }
    }
}

/// Per-channel paint intensities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PaintMix {
    pub white: u8,
    pub black: u8,
    pub blue: u8,
    pub yellow: u8,
    pub red: u8,
}

impl PaintMix {
    /// Channels in wire order.
    pub fn channels(self) -> [u8; 5] {
        [self.white, self.black, self.blue, self.yellow, self.red]
    }
}

/// Stepper speed profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeedProfile {
    pub ramp: u16,
    pub speed_min: u16,
    pub speed_max: u16,
}

impl SpeedProfile {
    pub const fn new(ramp: u16, speed_min: u16, speed_max: u16) -> Self {
        Self {
            ramp,
            speed_min,
            speed_max,
        }
    }
}

/// Named configuration domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigParameter {
    Speed = 0,
}

impl ConfigParameter {
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// A controller configuration change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Configuration {
    /// Speed profile for subsequent moves.
    Speed(SpeedProfile),
    /// A raw parameter id and its payload bytes.
    Raw { parameter: u8, values: Vec<u8> },
}

impl Configuration {
    /// The parameter id byte.
    pub fn parameter(&self) -> u8 {
        match self {
            Self::Speed(_) => ConfigParameter::Speed.id(),
            Self::Raw { parameter, .. } => *parameter,
        }
    }
}

/// A single controller instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instruction {
    /// Drive every axis to its home switch.
    Home,
    Move(Move),
    /// Pick up a tool by id (0–15).
    LoadTool { tool: u8 },
    SetCupHolderPosition {
        position: CupHolderPosition,
        move_tool: bool,
    },
    DispensePaint(PaintMix),
    Configure(Configuration),
    WashTool,
}

impl Instruction {
    /// Shorthand for a speed configuration.
    pub const fn configure_speed(ramp: u16, speed_min: u16, speed_max: u16) -> Self {
        Self::Configure(Configuration::Speed(SpeedProfile::new(
            ramp, speed_min, speed_max,
        )))
    }

    /// Shorthand for a cup holder change that leaves the tool in place.
    pub const fn cup_holder(position: CupHolderPosition) -> Self {
        Self::SetCupHolderPosition {
            position,
            move_tool: false,
        }
    }

    /// Short mnemonic used in listings and logs.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Move(_) => "MOVE",
            Self::LoadTool { .. } => "LOAD",
            Self::SetCupHolderPosition { .. } => "CUP",
            Self::DispensePaint(_) => "DISPENSE",
            Self::Configure(_) => "CONFIG",
            Self::WashTool => "WASH",
        }
    }
}

impl From<Move> for Instruction {
    fn from(m: Move) -> Self {
        Self::Move(m)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())?;
        match self {
            Self::Home | Self::WashTool => Ok(()),
            Self::Move(m) => {
                if m.subspace {
                    write!(f, " subspace")?;
                }
                let (x, y, z) = m.target.axes();
                for (axis, value) in [(Axis::X, x), (Axis::Y, y), (Axis::Z, z)] {
                    if let Some(v) = value {
                        write!(f, " {axis}={v}")?;
                    }
                }
                Ok(())
            }
            Self::LoadTool { tool } => write!(f, " tool={tool}"),
            Self::SetCupHolderPosition {
                position,
                move_tool,
            } => {
                let name = match position {
                    CupHolderPosition::Hidden => "hidden",
                    CupHolderPosition::Standard => "standard",
                };
                write!(f, " {name}")?;
                if *move_tool {
                    write!(f, " move_tool")?;
                }
                Ok(())
            }
            Self::DispensePaint(mix) => write!(
                f,
                " white={} black={} blue={} yellow={} red={}",
                mix.white, mix.black, mix.blue, mix.yellow, mix.red
            ),
            Self::Configure(Configuration::Speed(s)) => write!(
                f,
                " speed ramp={} min={} max={}",
                s.ramp, s.speed_min, s.speed_max
            ),
            Self::Configure(Configuration::Raw { parameter, values }) => {
                write!(f, " param={parameter} len={}", values.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_axes_supported_shapes() {
        assert_eq!(
            Move::from_axes(Some(1), Some(2), Some(3), true).unwrap(),
            Move::to(1, 2, 3, true)
        );
        assert_eq!(
            Move::from_axes(None, None, Some(2500), false).unwrap(),
            Move::z_only(2500, false)
        );
        assert_eq!(
            Move::from_axes(Some(7), None, None, false).unwrap().target,
            MoveTarget::XOnly(7)
        );
        assert_eq!(
            Move::from_axes(None, Some(-7), None, true).unwrap().target,
            MoveTarget::YOnly(-7)
        );
    }

    #[test]
    fn test_from_axes_rejects_other_shapes() {
        let cases = [
            (None, None, None),
            (Some(1), Some(2), None),
            (Some(1), None, Some(3)),
            (None, Some(2), Some(3)),
        ];
        for (x, y, z) in cases {
            let err = Move::from_axes(x, y, z, true).unwrap_err();
            assert_eq!(
                err,
                StrokeError::InvalidAxisCombination {
                    x: x.is_some(),
                    y: y.is_some(),
                    z: z.is_some(),
                }
            );
        }
    }

    #[test]
    fn test_move_axis_accessors() {
        let m = Move::z_only(1600, true);
        assert_eq!((m.x(), m.y(), m.z()), (None, None, Some(1600)));
        let m = Move::to(-5, 6, 7, false);
        assert_eq!((m.x(), m.y(), m.z()), (Some(-5), Some(6), Some(7)));
    }

    #[test]
    fn test_cup_holder_codes() {
        assert_eq!(CupHolderPosition::Hidden.code(), 0);
        assert_eq!(CupHolderPosition::Standard.code(), 1);
        assert_eq!(
            CupHolderPosition::from_code(1),
            Some(CupHolderPosition::Standard)
        );
        assert_eq!(CupHolderPosition::from_code(2), None);
    }

    #[test]
    fn test_configuration_parameter() {
        let speed = Configuration::Speed(SpeedProfile::new(1, 2, 3));
        assert_eq!(speed.parameter(), 0);
        let raw = Configuration::Raw {
            parameter: 9,
            values: vec![1, 2],
        };
        assert_eq!(raw.parameter(), 9);
    }

    #[test]
    fn test_instruction_display() {
        assert_eq!(Instruction::Home.to_string(), "HOME");
        assert_eq!(
            Instruction::Move(Move::to(0, 10, 1600, true)).to_string(),
            "MOVE subspace x=0 y=10 z=1600"
        );
        assert_eq!(Instruction::Move(Move::z_only(2000, false)).to_string(), "MOVE z=2000");
        assert_eq!(
            Instruction::configure_speed(300, 80, 120).to_string(),
            "CONFIG speed ramp=300 min=80 max=120"
        );
        assert_eq!(
            Instruction::cup_holder(CupHolderPosition::Standard).to_string(),
            "CUP standard"
        );
    }

    #[test]
    fn test_instruction_json_round_trip() {
        let program = vec![
            Instruction::Home,
            Instruction::Move(Move::to(1, 2, 3, true)),
            Instruction::configure_speed(800, 120, 1200),
            Instruction::DispensePaint(PaintMix {
                white: 1,
                ..PaintMix::default()
            }),
            Instruction::WashTool,
        ];
        let json = serde_json::to_string(&program).unwrap();
        let back: Vec<Instruction> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, program);
    }
}
