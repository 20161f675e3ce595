//! Opcode abstractions, functionality and constants.
use std::{convert::TryFrom, fmt};

use crate::{definitions::memory, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a nibble
const NIBBLE: u16 = 0x4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// The fetch is refused once the pointer reaches the last two bytes of the data, the
/// scheduler relies on this to stop a program that ran off the end of memory.
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::ProcessError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 6] = [0x00, 0xEE, 0x1E, 0xDA, 0x00, 0x00];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let pointer = 4;
/// # let err = ProcessError::ProgramCounterOutOfRange { pointer, len: SPLIT_OPCODE.len() };
/// # assert_eq!(Err(err), build_opcode(&SPLIT_OPCODE, pointer));
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, ProcessError> {
    // controlling that there is no illegal access here
    if pointer + memory::opcodes::SIZE < data.len() {
        Ok(Opcode::from_be_bytes([data[pointer], data[pointer + 1]]))
    } else {
        Err(ProcessError::ProgramCounterOutOfRange {
            pointer,
            len: data.len(),
        })
    }
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// The opcode family `T` of `TXYN`, moved into the lowest nibble.
    fn t(&self) -> usize;

    /// The register index `X` of `TXYN`.
    fn x(&self) -> usize;

    /// The register index `Y` of `TXYN`.
    fn y(&self) -> usize;

    /// The lowest nibble `N` of `TXYN`.
    fn n(&self) -> usize;

    /// The constant `NN` of `TXNN`.
    fn nn(&self) -> u8;

    /// The address `NNN` of `TNNN`.
    fn nnn(&self) -> u16;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> usize {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE)) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE)) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.y(), 0xD);
    /// ```
    fn y(&self) -> usize {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        ((self & MASK) >> NIBBLE) as usize
    }

    fn n(&self) -> usize {
        (self & OPCODE_MASK_000F) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.nn(), 0xDA);
    /// ```
    fn nn(&self) -> u8 {
        (self & OPCODE_MASK_00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & OPCODE_MASK_0FFF
    }
}

/// implTryFrom is a macro responsible for creating the boilerplate code
/// needed for the sub opcode convertions.
macro_rules! implTryFrom {
    ($type_name:ty : $type_from:ty : $( $key:literal => $val:expr ),+ $(,)? ) => {
        impl TryFrom<$type_from> for $type_name {
            type Error = $type_from;

            fn try_from(value: $type_from) -> Result<Self, Self::Error> {
                match value {
                    $(
                        $key => Ok($val),
                    )+
                    _ => Err(value),
                }
            }
        }
    };
}

/// The `00EE` style instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    /// Clears the display
    Clear,
    /// Returns from the subroutine
    Return,
}

implTryFrom!(System : Opcode :
    0x00E0 => System::Clear,
    0x00EE => System::Return,
);

/// The register to register operations of the `8XYN` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Assign,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReverse,
    ShiftLeft,
}

implTryFrom!(ArithmeticOp : usize :
    0x0 => ArithmeticOp::Assign,
    0x1 => ArithmeticOp::Or,
    0x2 => ArithmeticOp::And,
    0x3 => ArithmeticOp::Xor,
    0x4 => ArithmeticOp::Add,
    0x5 => ArithmeticOp::Sub,
    0x6 => ArithmeticOp::ShiftRight,
    0x7 => ArithmeticOp::SubReverse,
    0xE => ArithmeticOp::ShiftLeft,
);

/// The keypad conditions of the `EXNN` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOp {
    SkipPressed,
    SkipNotPressed,
}

implTryFrom!(KeyOp : u8 :
    0x9E => KeyOp::SkipPressed,
    0xA1 => KeyOp::SkipNotPressed,
);

/// The timer, keypad and memory operations of the `FXNN` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOp {
    GetDelayTimer,
    AwaitKeyPress,
    SetDelayTimer,
    SetSoundTimer,
    AddToIndex,
    FontAddress,
    StoreBcd,
    StoreRegisters,
    LoadRegisters,
}

implTryFrom!(MiscOp : u8 :
    0x07 => MiscOp::GetDelayTimer,
    0x0A => MiscOp::AwaitKeyPress,
    0x15 => MiscOp::SetDelayTimer,
    0x18 => MiscOp::SetSoundTimer,
    0x1E => MiscOp::AddToIndex,
    0x29 => MiscOp::FontAddress,
    0x33 => MiscOp::StoreBcd,
    0x55 => MiscOp::StoreRegisters,
    0x65 => MiscOp::LoadRegisters,
);

/// A decoded instruction, only holding the fields the instruction uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` and `00EE`
    System(System),
    /// `1NNN`
    Jump { nnn: u16 },
    /// `2NNN`
    Call { nnn: u16 },
    /// `3XNN`
    SkipIfEqual { x: usize, nn: u8 },
    /// `4XNN`
    SkipIfNotEqual { x: usize, nn: u8 },
    /// `5XY0`, the lowest nibble is ignored
    SkipIfRegistersEqual { x: usize, y: usize },
    /// `6XNN`
    SetRegister { x: usize, nn: u8 },
    /// `7XNN`
    AddConstant { x: usize, nn: u8 },
    /// `8XYN`
    Arithmetic { op: ArithmeticOp, x: usize, y: usize },
    /// `9XY0`, the lowest nibble is ignored
    SkipIfRegistersNotEqual { x: usize, y: usize },
    /// `ANNN`
    SetIndex { nnn: u16 },
    /// `BNNN`, `x` is the highest nibble of `NNN`
    JumpWithOffset { x: usize, nnn: u16 },
    /// `CXNN`
    Random { x: usize, nn: u8 },
    /// `DXYN`
    Draw { x: usize, y: usize, n: usize },
    /// `EX9E` and `EXA1`
    Key { op: KeyOp, x: usize },
    /// `FXNN`
    Misc { op: MiscOp, x: usize },
    /// Anything unassigned, it is executed as a no-op.
    Unknown(Opcode),
}

impl Instruction {
    /// Will decode the opcode, this never fails as unassigned opcodes
    /// become [`Instruction::Unknown`].
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// assert_eq!(Instruction::decode(0xA123), Instruction::SetIndex { nnn: 0x123 });
    /// assert_eq!(Instruction::decode(0x00E1), Instruction::Unknown(0x00E1));
    /// ```
    pub fn decode(opcode: Opcode) -> Self {
        let (x, y, n, nn, nnn) = (opcode.x(), opcode.y(), opcode.n(), opcode.nn(), opcode.nnn());
        let decoded = match opcode.t() {
            0x0 => System::try_from(opcode).ok().map(Instruction::System),
            0x1 => Some(Instruction::Jump { nnn }),
            0x2 => Some(Instruction::Call { nnn }),
            0x3 => Some(Instruction::SkipIfEqual { x, nn }),
            0x4 => Some(Instruction::SkipIfNotEqual { x, nn }),
            0x5 => Some(Instruction::SkipIfRegistersEqual { x, y }),
            0x6 => Some(Instruction::SetRegister { x, nn }),
            0x7 => Some(Instruction::AddConstant { x, nn }),
            0x8 => ArithmeticOp::try_from(n)
                .ok()
                .map(|op| Instruction::Arithmetic { op, x, y }),
            0x9 => Some(Instruction::SkipIfRegistersNotEqual { x, y }),
            0xA => Some(Instruction::SetIndex { nnn }),
            0xB => Some(Instruction::JumpWithOffset { x, nnn }),
            0xC => Some(Instruction::Random { x, nn }),
            0xD => Some(Instruction::Draw { x, y, n }),
            0xE => KeyOp::try_from(nn).ok().map(|op| Instruction::Key { op, x }),
            0xF => MiscOp::try_from(nn).ok().map(|op| Instruction::Misc { op, x }),
            _ => None,
        };
        decoded.unwrap_or(Instruction::Unknown(opcode))
    }
}

impl From<Opcode> for Instruction {
    fn from(opcode: Opcode) -> Self {
        Instruction::decode(opcode)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::System(System::Clear) => write!(f, "CLS"),
            Instruction::System(System::Return) => write!(f, "RET"),
            Instruction::Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Instruction::Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            Instruction::SkipIfEqual { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            Instruction::SkipIfNotEqual { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            Instruction::SkipIfRegistersEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::SetRegister { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Instruction::AddConstant { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Instruction::Arithmetic { op, x, y } => {
                let name = match op {
                    ArithmeticOp::Assign => "LD",
                    ArithmeticOp::Or => "OR",
                    ArithmeticOp::And => "AND",
                    ArithmeticOp::Xor => "XOR",
                    ArithmeticOp::Add => "ADD",
                    ArithmeticOp::Sub => "SUB",
                    ArithmeticOp::ShiftRight => "SHR",
                    ArithmeticOp::SubReverse => "SUBN",
                    ArithmeticOp::ShiftLeft => "SHL",
                };
                write!(f, "{} V{:X}, V{:X}", name, x, y)
            }
            Instruction::SkipIfRegistersNotEqual { x, y } => {
                write!(f, "SNE V{:X}, V{:X}", x, y)
            }
            Instruction::SetIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            Instruction::JumpWithOffset { x, nnn } => {
                write!(f, "JP V0/V{:X}, {:#05X}", x, nnn)
            }
            Instruction::Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:#X}", x, y, n),
            Instruction::Key { op, x } => match op {
                KeyOp::SkipPressed => write!(f, "SKP V{:X}", x),
                KeyOp::SkipNotPressed => write!(f, "SKNP V{:X}", x),
            },
            Instruction::Misc { op, x } => match op {
                MiscOp::GetDelayTimer => write!(f, "LD V{:X}, DT", x),
                MiscOp::AwaitKeyPress => write!(f, "LD V{:X}, K", x),
                MiscOp::SetDelayTimer => write!(f, "LD DT, V{:X}", x),
                MiscOp::SetSoundTimer => write!(f, "LD ST, V{:X}", x),
                MiscOp::AddToIndex => write!(f, "ADD I, V{:X}", x),
                MiscOp::FontAddress => write!(f, "LD F, V{:X}", x),
                MiscOp::StoreBcd => write!(f, "LD B, V{:X}", x),
                MiscOp::StoreRegisters => write!(f, "LD [I], V{:X}", x),
                MiscOp::LoadRegisters => write!(f, "LD V{:X}, [I]", x),
            },
            Instruction::Unknown(opcode) => write!(f, "DW {:#06X}", opcode),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take after an instruction.
pub enum ProgramCounterStep {
    /// Will move to the next instruction
    Advance,
    /// Will skip the next instruction
    Skip,
    /// Will simply move the program counter to the given location.
    Jump(u16),
    /// Will not change the program counter, the instruction
    /// runs again on the next execution.
    Suspend,
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Advance, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Advance
        }
    }

    /// Will calculate the next program counter from the current one.
    #[inline]
    pub fn apply(&self, pc: u16) -> u16 {
        const SIZE: u16 = memory::opcodes::SIZE as u16;
        match *self {
            ProgramCounterStep::Advance => pc.wrapping_add(SIZE),
            ProgramCounterStep::Skip => pc.wrapping_add(2 * SIZE),
            ProgramCounterStep::Jump(pointer) => pointer,
            ProgramCounterStep::Suspend => pc,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents a command from the interpreter up to the scheduler.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The display changed and has to be redrawn.
    Draw,
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter by a step.
    fn step(&mut self, step: ProgramCounterStep);
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// Every handler reads its operands before it writes anything, as `VF` can be
/// an operand and the flag target of the same instruction.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter) trait,
/// as the step functionality is applied after each handler.
pub trait ChipOpcodes: ProgramCounter {
    /// will execute a single decoded instruction
    fn execute(&mut self, instruction: Instruction) -> Operation {
        let mut operation = Operation::None;
        let mut step_op = |(step, op): (ProgramCounterStep, Operation)| {
            operation = op;
            step
        };

        let step = match instruction {
            Instruction::System(system) => step_op(self.system(system)),
            Instruction::Jump { nnn } => self.jump(nnn),
            Instruction::Call { nnn } => self.call(nnn),
            Instruction::SkipIfEqual { x, nn } => self.skip_if_equal(x, nn),
            Instruction::SkipIfNotEqual { x, nn } => self.skip_if_not_equal(x, nn),
            Instruction::SkipIfRegistersEqual { x, y } => self.skip_if_registers_equal(x, y),
            Instruction::SetRegister { x, nn } => self.set_register(x, nn),
            Instruction::AddConstant { x, nn } => self.add_constant(x, nn),
            Instruction::Arithmetic { op, x, y } => self.arithmetic(op, x, y),
            Instruction::SkipIfRegistersNotEqual { x, y } => {
                self.skip_if_registers_not_equal(x, y)
            }
            Instruction::SetIndex { nnn } => self.set_index(nnn),
            Instruction::JumpWithOffset { x, nnn } => self.jump_with_offset(x, nnn),
            Instruction::Random { x, nn } => self.random(x, nn),
            Instruction::Draw { x, y, n } => step_op(self.draw(x, y, n)),
            Instruction::Key { op, x } => self.key(op, x),
            Instruction::Misc { op, x } => self.misc(op, x),
            Instruction::Unknown(opcode) => {
                log::debug!("skipping unassigned opcode {:#06X}", opcode);
                ProgramCounterStep::Advance
            }
        };

        self.step(step);
        operation
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn system(&mut self, op: System) -> (ProgramCounterStep, Operation);

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&mut self, nnn: u16) -> ProgramCounterStep;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call(&mut self, nnn: u16) -> ProgramCounterStep;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    fn skip_if_equal(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn skip_if_not_equal(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    fn skip_if_registers_equal(&mut self, x: usize, y: usize) -> ProgramCounterStep;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn set_register(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add_constant(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Shifts right by `1`, the shifted out bit goes into `VF`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Shifts left by `1`, the shifted out bit goes into `VF`.
    fn arithmetic(&mut self, op: ArithmeticOp, x: usize, y: usize) -> ProgramCounterStep;

    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_if_registers_not_equal(&mut self, x: usize, y: usize) -> ProgramCounterStep;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn set_index(&mut self, nnn: u16) -> ProgramCounterStep;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0` (or `VX`).
    fn jump_with_offset(&mut self, x: usize, nnn: u16) -> ProgramCounterStep;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random number and `NN`.
    fn random(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels.
    fn draw(&mut self, x: usize, y: usize, n: usize) -> (ProgramCounterStep, Operation);

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&mut self, op: KeyOp, x: usize) -> ProgramCounterStep;

    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the font sprite for the character in `VX`.
    /// - `FX33` - BCD      - `246 / 100 => 2` `246 / 10 => 24 % 10 => 4` `246 % 10 => 6` - Stores the binary-coded decimal representation of `VX` at `I`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`.
    fn misc(&mut self, op: MiscOp, x: usize) -> ProgramCounterStep;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple() {
        assert_eq!(
            Instruction::decode(0x00E0),
            Instruction::System(System::Clear)
        );
        assert_eq!(Instruction::from(0x00E1), Instruction::Unknown(0x00E1));
    }

    #[test]
    fn test_decode_multiple() {
        let tests = [
            (0x00E0, Instruction::System(System::Clear)),
            (0x00EE, Instruction::System(System::Return)),
            (0x0123, Instruction::Unknown(0x0123)),
            (0x1919, Instruction::Jump { nnn: 0x919 }),
            (0x2222, Instruction::Call { nnn: 0x222 }),
            (0x3123, Instruction::SkipIfEqual { x: 0x1, nn: 0x23 }),
            (0x4123, Instruction::SkipIfNotEqual { x: 0x1, nn: 0x23 }),
            (0x5120, Instruction::SkipIfRegistersEqual { x: 0x1, y: 0x2 }),
            (0x5121, Instruction::SkipIfRegistersEqual { x: 0x1, y: 0x2 }),
            (0x6123, Instruction::SetRegister { x: 0x1, nn: 0x23 }),
            (0x7123, Instruction::AddConstant { x: 0x1, nn: 0x23 }),
            (
                0x8124,
                Instruction::Arithmetic {
                    op: ArithmeticOp::Add,
                    x: 0x1,
                    y: 0x2,
                },
            ),
            (
                0x812E,
                Instruction::Arithmetic {
                    op: ArithmeticOp::ShiftLeft,
                    x: 0x1,
                    y: 0x2,
                },
            ),
            (0x8128, Instruction::Unknown(0x8128)),
            (0x9120, Instruction::SkipIfRegistersNotEqual { x: 0x1, y: 0x2 }),
            (0xA222, Instruction::SetIndex { nnn: 0x222 }),
            (0xB222, Instruction::JumpWithOffset { x: 0x2, nnn: 0x222 }),
            (0xC123, Instruction::Random { x: 0x1, nn: 0x23 }),
            (0xD123, Instruction::Draw { x: 0x1, y: 0x2, n: 0x3 }),
            (
                0xE19E,
                Instruction::Key {
                    op: KeyOp::SkipPressed,
                    x: 0x1,
                },
            ),
            (
                0xE1A1,
                Instruction::Key {
                    op: KeyOp::SkipNotPressed,
                    x: 0x1,
                },
            ),
            (0xE111, Instruction::Unknown(0xE111)),
            (
                0xF00A,
                Instruction::Misc {
                    op: MiscOp::AwaitKeyPress,
                    x: 0x0,
                },
            ),
            (
                0xF565,
                Instruction::Misc {
                    op: MiscOp::LoadRegisters,
                    x: 0x5,
                },
            ),
            (0xF0AA, Instruction::Unknown(0xF0AA)),
        ];
        for (value, res) in tests {
            assert_eq!(Instruction::decode(value), res, "opcode {:#06X}", value);
        }
    }

    #[test]
    fn test_fields() {
        let opcode: Opcode = 0xD7A5;
        assert_eq!(opcode.t(), 0xD);
        assert_eq!(opcode.x(), 0x7);
        assert_eq!(opcode.y(), 0xA);
        assert_eq!(opcode.n(), 0x5);
        assert_eq!(opcode.nn(), 0xA5);
        assert_eq!(opcode.nnn(), 0x7A5);
    }

    #[test]
    fn test_build_opcode_bounds() {
        let data = [0u8; memory::SIZE];
        assert!(build_opcode(&data, memory::SIZE - 3).is_ok());
        assert_eq!(
            build_opcode(&data, memory::SIZE - 2),
            Err(ProcessError::ProgramCounterOutOfRange {
                pointer: memory::SIZE - 2,
                len: memory::SIZE
            })
        );
        assert!(build_opcode(&data, memory::SIZE + 10).is_err());
    }

    #[test]
    fn test_step_apply() {
        assert_eq!(ProgramCounterStep::Advance.apply(0x200), 0x202);
        assert_eq!(ProgramCounterStep::Skip.apply(0x200), 0x204);
        assert_eq!(ProgramCounterStep::Jump(0x300).apply(0x200), 0x300);
        assert_eq!(ProgramCounterStep::Suspend.apply(0x200), 0x200);
    }

    #[test]
    fn test_display_mnemonics() {
        let tests = [
            (0x00E0, "CLS"),
            (0x1234, "JP 0x234"),
            (0x8AB5, "SUB VA, VB"),
            (0xB234, "JP V0/V2, 0x234"),
            (0xD125, "DRW V1, V2, 0x5"),
            (0xF30A, "LD V3, K"),
            (0xFFFF, "DW 0xFFFF"),
        ];
        for (value, text) in tests {
            assert_eq!(Instruction::decode(value).to_string(), text);
        }
    }
}
