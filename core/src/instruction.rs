use std::fmt;

use crate::error::Result;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::quirks::Quirks;
use crate::state::State;

/// The subset of the Chip-8 instruction set this machine executes.
///
/// Register operands are register indices (0x0..=0xF), not register values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XNN
    SkipEqual(u8, u8),
    /// 4XNN
    SkipNotEqual(u8, u8),
    /// 6XNN
    Load(u8, u8),
    /// 7XNN
    Add(u8, u8),
    /// ANNN
    LoadIndex(u16),
    /// DXYN
    Draw(u8, u8, u8),
    /// FX1E
    AddIndex(u8),
    /// FX29
    LoadFont(u8),
    /// FX33
    StoreBcd(u8),
    /// FX65
    LoadRegisters(u8),
}

impl Instruction {
    /// Selects the Instruction for a given Opcode, or `None` if it isn't implemented
    pub fn decode(op: u16) -> Option<Self> {
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clear,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x1, ..) => Instruction::Jump(op.nnn()),
            (0x2, ..) => Instruction::Call(op.nnn()),
            (0x3, ..) => Instruction::SkipEqual(op.x(), op.nn()),
            (0x4, ..) => Instruction::SkipNotEqual(op.x(), op.nn()),
            (0x6, ..) => Instruction::Load(op.x(), op.nn()),
            (0x7, ..) => Instruction::Add(op.x(), op.nn()),
            (0xA, ..) => Instruction::LoadIndex(op.nnn()),
            (0xD, ..) => Instruction::Draw(op.x(), op.y(), op.n()),
            (0xF, .., 0x1, 0xE) => Instruction::AddIndex(op.x()),
            (0xF, .., 0x2, 0x9) => Instruction::LoadFont(op.x()),
            (0xF, .., 0x3, 0x3) => Instruction::StoreBcd(op.x()),
            (0xF, .., 0x6, 0x5) => Instruction::LoadRegisters(op.x()),
            _ => return None,
        };
        Some(instruction)
    }

    /// Applies the instruction to `state`, producing the state that follows it.
    ///
    /// On error `state` is untouched and nothing is returned in its place.
    pub fn execute(self, state: &State, quirks: &Quirks) -> Result<State> {
        let next = match self {
            Instruction::Clear => cls(state),
            Instruction::Return => ret(state, quirks)?,
            Instruction::Jump(addr) => jp(state, addr),
            Instruction::Call(addr) => call(state, addr)?,
            Instruction::SkipEqual(x, nn) => se(state, quirks, x, nn),
            Instruction::SkipNotEqual(x, nn) => sne(state, quirks, x, nn),
            Instruction::Load(x, nn) => ld(state, x, nn),
            Instruction::Add(x, nn) => add(state, x, nn),
            Instruction::LoadIndex(addr) => ldi(state, addr),
            Instruction::Draw(x, y, n) => drw(state, quirks, x, y, n),
            Instruction::AddIndex(x) => addi(state, x),
            Instruction::LoadFont(x) => ldf(state, x),
            Instruction::StoreBcd(x) => bcd(state, x),
            Instruction::LoadRegisters(x) => read(state, quirks, x),
        };
        Ok(next)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Clear => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump(addr) => write!(f, "JP {:#05X}", addr),
            Instruction::Call(addr) => write!(f, "CALL {:#05X}", addr),
            Instruction::SkipEqual(x, nn) => write!(f, "SE V{:X}, {:#04X}", x, nn),
            Instruction::SkipNotEqual(x, nn) => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            Instruction::Load(x, nn) => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Instruction::Add(x, nn) => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Instruction::LoadIndex(addr) => write!(f, "LD I, {:#05X}", addr),
            Instruction::Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            Instruction::LoadFont(x) => write!(f, "LD F, V{:X}", x),
            Instruction::StoreBcd(x) => write!(f, "LD B, V{:X}", x),
            Instruction::LoadRegisters(x) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
