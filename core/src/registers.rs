use crate::constants::{PROGRAM_START, STACK_DEPTH};
use crate::error::{Error, Result};

/// # Registers
///
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - VF is also written as the carry/collision flag by some instructions
///     - otherwise it is ordinary storage
/// - (i) a 16-bit memory address register; only its low 12 bits are used when addressing
/// - (pc) a 16-bit program counter
/// - (stack) 16 return addresses with (sp) pointing at the next free slot
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
        }
    }

    /// STACK.push(addr)
    pub fn push(&mut self, addr: u16) -> Result<()> {
        let sp = self.sp as usize;
        if sp >= STACK_DEPTH {
            return Err(Error::StackOverflow { pc: self.pc });
        }
        self.stack[sp] = addr;
        self.sp += 1;
        Ok(())
    }

    /// STACK.pop()
    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Error::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
