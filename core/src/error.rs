use std::io;

use thiserror::Error;

/// Everything that can go wrong while loading or running a Chip-8 program.
///
/// `RomTooLarge`, `Io` and `InvalidKey` are recoverable.
/// `UnknownOpcode`, `StackOverflow` and `StackUnderflow` halt the machine until it is reset.
#[derive(Debug, Error)]
pub enum Error {
    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("unable to read ROM: {0}")]
    Io(#[from] io::Error),

    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("stack overflow: call at {pc:#05X} exceeds the maximum call depth")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("the machine is halted; reset it before cycling again")]
    Halted,

    #[error("key {0:#X} is not on the keypad")]
    InvalidKey(u8),
}

impl Error {
    /// Whether this error stops the machine
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::UnknownOpcode { .. }
                | Error::StackOverflow { .. }
                | Error::StackUnderflow { .. }
                | Error::Halted
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
