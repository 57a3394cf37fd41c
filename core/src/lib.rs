pub use chip8::{Chip8, Status};
pub use error::{Error, Result};
pub use frame_buffer::{Frame, FrameBuffer};
pub use instruction::Instruction;
pub use memory::Memory;
pub use quirks::Quirks;
pub use registers::Registers;
pub use timers::Timers;

mod chip8;
pub mod constants;
mod error;
mod frame_buffer;
mod instruction;
mod memory;
mod opcode;
mod operations;
mod quirks;
mod registers;
pub mod state;
mod timers;
