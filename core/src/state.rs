use crate::frame_buffer::FrameBuffer;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::timers::Timers;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// - `registers` V0..VF, I, the program counter and the call stack
/// - `timers` delay and sound, ticked at 60Hz by whoever drives the machine
///
/// ## Memory
/// - 4096 bytes of addressable memory with the sprite sheet at 0x000 and programs from 0x200
///
/// ## Display
/// - a 64x32 frame buffer and the flag that says it needs redrawing
///
/// The whole state is `Copy` so instructions can be applied as `&State -> State` and
/// previous states can be kept around for rewinding.
#[derive(Copy, Clone)]
pub struct State {
    pub registers: Registers,
    pub timers: Timers,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
}

impl State {
    pub fn new() -> Self {
        State {
            registers: Registers::new(),
            timers: Timers::new(),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
