use std::collections::VecDeque;
use std::fmt;
use std::io::Read;

use log::{debug, error, trace, warn};

use crate::constants::{ADDRESS_MASK, KEY_COUNT, MAX_SAVED_STATES};
use crate::error::{Error, Result};
use crate::frame_buffer::Frame;
use crate::instruction::Instruction;
use crate::quirks::Quirks;
use crate::registers::Registers;
use crate::state::State;

/// Whether the machine will execute another instruction
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    /// A fatal error stopped the machine; only `init` or `load` bring it back
    Halted,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - `pressed_keys` with public interfaces for manipulating them
///  - whether a fatal error has halted it
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing and reversing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    quirks: Quirks,
    status: Status,
    previous_states: VecDeque<State>,
    pressed_keys: [bool; KEY_COUNT],
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_quirks(Quirks::default())
    }

    pub fn with_quirks(quirks: Quirks) -> Self {
        Chip8 {
            state: State::new(),
            quirks,
            status: Status::Running,
            previous_states: VecDeque::with_capacity(MAX_SAVED_STATES),
            pressed_keys: [false; KEY_COUNT],
        }
    }

    /// Resets everything to its power-on state and rewrites the sprite sheet.
    /// Also clears a halt and forgets the rewind history.
    pub fn init(&mut self) {
        self.state = State::new();
        self.status = Status::Running;
        self.previous_states.clear();
        self.pressed_keys = [false; KEY_COUNT];
        debug!("reset to power-on state");
    }

    /// Resets the machine and loads a program at 0x200
    ///
    /// # Arguments
    /// * `program` the raw ROM image
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.init();
        if let Err(err) = self.state.memory.load_program(program) {
            warn!("rejected ROM: {}", err);
            return Err(err);
        }
        debug!("loaded {} byte ROM", program.len());
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.load(&program)
    }

    /// Advances the CPU by a single cycle
    /// - masks the program counter to 12 bits
    /// - gets, decodes and executes the next opcode
    /// - halts the machine if that fails, leaving the state as it was before the fetch
    pub fn cycle(&mut self) -> Result<Instruction> {
        if self.status == Status::Halted {
            return Err(Error::Halted);
        }

        self.state.registers.pc &= ADDRESS_MASK;
        let pc = self.state.registers.pc;
        let op = self.get_op();

        let outcome = match Instruction::decode(op) {
            Some(instruction) => instruction
                .execute(&self.state, &self.quirks)
                .map(|next| (instruction, next)),
            None => Err(Error::UnknownOpcode { opcode: op, pc }),
        };

        match outcome {
            Ok((instruction, next)) => {
                trace!("{:03X}: {:04X} {}", pc, op, instruction);
                self.save_state();
                self.state = next;
                Ok(instruction)
            }
            Err(err) => {
                error!("halting: {}", err);
                self.status = Status::Halted;
                Err(err)
            }
        }
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    /// - restoring a state from before a halt resumes the machine
    pub fn reverse_cycle(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                self.state = state;
                self.status = Status::Running;
                true
            }
            None => false,
        }
    }

    /// Puts the current state in previous_states
    /// - if there are already MAX_SAVED_STATES saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.previous_states.len() == MAX_SAVED_STATES {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state);
    }

    /// Decrements the delay and sound timers; called at 60Hz however many cycles ran
    pub fn tick_timers(&mut self) {
        self.state.timers.tick();
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> u16 {
        self.state.memory.read_word(self.state.registers.pc)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad index 0x0..=0xF
    /// * `pressed` whether the key is down
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        let slot = self
            .pressed_keys
            .get_mut(key as usize)
            .ok_or(Error::InvalidKey(key))?;
        *slot = pressed;
        Ok(())
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.pressed_keys
            .get(key as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Copies the frame buffer without consuming the draw flag
    pub fn snapshot(&self) -> Frame {
        self.state.frame_buffer.snapshot()
    }

    /// Returns the Frame if the display should be redrawn
    pub fn get_frame(&self) -> Option<Frame> {
        if self.is_dirty() {
            Some(self.snapshot())
        } else {
            None
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.state.frame_buffer.is_dirty()
    }

    pub fn clear_dirty(&mut self) {
        self.state.frame_buffer.clear_dirty();
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.timers.sound
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Chip8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registers = &self.state.registers;
        writeln!(f, "Chip8 ({:?})", self.status)?;
        writeln!(f, "PC: {:#05X}", registers.pc)?;
        writeln!(f, "I: {:#05X}", registers.i)?;
        writeln!(f, "SP: {}", registers.sp)?;
        writeln!(f, "Stack: {:03X?}", &registers.stack[..registers.sp as usize])?;
        writeln!(f, "V: {:02X?}", registers.v)?;
        writeln!(f, "Delay timer: {}", self.state.timers.delay)?;
        write!(f, "Sound timer: {}", self.state.timers.sound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FLAG, SPRITE_SHEET};

    fn loaded(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::new();
        chip8.load(program).unwrap();
        chip8
    }

    #[test]
    fn test_chip8_gets_op() {
        let chip8 = loaded(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op(), 0xAABB);
    }

    #[test]
    fn test_load_then_cycle_twice() {
        let mut chip8 = loaded(&[0x60, 0x05, 0x70, 0x03]);
        assert_eq!(chip8.cycle().unwrap(), Instruction::Load(0x0, 0x05));
        assert_eq!(chip8.cycle().unwrap(), Instruction::Add(0x0, 0x03));
        assert_eq!(chip8.registers().v[0x0], 8);
        assert_eq!(chip8.registers().pc, 0x204);
    }

    #[test]
    fn test_load_resets_previous_program() {
        let mut chip8 = loaded(&[0x60, 0x05, 0x61, 0x06]);
        chip8.cycle().unwrap();
        chip8.load(&[0x00, 0xE0]).unwrap();
        assert_eq!(chip8.registers().v[0x0], 0);
        assert_eq!(chip8.registers().pc, 0x200);
        assert_eq!(chip8.state().memory.slice(0x200, 4), vec![0x00, 0xE0, 0x0, 0x0]);
    }

    #[test]
    fn test_oversized_rom_leaves_reset_state() {
        let mut chip8 = loaded(&[0x60, 0x05]);
        chip8.cycle().unwrap();
        let result = chip8.load(&[0x12; 3585]);
        assert!(matches!(result, Err(Error::RomTooLarge { .. })));
        assert_eq!(chip8.registers().pc, 0x200);
        assert_eq!(chip8.registers().v[0x0], 0);
        assert_eq!(chip8.state().memory.read(0x200), 0x0);
        assert_eq!(chip8.state().memory.slice(0, 80), SPRITE_SHEET.to_vec());
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut chip8 = Chip8::new();
        let mut rom: &[u8] = &[0x00, 0xE0];
        chip8.load_rom(&mut rom).unwrap();
        assert_eq!(chip8.get_op(), 0x00E0);
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut chip8 = loaded(&[0x60, 0x05, 0xD0, 0x05]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        chip8.init();
        chip8.init();
        assert_eq!(*chip8.registers(), Registers::new());
        assert!(!chip8.is_dirty());
        assert!(chip8.snapshot().iter().all(|&p| p == 0));
        assert_eq!(chip8.state().memory.slice(0, 80), SPRITE_SHEET.to_vec());
        assert!(!chip8.reverse_cycle());
    }

    #[test]
    fn test_pc_is_masked_before_fetch() {
        let mut chip8 = loaded(&[]);
        chip8.state.registers.pc = 0x1200;
        chip8.state.memory.write(0x200, 0x60);
        chip8.state.memory.write(0x201, 0x07);
        chip8.cycle().unwrap();
        assert_eq!(chip8.registers().v[0x0], 0x07);
        assert_eq!(chip8.registers().pc, 0x202);
    }

    #[test]
    fn test_jump_to_start() {
        let mut chip8 = loaded(&[0x00, 0xE0, 0x12, 0x00]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.registers().pc, 0x200);
    }

    #[test]
    fn test_call_then_return() {
        // 0x200 CALL 0x206; 0x202 LD V0, 1; 0x204 JP 0x204; 0x206 RET
        let mut chip8 = loaded(&[0x22, 0x06, 0x60, 0x01, 0x12, 0x04, 0x00, 0xEE]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.registers().sp, 1);
        chip8.cycle().unwrap();
        assert_eq!(chip8.registers().sp, 0);
        assert_eq!(chip8.registers().pc, 0x202);
        chip8.cycle().unwrap();
        assert_eq!(chip8.registers().v[0x0], 1);
    }

    #[test]
    fn test_call_then_return_with_reference_quirks() {
        let mut chip8 = Chip8::with_quirks(Quirks::reference());
        chip8
            .load(&[0x22, 0x06, 0x60, 0x01, 0x12, 0x04, 0x00, 0xEE])
            .unwrap();
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        // the reference interpreter skips the word after the call
        assert_eq!(chip8.registers().pc, 0x204);
        assert_eq!(chip8.registers().sp, 0);
    }

    #[test]
    fn test_quirks_survive_reset() {
        let mut chip8 = Chip8::with_quirks(Quirks::reference());
        chip8.load(&[0x00, 0xE0]).unwrap();
        chip8.init();
        assert_eq!(*chip8.quirks(), Quirks::reference());
        assert_eq!(*Chip8::new().quirks(), Quirks::default());
    }

    #[test]
    fn test_unknown_opcode_halts_without_side_effects() {
        let mut chip8 = loaded(&[0x60, 0x05, 0x51, 0x23]);
        chip8.cycle().unwrap();
        let registers = *chip8.registers();
        let memory = chip8.state().memory.slice(0, 4096);

        let result = chip8.cycle();
        assert!(matches!(
            result,
            Err(Error::UnknownOpcode {
                opcode: 0x5123,
                pc: 0x202
            })
        ));
        assert_eq!(chip8.status(), Status::Halted);
        assert_eq!(*chip8.registers(), registers);
        assert_eq!(chip8.state().memory.slice(0, 4096), memory);
    }

    #[test]
    fn test_halted_machine_stays_halted() {
        let mut chip8 = loaded(&[0xFF, 0xFF]);
        assert!(chip8.cycle().is_err());
        assert!(matches!(chip8.cycle(), Err(Error::Halted)));
        assert_eq!(chip8.registers().pc, 0x200);
    }

    #[test]
    fn test_load_recovers_from_halt() {
        let mut chip8 = loaded(&[0xFF, 0xFF]);
        assert!(chip8.cycle().is_err());
        chip8.load(&[0x60, 0x01]).unwrap();
        assert_eq!(chip8.status(), Status::Running);
        assert!(chip8.cycle().is_ok());
    }

    #[test]
    fn test_stack_overflow_halts() {
        // CALL 0x200 forever
        let mut chip8 = loaded(&[0x22, 0x00]);
        for _ in 0..16 {
            chip8.cycle().unwrap();
        }
        assert!(matches!(
            chip8.cycle(),
            Err(Error::StackOverflow { pc: 0x200 })
        ));
        assert_eq!(chip8.registers().sp, 16);
        assert_eq!(chip8.status(), Status::Halted);
    }

    #[test]
    fn test_stack_underflow_halts() {
        let mut chip8 = loaded(&[0x00, 0xEE]);
        assert!(matches!(
            chip8.cycle(),
            Err(Error::StackUnderflow { pc: 0x200 })
        ));
        assert_eq!(chip8.registers().sp, 0);
        assert_eq!(chip8.status(), Status::Halted);
    }

    #[test]
    fn test_tick_timers_independent_of_cycles() {
        let mut chip8 = Chip8::new();
        chip8.state.timers.delay = 30;
        for tick in 1..=60 {
            chip8.tick_timers();
            if tick >= 30 {
                assert_eq!(chip8.delay_timer(), 0);
            } else {
                assert_eq!(chip8.delay_timer(), 30 - tick);
            }
        }
    }

    #[test]
    fn test_sound_active() {
        let mut chip8 = Chip8::new();
        chip8.state.timers.sound = 1;
        assert!(chip8.sound_active());
        chip8.tick_timers();
        assert!(!chip8.sound_active());
        assert_eq!(chip8.sound_timer(), 0);
    }

    #[test]
    fn test_draw_sets_dirty_until_cleared() {
        // LD V0, 0; LD F, V0; DRW V0, V0, 5
        let mut chip8 = loaded(&[0x60, 0x00, 0xF0, 0x29, 0xD0, 0x05]);
        for _ in 0..3 {
            chip8.cycle().unwrap();
        }
        assert!(chip8.is_dirty());
        let frame = chip8.get_frame().unwrap();
        assert_eq!(frame[0..4], [1, 1, 1, 1]);
        assert!(chip8.is_dirty());
        chip8.clear_dirty();
        assert!(chip8.get_frame().is_none());
        assert_eq!(chip8.registers().v[FLAG], 0);
    }

    #[test]
    fn test_set_key() {
        let mut chip8 = Chip8::new();
        chip8.set_key(0xE, true).unwrap();
        assert!(chip8.is_key_pressed(0xE));
        chip8.set_key(0xE, false).unwrap();
        assert!(!chip8.is_key_pressed(0xE));
    }

    #[test]
    fn test_set_key_out_of_range() {
        let mut chip8 = Chip8::new();
        assert!(matches!(chip8.set_key(0x10, true), Err(Error::InvalidKey(0x10))));
        assert!(!chip8.is_key_pressed(0x10));
    }

    #[test]
    fn test_reverse_cycle_restores_previous_state() {
        let mut chip8 = loaded(&[0x60, 0x05, 0x70, 0x03]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        assert!(chip8.reverse_cycle());
        assert_eq!(chip8.registers().v[0x0], 5);
        assert_eq!(chip8.registers().pc, 0x202);
        assert!(chip8.reverse_cycle());
        assert_eq!(chip8.registers().pc, 0x200);
        assert!(!chip8.reverse_cycle());
    }

    #[test]
    fn test_reverse_cycle_resumes_halted_machine() {
        let mut chip8 = loaded(&[0x60, 0x05, 0xFF, 0xFF]);
        chip8.cycle().unwrap();
        assert!(chip8.cycle().is_err());
        assert!(chip8.reverse_cycle());
        assert_eq!(chip8.status(), Status::Running);
        assert_eq!(chip8.registers().pc, 0x200);
    }

    #[test]
    fn test_chip8_drops_old_saved_states() {
        let mut chip8 = Chip8::new();
        for _ in 0..MAX_SAVED_STATES {
            chip8.save_state();
        }
        assert_eq!(MAX_SAVED_STATES, chip8.previous_states.len());
        chip8.save_state();
        assert_eq!(MAX_SAVED_STATES, chip8.previous_states.len());
    }

    #[test]
    fn test_display_dump() {
        let chip8 = loaded(&[0x60, 0x05]);
        let dump = chip8.to_string();
        assert!(dump.starts_with("Chip8 (Running)\nPC: 0x200\n"));
        assert!(dump.ends_with("Sound timer: 0"));
    }
}
