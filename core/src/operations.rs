use crate::constants::{ADDRESS_MASK, FLAG, GLYPH_SIZE};
use crate::error::Result;
use crate::quirks::Quirks;
use crate::state::State;

/// Every instruction that doesn't jump moves on to the next word
fn advance(state: &mut State) {
    state.registers.pc = state.registers.pc.wrapping_add(0x2);
}

/// Moves past the next word as well when `condition` holds
fn skip_if(state: &State, condition: bool) -> State {
    let mut next = *state;
    advance(&mut next);
    if condition {
        advance(&mut next);
    }
    next
}

/// The operand 3XNN and 4XNN compare against NN
fn skip_operand(state: &State, quirks: &Quirks, x: u8) -> u8 {
    if quirks.compare_register_index {
        x
    } else {
        state.registers.v[x as usize]
    }
}

/// clear
pub fn cls(state: &State) -> State {
    let mut next = *state;
    next.frame_buffer.clear();
    advance(&mut next);
    next
}

/// PC = STACK.pop()
pub fn ret(state: &State, quirks: &Quirks) -> Result<State> {
    let mut next = *state;
    next.registers.pc = next.registers.pop()?;
    if quirks.return_skips_slot {
        advance(&mut next);
    }
    Ok(next)
}

/// PC = addr
pub fn jp(state: &State, addr: u16) -> State {
    let mut next = *state;
    next.registers.pc = addr;
    next
}

/// STACK.push(PC + 2); PC = addr
pub fn call(state: &State, addr: u16) -> Result<State> {
    let mut next = *state;
    next.registers.push(state.registers.pc.wrapping_add(0x2))?;
    next.registers.pc = addr;
    Ok(next)
}

/// if Vx == nn then pc += 2
pub fn se(state: &State, quirks: &Quirks, x: u8, nn: u8) -> State {
    skip_if(state, skip_operand(state, quirks, x) == nn)
}

/// if Vx != nn then pc += 2
pub fn sne(state: &State, quirks: &Quirks, x: u8, nn: u8) -> State {
    skip_if(state, skip_operand(state, quirks, x) != nn)
}

/// Vx = nn
pub fn ld(state: &State, x: u8, nn: u8) -> State {
    let mut next = *state;
    next.registers.v[x as usize] = nn;
    advance(&mut next);
    next
}

/// Vx += nn
/// Add nn to Vx; allow for overflow but drop it without touching VF
pub fn add(state: &State, x: u8, nn: u8) -> State {
    let mut next = *state;
    next.registers.v[x as usize] = state.registers.v[x as usize].wrapping_add(nn);
    advance(&mut next);
    next
}

/// I = addr
pub fn ldi(state: &State, addr: u16) -> State {
    let mut next = *state;
    next.registers.i = addr;
    advance(&mut next);
    next
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position Vx, Vy on the FrameBuffer.
/// Sets VF if any pixels were erased
pub fn drw(state: &State, quirks: &Quirks, x: u8, y: u8, n: u8) -> State {
    let mut next = *state;
    let rows = state.memory.slice(state.registers.i & ADDRESS_MASK, n as usize);
    let collision = next.frame_buffer.blit_sprite(
        state.registers.v[x as usize],
        state.registers.v[y as usize],
        &rows,
        quirks.wrap_sprites,
    );
    next.registers.v[FLAG] = u8::from(collision);
    advance(&mut next);
    next
}

/// I += Vx; VF = I + Vx > 0xFFF
pub fn addi(state: &State, x: u8) -> State {
    let mut next = *state;
    let sum = u32::from(state.registers.i) + u32::from(state.registers.v[x as usize]);
    next.registers.v[FLAG] = u8::from(sum > u32::from(ADDRESS_MASK));
    next.registers.i = state
        .registers
        .i
        .wrapping_add(u16::from(state.registers.v[x as usize]));
    advance(&mut next);
    next
}

/// I = Vx * 5
/// Set I to the address of the glyph for the digit in Vx
pub fn ldf(state: &State, x: u8) -> State {
    let mut next = *state;
    next.registers.i = u16::from(state.registers.v[x as usize]) * GLYPH_SIZE;
    advance(&mut next);
    next
}

/// mem[I..I+3] = bcd(Vx)
/// Store the decimal digits of Vx in memory starting at address I
pub fn bcd(state: &State, x: u8) -> State {
    let mut next = *state;
    let value = state.registers.v[x as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (offset, digit) in digits.iter().enumerate() {
        let addr = state.registers.i.wrapping_add(offset as u16);
        next.memory.write(addr, *digit);
    }
    advance(&mut next);
    next
}

/// V0..=Vx = mem[I..=I+x]
/// Fill V0..=Vx with memory starting at address I, then optionally move I past what was read
pub fn read(state: &State, quirks: &Quirks, x: u8) -> State {
    let mut next = *state;
    for register in 0..=x {
        next.registers.v[register as usize] = state
            .memory
            .read(state.registers.i.wrapping_add(u16::from(register)));
    }
    if quirks.increment_index_on_load {
        next.registers.i = state.registers.i.wrapping_add(u16::from(x) + 1);
    }
    advance(&mut next);
    next
}
