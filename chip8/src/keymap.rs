use sdl2::keyboard::Keycode;

/// Keys that steer the emulator rather than the program
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    /// Run without frame pacing while held
    FastForward,
    /// Step backwards through saved states while held
    Rewind,
    /// Reload the ROM, recovering from a halt
    Reset,
}

/// Host keys for the hex keypad, indexed by the keypad value they produce.
///
/// The pad's 4x4 grid sits on the left four columns of a QWERTY keyboard:
/// ```text
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D      Q W E R
/// 7 8 9 E      A S D F
/// A 0 B F      Z X C V
/// ```
const LAYOUT: [Keycode; 16] = [
    Keycode::X,
    Keycode::Num1,
    Keycode::Num2,
    Keycode::Num3,
    Keycode::Q,
    Keycode::W,
    Keycode::E,
    Keycode::A,
    Keycode::S,
    Keycode::D,
    Keycode::Z,
    Keycode::C,
    Keycode::Num4,
    Keycode::R,
    Keycode::F,
    Keycode::V,
];

/// The keypad value for a host key, if it is part of the pad
pub fn keymap(key: Keycode) -> Option<u8> {
    LAYOUT.iter().position(|&k| k == key).map(|index| index as u8)
}

/// Space fast-forwards, Escape rewinds and F5 resets
pub fn control(key: Keycode) -> Option<Control> {
    match key {
        Keycode::Space => Some(Control::FastForward),
        Keycode::Escape => Some(Control::Rewind),
        Keycode::F5 => Some(Control::Reset),
        _ => None,
    }
}
