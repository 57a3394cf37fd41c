/// # Timers
/// Two 8-bit countdown timers, decremented at 60Hz regardless of how fast the CPU runs.
/// - the delay timer can be set and read by programs
/// - while the sound timer is above 0 a tone should play
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decrements each timer that is still running
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
