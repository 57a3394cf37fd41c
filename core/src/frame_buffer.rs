use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// A snapshot of every pixel, row-major and indexed as `y * DISPLAY_WIDTH + x`
pub type Frame = [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// # Frame Buffer
/// 64x32 monochrome pixels stored one byte per pixel (0 or 1).
///
/// The draw flag is raised by every `clear` and `blit_sprite` and stays raised until whoever
/// renders the frame calls `clear_dirty`.
#[derive(Copy, Clone)]
pub struct FrameBuffer {
    pixels: Frame,
    draw_flag: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [0; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        self.draw_flag = true;
    }

    /// XORs an 8 pixel wide sprite onto the frame.
    ///
    /// The origin always wraps onto the screen. Pixels that run past the right or bottom edge
    /// either wrap to the opposite edge or are dropped, depending on `wrap`.
    ///
    /// Returns whether any pixel that was on got switched off.
    ///
    /// # Arguments
    /// * `x` horizontal position of the sprite's left column
    /// * `y` vertical position of the sprite's top row
    /// * `rows` one byte per row, most significant bit leftmost
    /// * `wrap` whether pixels past an edge reappear on the other side
    pub fn blit_sprite(&mut self, x: u8, y: u8, rows: &[u8], wrap: bool) -> bool {
        let origin_x = x as usize % DISPLAY_WIDTH;
        let origin_y = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;

        for (row, byte) in rows.iter().enumerate() {
            let mut py = origin_y + row;
            if py >= DISPLAY_HEIGHT {
                if !wrap {
                    break;
                }
                py %= DISPLAY_HEIGHT;
            }
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let mut px = origin_x + bit;
                if px >= DISPLAY_WIDTH {
                    if !wrap {
                        break;
                    }
                    px %= DISPLAY_WIDTH;
                }
                let pixel = &mut self.pixels[py * DISPLAY_WIDTH + px];
                collision |= *pixel == 1;
                *pixel ^= 1;
            }
        }

        self.draw_flag = true;
        collision
    }

    /// The pixel at (x, y), or None when that is off the screen
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return None;
        }
        self.pixels.get(y * DISPLAY_WIDTH + x).copied()
    }

    /// Copies the frame without touching the draw flag
    pub fn snapshot(&self) -> Frame {
        self.pixels
    }

    pub fn is_dirty(&self) -> bool {
        self.draw_flag
    }

    pub fn clear_dirty(&mut self) {
        self.draw_flag = false;
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
