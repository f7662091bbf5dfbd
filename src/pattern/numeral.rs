//! Dice-face renderer
//!
//! Each face value maps onto a fixed 12-bit on/off mask over the first twelve
//! ring pixels. Lit pixels take the foreground color, every other pixel the
//! background color.

use embassy_time::Instant;
use heapless::Vec;

use super::PatternRenderer;
use crate::color::Rgb;

/// Number of ring positions covered by a mask
pub const MASK_PIXELS: usize = 12;

/// Highest face value with a mask
pub const MAX_FACE: u8 = 12;

/// Masks for faces 1..=12, bit `i` lights ring pixel `i`
const FACE_MASKS: [u16; MAX_FACE as usize] = [
    0x001, // 1
    0x041, // 2
    0x111, // 3
    0x249, // 4
    0x295, // 5
    0x555, // 6
    0xD55, // 7
    0x6DB, // 8
    0x777, // 9
    0x7DF, // 10
    0x7FF, // 11
    0xFFF, // 12
];

/// Returns the on/off mask for `face`, or `None` outside `1..=MAX_FACE`
pub const fn numeral_mask(face: u8) -> Option<u16> {
    if face == 0 || face > MAX_FACE {
        return None;
    }
    Some(FACE_MASKS[face as usize - 1])
}

/// Indexes of the lit pixels for `face`, in ring order
pub fn lit_pixels(face: u8) -> Vec<usize, MASK_PIXELS> {
    let mask = numeral_mask(face).unwrap_or(0);
    (0..MASK_PIXELS)
        .filter(|index| mask & (1 << index) != 0)
        .collect()
}

/// Renders a dice face over a background
#[derive(Debug, Clone)]
pub struct NumeralMask {
    face: u8,
    background: Rgb,
    foreground: Rgb,
}

impl NumeralMask {
    pub const fn new(face: u8, background: Rgb, foreground: Rgb) -> Self {
        Self {
            face,
            background,
            foreground,
        }
    }

    pub const fn face(&self) -> u8 {
        self.face
    }
}

impl PatternRenderer for NumeralMask {
    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let mask = numeral_mask(self.face).unwrap_or(0);
        for (index, led) in leds.iter_mut().enumerate() {
            let lit = index < MASK_PIXELS && mask & (1 << index) != 0;
            *led = if lit { self.foreground } else { self.background };
        }
    }
}
