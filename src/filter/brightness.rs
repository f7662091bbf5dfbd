//! Global brightness scalar
//!
//! Applied uniformly to the outgoing frame at flush time; patterns always
//! render at full scale into the pixel buffer.

use super::Filter;
use crate::{color::Rgb, math8::scale8};

#[derive(Debug, Clone)]
pub struct BrightnessFilter {
    /// Scale factor (0-255 = 0.0-1.0)
    brightness: u8,
}

impl BrightnessFilter {
    pub const fn new(brightness: u8) -> Self {
        Self { brightness }
    }

    pub fn set(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub const fn current(&self) -> u8 {
        self.brightness
    }
}

impl Filter for BrightnessFilter {
    fn apply(&self, frame: &mut [Rgb]) {
        let current = self.brightness;

        if current == 255 {
            return;
        }

        for pixel in frame.iter_mut() {
            pixel.r = scale8(pixel.r, current);
            pixel.g = scale8(pixel.g, current);
            pixel.b = scale8(pixel.b, current);
        }
    }
}
