//! Solid fill pattern
//!
//! Paints every pixel with one color; also used for clearing and for the
//! background step of animations.

use embassy_time::Instant;

use super::PatternRenderer;
use crate::color::Rgb;

#[derive(Debug, Clone)]
pub struct SolidFill {
    color: Rgb,
}

impl SolidFill {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }
}

impl PatternRenderer for SolidFill {
    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        leds.fill(self.color);
    }
}
