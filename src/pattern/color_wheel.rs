//! Continuous color wheel cycle
//!
//! Pixels are spread evenly around the wheel and the whole ring advances by
//! `speed` hue steps every frame.

use embassy_time::Instant;

use super::PatternRenderer;
use crate::{
    color::{Rgb, wheel},
    math8::spread8,
};

#[derive(Debug, Clone)]
pub struct ColorWheelCycle {
    base_hue: u8,
    speed: u8,
}

impl ColorWheelCycle {
    pub const fn new(speed: u8) -> Self {
        Self { base_hue: 0, speed }
    }

    pub const fn base_hue(&self) -> u8 {
        self.base_hue
    }
}

impl PatternRenderer for ColorWheelCycle {
    const GAMMA_CORRECTED: bool = true;

    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let len = leds.len();
        for (index, led) in leds.iter_mut().enumerate() {
            *led = wheel(self.base_hue.wrapping_add(spread8(index, len)));
        }
        self.base_hue = self.base_hue.wrapping_add(self.speed);
    }

    fn reset(&mut self) {
        self.base_hue = 0;
    }
}
