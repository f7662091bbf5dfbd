//! Multi-step blocking animations
//!
//! An animation draws one step at a time into the pixel buffer and says how
//! long that step should stay on the ring. [`RenderEngine::play`] runs the
//! steps back to back with a blocking delay; a cooperative scheduler can
//! instead call [`Animation::advance`] itself and yield for the returned
//! duration.
//!
//! [`RenderEngine::play`]: crate::RenderEngine::play

use embassy_time::Duration;
use heapless::Vec;

use crate::{
    color::{BLACK, Rgb},
    pattern::{MASK_PIXELS, Pattern, lit_pixels},
};

pub trait Animation {
    /// Draw the next step into `leds`
    ///
    /// Returns how long the step should be shown, or `None` once the
    /// animation has finished (nothing is drawn in that case).
    fn advance(&mut self, leds: &mut [Rgb]) -> Option<Duration>;
}

/// Timings and colors of the dice roll
#[derive(Debug, Clone, Copy)]
pub struct RollConfig {
    /// Number of chase steps before the face is revealed
    pub tumble_steps: u16,
    pub tumble_delay: Duration,
    pub clear_delay: Duration,
    pub background_delay: Duration,
    /// Delay after each revealed pixel
    pub reveal_delay: Duration,
    pub tumble_color: Rgb,
    pub background: Rgb,
    pub foreground: Rgb,
}

impl RollConfig {
    pub const DEFAULT: Self = Self {
        tumble_steps: 24,
        tumble_delay: Duration::from_millis(25),
        clear_delay: Duration::from_millis(120),
        background_delay: Duration::from_millis(150),
        reveal_delay: Duration::from_millis(90),
        tumble_color: Rgb {
            r: 255,
            g: 255,
            b: 255,
        },
        background: Rgb { r: 0, g: 0, b: 48 },
        foreground: Rgb {
            r: 255,
            g: 160,
            b: 0,
        },
    };

    /// Total number of steps a roll for `face` takes
    pub fn step_count(&self, face: u8) -> usize {
        usize::from(self.tumble_steps) + 2 + lit_pixels(face).len()
    }
}

impl Default for RollConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RollPhase {
    Tumble(u16),
    Clear,
    Background,
    Reveal(usize),
    Done,
}

/// Dice roll: chase, clear, paint background, reveal the face pixel by pixel
#[derive(Debug, Clone)]
pub struct RollAnimation {
    face: u8,
    config: RollConfig,
    lit: Vec<usize, MASK_PIXELS>,
    phase: RollPhase,
}

impl RollAnimation {
    pub fn new(face: u8, config: RollConfig) -> Self {
        let phase = if config.tumble_steps == 0 {
            RollPhase::Clear
        } else {
            RollPhase::Tumble(0)
        };
        Self {
            face,
            config,
            lit: lit_pixels(face),
            phase,
        }
    }

    pub const fn face(&self) -> u8 {
        self.face
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RollPhase::Done
    }

    /// Pattern that keeps showing the rolled face once the animation ends
    pub const fn final_pattern(&self) -> Pattern {
        Pattern::NumeralMask {
            face: self.face,
            background: self.config.background,
            foreground: self.config.foreground,
        }
    }
}

impl Animation for RollAnimation {
    fn advance(&mut self, leds: &mut [Rgb]) -> Option<Duration> {
        match self.phase {
            RollPhase::Tumble(step) => {
                leds.fill(BLACK);
                if !leds.is_empty() {
                    let head = usize::from(step) % leds.len();
                    leds[head] = self.config.tumble_color;
                }
                let next = step + 1;
                self.phase = if next >= self.config.tumble_steps {
                    RollPhase::Clear
                } else {
                    RollPhase::Tumble(next)
                };
                Some(self.config.tumble_delay)
            }
            RollPhase::Clear => {
                leds.fill(BLACK);
                self.phase = RollPhase::Background;
                Some(self.config.clear_delay)
            }
            RollPhase::Background => {
                leds.fill(self.config.background);
                self.phase = if self.lit.is_empty() {
                    RollPhase::Done
                } else {
                    RollPhase::Reveal(0)
                };
                Some(self.config.background_delay)
            }
            RollPhase::Reveal(revealed) => {
                if let Some(led) = self.lit.get(revealed).and_then(|&index| leds.get_mut(index)) {
                    *led = self.config.foreground;
                }
                let next = revealed + 1;
                self.phase = if next >= self.lit.len() {
                    RollPhase::Done
                } else {
                    RollPhase::Reveal(next)
                };
                Some(self.config.reveal_delay)
            }
            RollPhase::Done => None,
        }
    }
}
