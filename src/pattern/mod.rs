//! Pattern system with compile-time known pattern variants
//!
//! [`Pattern`] is a plain descriptor; [`PatternSlot`] holds the per-pattern
//! animation state and is what the render engine drives every frame.
//! All slots live in an enum to avoid heap allocations.

mod color_wheel;
mod numeral;
mod solid;
mod spots;

use embassy_time::Instant;

pub use color_wheel::ColorWheelCycle;
pub use numeral::{MASK_PIXELS, MAX_FACE, NumeralMask, lit_pixels, numeral_mask};
pub use solid::SolidFill;
pub use spots::{
    MultiSpotOscillation, SPOT_COUNT, SpotParameters, falloff, ring_distance, spot_position,
    wrap_unit,
};

use crate::color::Rgb;

const MODE_NAME_COLOR_WHEEL: &str = "color_wheel";
const MODE_NAME_SPOTS: &str = "spots";
const MODE_NAME_SOLID: &str = "solid";

const MODE_ID_COLOR_WHEEL: u8 = 0;
const MODE_ID_SPOTS: u8 = 1;
const MODE_ID_SOLID: u8 = 2;

pub trait PatternRenderer {
    /// Sets if the pattern should be gamma corrected before output
    ///
    /// Only smooth gradients benefit; flat fills would just get darker.
    const GAMMA_CORRECTED: bool = false;

    /// Render a single frame
    fn render(&mut self, now: Instant, leds: &mut [Rgb]);

    /// Reset pattern state
    fn reset(&mut self) {}
}

/// Stateless pattern descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    /// Every pixel one color
    SolidFill(Rgb),
    /// Dice face `face` in `foreground` over `background`
    NumeralMask {
        face: u8,
        background: Rgb,
        foreground: Rgb,
    },
    /// Rainbow advancing `speed` hue steps per frame
    ColorWheelCycle { speed: u8 },
    /// Three channel spots oscillating around the ring
    MultiSpotOscillation(SpotParameters),
}

impl Pattern {
    pub fn to_slot(self) -> PatternSlot {
        match self {
            Self::SolidFill(color) => PatternSlot::Solid(SolidFill::new(color)),
            Self::NumeralMask {
                face,
                background,
                foreground,
            } => PatternSlot::Numeral(NumeralMask::new(face, background, foreground)),
            Self::ColorWheelCycle { speed } => {
                PatternSlot::ColorWheel(ColorWheelCycle::new(speed))
            }
            Self::MultiSpotOscillation(params) => {
                PatternSlot::Spots(MultiSpotOscillation::new(params))
            }
        }
    }
}

/// Pattern slot - enum containing all possible pattern renderers
#[derive(Debug, Clone)]
pub enum PatternSlot {
    Solid(SolidFill),
    Numeral(NumeralMask),
    ColorWheel(ColorWheelCycle),
    Spots(MultiSpotOscillation),
}

impl Default for PatternSlot {
    fn default() -> Self {
        Self::Solid(SolidFill::new(crate::color::BLACK))
    }
}

impl PatternSlot {
    /// Returns if the pattern wants gamma correction at flush time
    ///
    /// Derived from each pattern's `PatternRenderer::GAMMA_CORRECTED` constant.
    pub fn gamma_corrected(&self) -> bool {
        match self {
            Self::Solid(_) => SolidFill::GAMMA_CORRECTED,
            Self::Numeral(_) => NumeralMask::GAMMA_CORRECTED,
            Self::ColorWheel(_) => ColorWheelCycle::GAMMA_CORRECTED,
            Self::Spots(_) => MultiSpotOscillation::GAMMA_CORRECTED,
        }
    }

    /// Render the current pattern
    pub fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        match self {
            Self::Solid(pattern) => pattern.render(now, leds),
            Self::Numeral(pattern) => pattern.render(now, leds),
            Self::ColorWheel(pattern) => pattern.render(now, leds),
            Self::Spots(pattern) => pattern.render(now, leds),
        }
    }

    /// Reset the pattern state
    pub fn reset(&mut self) {
        match self {
            Self::Solid(pattern) => PatternRenderer::reset(pattern),
            Self::Numeral(pattern) => PatternRenderer::reset(pattern),
            Self::ColorWheel(pattern) => PatternRenderer::reset(pattern),
            Self::Spots(pattern) => PatternRenderer::reset(pattern),
        }
    }
}

/// Persisted ambient pattern selector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    ColorWheel = MODE_ID_COLOR_WHEEL,
    Spots = MODE_ID_SPOTS,
    Solid = MODE_ID_SOLID,
}

impl Mode {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_COLOR_WHEEL => Self::ColorWheel,
            MODE_ID_SPOTS => Self::Spots,
            MODE_ID_SOLID => Self::Solid,
            _ => return None,
        })
    }

    pub const fn to_raw(self) -> u8 {
        self as u8
    }

    /// The mode selected by the next long click
    pub const fn next(self) -> Self {
        match self {
            Self::ColorWheel => Self::Spots,
            Self::Spots => Self::Solid,
            Self::Solid => Self::ColorWheel,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ColorWheel => MODE_NAME_COLOR_WHEEL,
            Self::Spots => MODE_NAME_SPOTS,
            Self::Solid => MODE_NAME_SOLID,
        }
    }
}
