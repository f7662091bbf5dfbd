//! Oscillating multi-spot blend
//!
//! Three virtual spots, one per color channel, sweep around the ring. Each
//! spot's position is the sum of a primary cosine oscillation and a slower,
//! phase-modulated cosine, so the motion never settles into an obvious loop.
//! A pixel's channel intensity is a Gaussian falloff of its shortest
//! circular distance to that channel's spot.

use embassy_time::Instant;
use libm::{cosf, expf, fabsf, floorf, sinf};

use super::PatternRenderer;
use crate::{color::Rgb, math8::unit_to_u8, rng::Rng};

/// One spot per RGB channel
pub const SPOT_COUNT: usize = 3;

const PRIMARY_AMPLITUDE: f32 = 0.5;
const PERTURBATION_AMPLITUDE: f32 = 0.25;
const PERTURBATION_RATIO: f32 = 0.31;
const MODULATION_RATIO: f32 = 0.17;
const MODULATION_DEPTH: f32 = 1.7;

/// Descriptor for [`MultiSpotOscillation`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotParameters {
    /// Shared phase offset on the unit ring
    pub phase_offset: f32,
    /// Angular speed per spot in radians per second
    pub speeds: [f32; SPOT_COUNT],
    /// Falloff width on the unit ring
    pub width: f32,
    /// Highest channel value a spot may produce
    pub ceiling: u8,
}

impl SpotParameters {
    /// Draw speeds from `speed_min..speed_max` and a shared random phase
    pub fn random(rng: &mut Rng, speed_min: f32, speed_max: f32, width: f32, ceiling: u8) -> Self {
        let phase_offset = rng.next_unit();
        let speeds = core::array::from_fn(|_| rng.next_range(speed_min, speed_max));
        Self {
            phase_offset,
            speeds,
            width,
            ceiling,
        }
    }
}

/// Fold any value onto the unit ring `[0, 1)`
pub fn wrap_unit(value: f32) -> f32 {
    let wrapped = value - floorf(value);
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Shortest distance between two points on the unit ring, never above 0.5
pub fn ring_distance(a: f32, b: f32) -> f32 {
    let direct = fabsf(wrap_unit(a) - wrap_unit(b));
    if direct > 0.5 { 1.0 - direct } else { direct }
}

/// Position of a spot on the unit ring after `seconds`
pub fn spot_position(seconds: f32, speed: f32, phase_offset: f32) -> f32 {
    let primary = PRIMARY_AMPLITUDE * cosf(speed * seconds);
    let modulation = MODULATION_DEPTH * sinf(speed * MODULATION_RATIO * seconds);
    let perturbation =
        PERTURBATION_AMPLITUDE * cosf(speed * PERTURBATION_RATIO * seconds + modulation);
    wrap_unit(phase_offset + primary + perturbation)
}

/// Gaussian-like falloff, 1.0 at the spot center
pub fn falloff(distance: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return if distance <= 0.0 { 1.0 } else { 0.0 };
    }
    expf(-(distance * distance) / (2.0 * width * width))
}

#[derive(Debug, Clone)]
pub struct MultiSpotOscillation {
    params: SpotParameters,
    started: Option<Instant>,
}

impl MultiSpotOscillation {
    pub const fn new(params: SpotParameters) -> Self {
        Self {
            params,
            started: None,
        }
    }

    /// Spot positions after `seconds` of elapsed time
    pub fn positions(&self, seconds: f32) -> [f32; SPOT_COUNT] {
        core::array::from_fn(|spot| {
            spot_position(seconds, self.params.speeds[spot], self.params.phase_offset)
        })
    }

    fn channel(&self, distance: f32) -> u8 {
        unit_to_u8(falloff(distance, self.params.width)).min(self.params.ceiling)
    }
}

impl PatternRenderer for MultiSpotOscillation {
    #[allow(clippy::cast_precision_loss)]
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }
        let started = *self.started.get_or_insert(now);
        let seconds = now.saturating_duration_since(started).as_micros() as f32 / 1_000_000.0;
        let [red, green, blue] = self.positions(seconds);

        let len = leds.len() as f32;
        for (index, led) in leds.iter_mut().enumerate() {
            let position = index as f32 / len;
            *led = Rgb {
                r: self.channel(ring_distance(position, red)),
                g: self.channel(ring_distance(position, green)),
                b: self.channel(ring_distance(position, blue)),
            };
        }
    }

    fn reset(&mut self) {
        self.started = None;
    }
}
