use embassy_time::Instant;
use embedded_hal::delay::DelayNs;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::animation::Animation;
use crate::buffer::PixelBuffer;
use crate::color::BLACK;
use crate::filter::FilterProcessor;
use crate::pattern::{Pattern, PatternSlot};

/// Render Engine - owns the pixel buffer and the strip
///
/// Every operation repaints the whole buffer; nothing reaches the strip
/// until [`flush`](Self::flush) is called.
pub struct RenderEngine<O: OutputDriver, const N: usize> {
    output: O,
    buffer: PixelBuffer<N>,
    slot: PatternSlot,
    filters: FilterProcessor,
}

impl<O: OutputDriver, const N: usize> RenderEngine<O, N> {
    /// Create an engine with a dark buffer at the given global brightness
    pub fn new(output: O, brightness: u8) -> Self {
        Self {
            output,
            buffer: PixelBuffer::new(),
            slot: PatternSlot::default(),
            filters: FilterProcessor::new(brightness),
        }
    }

    /// Select the pattern drawn by subsequent [`render`](Self::render) calls
    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.slot = pattern.to_slot();
        self.slot.reset();
        self.filters.gamma.set_enabled(self.slot.gamma_corrected());
    }

    /// Select `pattern` and draw its first frame into the buffer
    pub fn apply_pattern(&mut self, pattern: Pattern, now: Instant) -> &PixelBuffer<N> {
        self.set_pattern(pattern);
        self.render(now)
    }

    /// Draw one frame of the current pattern into the buffer
    pub fn render(&mut self, now: Instant) -> &PixelBuffer<N> {
        self.slot.render(now, &mut self.buffer);
        &self.buffer
    }

    /// Push the buffer to the strip through the output filters
    pub fn flush(&mut self) {
        let mut frame = *self.buffer.as_array();
        self.filters.apply(&mut frame);
        self.output.write(&frame);
    }

    /// Switch to an all-off pattern and flush it
    pub fn blank(&mut self) {
        self.set_pattern(Pattern::SolidFill(BLACK));
        self.buffer.clear();
        self.flush();
    }

    /// Run an animation to completion, blocking for each step's delay
    ///
    /// Returns the number of steps shown.
    pub fn play<A: Animation, D: DelayNs>(&mut self, animation: &mut A, delay: &mut D) -> usize {
        // animation frames are drawn flat, without the pattern's gamma curve
        self.filters.gamma.set_enabled(false);
        let mut steps = 0;
        while let Some(hold) = animation.advance(&mut self.buffer) {
            self.flush();
            steps += 1;
            let hold_ms = u32::try_from(hold.as_millis()).unwrap_or(u32::MAX);
            if hold_ms > 0 {
                delay.delay_ms(hold_ms);
            }
        }
        self.filters.gamma.set_enabled(self.slot.gamma_corrected());
        #[cfg(feature = "esp32-log")]
        println!("[RenderEngine.play] animation finished after {} steps", steps);
        steps
    }

    /// Set the global brightness applied at flush time
    pub fn set_brightness(&mut self, brightness: u8) {
        self.filters.brightness.set(brightness);
    }

    pub const fn brightness(&self) -> u8 {
        self.filters.brightness.current()
    }

    pub const fn buffer(&self) -> &PixelBuffer<N> {
        &self.buffer
    }

    pub const fn slot(&self) -> &PatternSlot {
        &self.slot
    }

    /// Get a reference to the output driver
    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output driver
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
