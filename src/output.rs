//! Adapter from [`OutputDriver`] to `smart-leds` strip drivers.

use smart_leds::{RGB8, SmartLedsWrite};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{OutputDriver, color::Rgb};

/// Drives any `smart-leds` compatible strip (WS2812, SK6812, APA102, ...)
///
/// Write errors are dropped: a missed frame is repainted on the next flush.
pub struct SmartLedsOutput<W> {
    writer: W,
    failed_writes: u32,
}

impl<W> SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            failed_writes: 0,
        }
    }

    /// Number of frames the strip driver rejected
    pub const fn failed_writes(&self) -> u32 {
        self.failed_writes
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn write(&mut self, colors: &[Rgb]) {
        if self.writer.write(colors.iter().copied()).is_err() {
            self.failed_writes = self.failed_writes.saturating_add(1);
            #[cfg(feature = "esp32-log")]
            println!("[SmartLedsOutput.write] strip rejected frame");
        }
    }
}
