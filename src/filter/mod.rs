use crate::color::Rgb;

mod brightness;
mod gamma;

pub use brightness::BrightnessFilter;
pub use gamma::GammaFilter;

pub(crate) trait Filter {
    /// Apply the filter to a frame
    fn apply(&self, frame: &mut [Rgb]);
}

/// Filter processor - applies output post-processing at flush time
///
/// Gamma runs before brightness so the curve sees full-range values.
#[derive(Debug, Clone)]
pub(crate) struct FilterProcessor {
    pub(crate) gamma: GammaFilter,
    pub(crate) brightness: BrightnessFilter,
}

impl FilterProcessor {
    pub(crate) const fn new(brightness: u8) -> Self {
        Self {
            gamma: GammaFilter::new(false),
            brightness: BrightnessFilter::new(brightness),
        }
    }

    pub(crate) fn apply(&self, frame: &mut [Rgb]) {
        self.gamma.apply(frame);
        self.brightness.apply(frame);
    }
}
