use super::Filter;
use crate::{color::Rgb, gamma::apply_gamma};

#[derive(Debug, Clone)]
pub struct GammaFilter {
    enabled: bool,
}

impl GammaFilter {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Filter for GammaFilter {
    fn apply(&self, frame: &mut [Rgb]) {
        if self.enabled {
            apply_gamma(frame);
        }
    }
}
