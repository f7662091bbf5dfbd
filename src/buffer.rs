//! Fixed-length pixel storage for the ring.

use core::ops::{Deref, DerefMut};

use crate::color::{BLACK, Rgb};

/// Ordered pixel storage for a ring of `N` LEDs
///
/// Index `0..N` maps onto the physical ring position in wiring order. The
/// length is part of the type, so the buffer can never be resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBuffer<const N: usize> {
    pixels: [Rgb; N],
}

impl<const N: usize> Default for PixelBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PixelBuffer<N> {
    /// Create a buffer with every pixel off
    pub const fn new() -> Self {
        Self { pixels: [BLACK; N] }
    }

    /// Set every pixel to one color
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.fill(BLACK);
    }

    /// Returns true if every pixel is off
    pub fn is_dark(&self) -> bool {
        self.pixels.iter().all(|pixel| *pixel == BLACK)
    }

    pub const fn as_array(&self) -> &[Rgb; N] {
        &self.pixels
    }
}

impl<const N: usize> Deref for PixelBuffer<N> {
    type Target = [Rgb];

    fn deref(&self) -> &Self::Target {
        &self.pixels
    }
}

impl<const N: usize> DerefMut for PixelBuffer<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.pixels
    }
}
