//! 8-bit fixed-point helpers shared by patterns and filters.

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Map a unit interval value (0.0-1.0) onto 0-255, clamping out-of-range input
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit_to_u8(value: f32) -> u8 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    if value >= 1.0 {
        return 255;
    }
    (value * 255.0 + 0.5) as u8
}

/// Evenly spaced offset (0-255 circle) of `index` among `count` items
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn spread8(index: usize, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    ((index % count) * 256 / count) as u8
}
