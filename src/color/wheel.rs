use super::Rgb;

const SEGMENT: u8 = 85;

/// Three-segment piecewise-linear color wheel
///
/// Position 0 is pure red, 85 pure green and 170 pure blue; the wheel
/// blends linearly between neighbours and wraps back to red at 255.
#[allow(clippy::cast_possible_truncation)]
pub const fn wheel(position: u8) -> Rgb {
    if position < SEGMENT {
        let rising = position * 3;
        Rgb {
            r: 255 - rising,
            g: rising,
            b: 0,
        }
    } else if position < SEGMENT * 2 {
        let rising = (position - SEGMENT) * 3;
        Rgb {
            r: 0,
            g: 255 - rising,
            b: rising,
        }
    } else {
        let rising = (position - SEGMENT * 2) * 3;
        Rgb {
            r: rising,
            g: 0,
            b: 255 - rising,
        }
    }
}
