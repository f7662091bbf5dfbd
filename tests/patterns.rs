mod tests {
    use myrtio_ring_controller::color::{BLACK, wheel};
    use myrtio_ring_controller::pattern::{
        ColorWheelCycle, MAX_FACE, MultiSpotOscillation, NumeralMask, PatternRenderer,
        SolidFill, falloff, lit_pixels, numeral_mask, ring_distance, spot_position, wrap_unit,
    };
    use myrtio_ring_controller::{Instant, Mode, Pattern, PixelBuffer, Rgb, SpotParameters};

    const BACKGROUND: Rgb = Rgb { r: 0, g: 0, b: 40 };
    const FOREGROUND: Rgb = Rgb { r: 200, g: 100, b: 0 };

    fn near(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_numeral_mask_lights_face_count() {
        for face in 1..=MAX_FACE {
            let mask = numeral_mask(face).unwrap();
            assert_eq!(mask.count_ones(), u32::from(face), "face {face}");
            assert!(mask < 1 << 12);
            assert_eq!(lit_pixels(face).len(), usize::from(face));
        }
        assert_eq!(numeral_mask(0), None);
        assert_eq!(numeral_mask(MAX_FACE + 1), None);
        assert!(lit_pixels(0).is_empty());
    }

    #[test]
    fn test_numeral_mask_render() {
        let mut buffer = PixelBuffer::<12>::new();
        let mut pattern = NumeralMask::new(3, BACKGROUND, FOREGROUND);
        pattern.render(Instant::from_millis(0), &mut buffer);

        for (index, led) in buffer.iter().enumerate() {
            let expected = if matches!(index, 0 | 4 | 8) {
                FOREGROUND
            } else {
                BACKGROUND
            };
            assert_eq!(*led, expected, "pixel {index}");
        }
    }

    #[test]
    fn test_numeral_mask_is_idempotent() {
        let mut pattern = NumeralMask::new(5, BACKGROUND, FOREGROUND);
        let mut first = PixelBuffer::<12>::new();
        pattern.render(Instant::from_millis(0), &mut first);

        // stale content must not leak through
        let mut second = PixelBuffer::<12>::new();
        second.fill(Rgb { r: 9, g: 9, b: 9 });
        pattern.render(Instant::from_millis(500), &mut second);
        pattern.render(Instant::from_millis(900), &mut second);

        assert_eq!(first.as_array(), second.as_array());
    }

    #[test]
    fn test_numeral_mask_longer_ring() {
        let mut buffer = PixelBuffer::<16>::new();
        let mut pattern = NumeralMask::new(12, BACKGROUND, FOREGROUND);
        pattern.render(Instant::from_millis(0), &mut buffer);
        assert!(buffer[..12].iter().all(|led| *led == FOREGROUND));
        assert!(buffer[12..].iter().all(|led| *led == BACKGROUND));
    }

    #[test]
    fn test_solid_fill() {
        let color = Rgb { r: 1, g: 2, b: 3 };
        let mut buffer = PixelBuffer::<12>::new();
        SolidFill::new(color).render(Instant::from_millis(0), &mut buffer);
        assert!(buffer.iter().all(|led| *led == color));
    }

    #[test]
    fn test_color_wheel_cycle_advances() {
        let mut pattern = ColorWheelCycle::new(4);
        let mut buffer = PixelBuffer::<12>::new();

        pattern.render(Instant::from_millis(0), &mut buffer);
        assert_eq!(buffer[0], wheel(0));
        assert_eq!(buffer[3], wheel(64));
        assert_eq!(buffer[6], wheel(128));

        pattern.render(Instant::from_millis(10), &mut buffer);
        assert_eq!(buffer[0], wheel(4));
        assert_eq!(pattern.base_hue(), 8);

        pattern.reset();
        assert_eq!(pattern.base_hue(), 0);
    }

    #[test]
    fn test_ring_distance() {
        let points = [-1.3, -0.5, -0.01, 0.0, 0.05, 0.25, 0.5, 0.75, 0.95, 1.0, 2.6];
        for &a in &points {
            for &b in &points {
                let distance = ring_distance(a, b);
                assert!((0.0..=0.5).contains(&distance), "{a} {b} -> {distance}");
                assert!(near(distance, ring_distance(b, a)));
            }
        }
        assert!(near(ring_distance(0.05, 0.95), 0.1));
        assert!(near(ring_distance(0.0, 0.5), 0.5));
        assert!(near(ring_distance(0.2, 1.2), 0.0));
    }

    #[test]
    fn test_wrap_unit() {
        assert!(near(wrap_unit(1.25), 0.25));
        assert!(near(wrap_unit(-0.25), 0.75));
        assert!(near(wrap_unit(0.0), 0.0));
        for step in -100..100 {
            let value = wrap_unit(step as f32 * 0.37);
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_spot_position_stays_on_ring() {
        for step in 0..500 {
            let seconds = step as f32 * 0.5;
            let position = spot_position(seconds, 0.45, 0.3);
            assert!((0.0..1.0).contains(&position));
        }
    }

    #[test]
    fn test_falloff() {
        assert!(near(falloff(0.0, 0.08), 1.0));
        assert!(falloff(0.04, 0.08) > falloff(0.08, 0.08));
        assert!(falloff(0.5, 0.08) < 0.01);
        assert!(near(falloff(0.0, 0.0), 1.0));
        assert!(near(falloff(0.1, 0.0), 0.0));
    }

    #[test]
    fn test_spots_respect_ceiling() {
        let params = SpotParameters {
            phase_offset: 0.0,
            speeds: [0.3, 0.45, 0.6],
            width: 0.2,
            ceiling: 40,
        };
        let mut pattern = MultiSpotOscillation::new(params);
        let mut buffer = PixelBuffer::<12>::new();
        for step in 0..200 {
            pattern.render(Instant::from_millis(step * 250), &mut buffer);
            for led in buffer.iter() {
                assert!(led.r <= 40 && led.g <= 40 && led.b <= 40);
            }
        }
    }

    #[test]
    fn test_spots_peak_at_ceiling() {
        // all spots share position 0 at t = 0 and pixel 0 sits on it
        let params = SpotParameters {
            phase_offset: 0.25,
            speeds: [0.0; 3],
            width: 0.1,
            ceiling: 255,
        };
        let mut pattern = MultiSpotOscillation::new(params);
        let positions = pattern.positions(0.0);
        assert!(near(positions[0], positions[1]));

        let mut buffer = PixelBuffer::<12>::new();
        pattern.render(Instant::from_millis(0), &mut buffer);
        let brightest = buffer.iter().map(|led| led.r).max().unwrap();
        assert!(brightest > 200);
    }

    #[test]
    fn test_spots_are_deterministic() {
        let params = SpotParameters {
            phase_offset: 0.6,
            speeds: [0.2, 0.35, 0.5],
            width: 0.08,
            ceiling: 255,
        };
        let mut a = MultiSpotOscillation::new(params);
        let mut b = MultiSpotOscillation::new(params);
        let mut first = PixelBuffer::<12>::new();
        let mut second = PixelBuffer::<12>::new();
        a.render(Instant::from_millis(1_000), &mut first);
        b.render(Instant::from_millis(1_000), &mut second);
        a.render(Instant::from_millis(4_000), &mut first);
        b.render(Instant::from_millis(4_000), &mut second);
        assert_eq!(first.as_array(), second.as_array());
    }

    #[test]
    fn test_pattern_slot_gamma() {
        assert!(Pattern::ColorWheelCycle { speed: 1 }.to_slot().gamma_corrected());
        assert!(!Pattern::SolidFill(BLACK).to_slot().gamma_corrected());
        let numeral = Pattern::NumeralMask {
            face: 2,
            background: BACKGROUND,
            foreground: FOREGROUND,
        };
        assert!(!numeral.to_slot().gamma_corrected());
    }

    #[test]
    fn test_mode_codes() {
        for mode in [Mode::ColorWheel, Mode::Spots, Mode::Solid] {
            assert_eq!(Mode::from_raw(mode.to_raw()), Some(mode));
        }
        assert_eq!(Mode::from_raw(3), None);
        assert_eq!(Mode::from_raw(0xFF), None);
        assert_eq!(Mode::Spots.as_str(), "spots");
        assert_eq!(Mode::ColorWheel.next(), Mode::Spots);
        assert_eq!(Mode::Spots.next(), Mode::Solid);
        assert_eq!(Mode::Solid.next(), Mode::ColorWheel);
    }
}
