mod tests {
    use myrtio_ring_controller::math8::{scale8, spread8, unit_to_u8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_unit_to_u8() {
        assert_eq!(unit_to_u8(0.0), 0);
        assert_eq!(unit_to_u8(-0.5), 0);
        assert_eq!(unit_to_u8(f32::NAN), 0);
        assert_eq!(unit_to_u8(1.0), 255);
        assert_eq!(unit_to_u8(3.0), 255);
        assert_eq!(unit_to_u8(0.5), 128);
    }

    #[test]
    fn test_spread8() {
        assert_eq!(spread8(0, 12), 0);
        assert_eq!(spread8(3, 12), 64);
        assert_eq!(spread8(6, 12), 128);
        assert_eq!(spread8(12, 12), 0);
        assert_eq!(spread8(5, 0), 0);
    }
}
