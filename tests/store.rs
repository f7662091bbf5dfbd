mod tests {
    use myrtio_ring_controller::store::{BRIGHTNESS_ADDRESS, ERASED, MODE_ADDRESS};
    use myrtio_ring_controller::{
        ByteStore, DeviceSettings, Mode, RamStore, SettingsLimits, SettingsStore,
    };

    const LIMITS: SettingsLimits = SettingsLimits::DEFAULT;

    #[test]
    fn test_erased_store_loads_defaults() {
        let mut store = SettingsStore::new(RamStore::<8>::new(), LIMITS);
        let settings = store.load();
        assert_eq!(
            settings,
            DeviceSettings {
                brightness: 20,
                mode: Mode::ColorWheel,
            }
        );
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_loads_stored_values() {
        let mut store = SettingsStore::new(RamStore::with_bytes([45, 2, 0, 0]), LIMITS);
        assert_eq!(
            store.load(),
            DeviceSettings {
                brightness: 45,
                mode: Mode::Solid,
            }
        );
    }

    #[test]
    fn test_out_of_range_bytes_fall_back() {
        for brightness in [0, 4, 61, 200, ERASED] {
            let mut store = SettingsStore::new(RamStore::with_bytes([brightness, 1]), LIMITS);
            let settings = store.load();
            assert_eq!(settings.brightness, 20, "byte {brightness}");
            assert_eq!(settings.mode, Mode::Spots);
        }

        let mut store = SettingsStore::new(RamStore::with_bytes([30, 7]), LIMITS);
        let settings = store.load();
        assert_eq!(settings.brightness, 30);
        assert_eq!(settings.mode, Mode::ColorWheel);
    }

    #[test]
    fn test_short_store_reads_erased() {
        let mut storage = RamStore::<1>::with_bytes([25]);
        assert_eq!(storage.load(MODE_ADDRESS), ERASED);
        storage.store(MODE_ADDRESS, 1);
        assert_eq!(storage.bytes(), &[25]);

        let mut store = SettingsStore::new(storage, LIMITS);
        assert_eq!(store.load().mode, Mode::ColorWheel);
    }

    #[test]
    fn test_writes_only_changes() {
        let mut store = SettingsStore::new(RamStore::<4>::new(), LIMITS);
        assert!(store.save_brightness(25));
        assert!(!store.save_brightness(25));
        assert!(store.save_mode(Mode::Spots));
        assert!(!store.save_mode(Mode::Spots));
        assert!(store.save_brightness(30));
        assert_eq!(store.storage().writes(), 3);

        assert_eq!(store.storage_mut().load(BRIGHTNESS_ADDRESS), 30);
        assert_eq!(
            store.load(),
            DeviceSettings {
                brightness: 30,
                mode: Mode::Spots,
            }
        );
    }

    #[test]
    fn test_next_brightness_wraps() {
        let step = |brightness| DeviceSettings {
            brightness,
            mode: Mode::Solid,
        }
        .next_brightness(&LIMITS);

        assert_eq!(step(5), 10);
        assert_eq!(step(20), 25);
        assert_eq!(step(55), 60);
        assert_eq!(step(60), 5);
        assert_eq!(step(58), 5);
        assert_eq!(step(255), 5);
    }

    #[test]
    fn test_brightness_cycle_covers_range() {
        let mut settings = LIMITS.defaults();
        let mut seen = Vec::new();
        for _ in 0..12 {
            settings.brightness = settings.next_brightness(&LIMITS);
            assert!(LIMITS.brightness_in_range(settings.brightness));
            seen.push(settings.brightness);
        }
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 12);
    }
}
