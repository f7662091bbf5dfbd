//! Persisted device settings
//!
//! Two bytes at fixed addresses of a byte-addressed non-volatile store
//! (EEPROM or an emulation of it). The medium has bounded write endurance,
//! so a byte is written only when a confirmed user change makes it differ
//! from what is already stored.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::pattern::Mode;

/// Address of the brightness byte
pub const BRIGHTNESS_ADDRESS: u16 = 0;

/// Address of the mode byte
pub const MODE_ADDRESS: u16 = 1;

/// Value of a never-written EEPROM cell
pub const ERASED: u8 = 0xFF;

/// Byte-addressed non-volatile storage
pub trait ByteStore {
    /// Read the byte at `address`
    fn load(&mut self, address: u16) -> u8;

    /// Write `value` at `address`
    fn store(&mut self, address: u16, value: u8);
}

/// Volatile [`ByteStore`] starting out erased, for simulation and tests
#[derive(Debug, Clone)]
pub struct RamStore<const N: usize> {
    bytes: [u8; N],
    writes: u32,
}

impl<const N: usize> RamStore<N> {
    pub const fn new() -> Self {
        Self {
            bytes: [ERASED; N],
            writes: 0,
        }
    }

    pub const fn with_bytes(bytes: [u8; N]) -> Self {
        Self { bytes, writes: 0 }
    }

    /// Number of `store` calls so far
    pub const fn writes(&self) -> u32 {
        self.writes
    }

    pub const fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }
}

impl<const N: usize> Default for RamStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ByteStore for RamStore<N> {
    fn load(&mut self, address: u16) -> u8 {
        self.bytes
            .get(usize::from(address))
            .copied()
            .unwrap_or(ERASED)
    }

    fn store(&mut self, address: u16, value: u8) {
        self.writes = self.writes.saturating_add(1);
        if let Some(byte) = self.bytes.get_mut(usize::from(address)) {
            *byte = value;
        }
    }
}

/// Valid range, step and defaults of the settings record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsLimits {
    pub min_brightness: u8,
    pub max_brightness: u8,
    pub brightness_step: u8,
    pub default_brightness: u8,
    pub default_mode: Mode,
}

impl SettingsLimits {
    pub const DEFAULT: Self = Self {
        min_brightness: 5,
        max_brightness: 60,
        brightness_step: 5,
        default_brightness: 20,
        default_mode: Mode::ColorWheel,
    };

    pub const fn defaults(&self) -> DeviceSettings {
        DeviceSettings {
            brightness: self.default_brightness,
            mode: self.default_mode,
        }
    }

    pub const fn brightness_in_range(&self, brightness: u8) -> bool {
        brightness >= self.min_brightness && brightness <= self.max_brightness
    }
}

impl Default for SettingsLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// User settings that survive power loss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceSettings {
    pub brightness: u8,
    pub mode: Mode,
}

impl DeviceSettings {
    /// Brightness one step up, wrapping past the ceiling back to the floor
    pub const fn next_brightness(&self, limits: &SettingsLimits) -> u8 {
        match self.brightness.checked_add(limits.brightness_step) {
            Some(next) if next <= limits.max_brightness => next,
            _ => limits.min_brightness,
        }
    }
}

/// Reads and writes [`DeviceSettings`] on a [`ByteStore`]
pub struct SettingsStore<S: ByteStore> {
    storage: S,
    limits: SettingsLimits,
}

impl<S: ByteStore> SettingsStore<S> {
    pub const fn new(storage: S, limits: SettingsLimits) -> Self {
        Self { storage, limits }
    }

    pub const fn limits(&self) -> &SettingsLimits {
        &self.limits
    }

    /// Load the settings record
    ///
    /// A byte outside its field's valid domain means the field was never
    /// written, and the compiled-in default is used instead.
    pub fn load(&mut self) -> DeviceSettings {
        let defaults = self.limits.defaults();

        let raw_brightness = self.storage.load(BRIGHTNESS_ADDRESS);
        let brightness = if self.limits.brightness_in_range(raw_brightness) {
            raw_brightness
        } else {
            #[cfg(feature = "esp32-log")]
            println!(
                "[SettingsStore.load] brightness byte {} uninitialized, using default",
                raw_brightness
            );
            defaults.brightness
        };

        let raw_mode = self.storage.load(MODE_ADDRESS);
        let mode = Mode::from_raw(raw_mode).unwrap_or_else(|| {
            #[cfg(feature = "esp32-log")]
            println!(
                "[SettingsStore.load] mode byte {} uninitialized, using default",
                raw_mode
            );
            defaults.mode
        });

        DeviceSettings { brightness, mode }
    }

    /// Persist a confirmed brightness change
    ///
    /// Returns true if the byte had to be written.
    pub fn save_brightness(&mut self, brightness: u8) -> bool {
        self.update(BRIGHTNESS_ADDRESS, brightness)
    }

    /// Persist a confirmed mode change
    ///
    /// Returns true if the byte had to be written.
    pub fn save_mode(&mut self, mode: Mode) -> bool {
        self.update(MODE_ADDRESS, mode.to_raw())
    }

    fn update(&mut self, address: u16, value: u8) -> bool {
        if self.storage.load(address) == value {
            return false;
        }
        self.storage.store(address, value);
        true
    }

    /// Get a reference to the underlying storage
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Get a mutable reference to the underlying storage
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
