//! Power state machine
//!
//! `Active -> Idle -> Asleep`, and `Asleep -> Active` only through the wake
//! interrupt. The idle counter counts loop iterations, not wall time.
//!
//! The halt itself goes through the [`PowerManager`] capability so the state
//! logic runs unchanged on the host with a fake manager.

#[cfg(feature = "cortex-m")]
pub mod cortex_m;

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Iterations without input after which the rolled face gives way to the
/// ambient pattern.
pub const DEFAULT_ACTIVE_WINDOW: u32 = 1_500;

/// Iterations without input after which the device sleeps.
pub const DEFAULT_IDLE_TIMEOUT: u32 = 6_000;

/// Sleep capability of the platform
///
/// Implementations must not call back into the render engine or the
/// settings store: the wake interrupt runs outside normal execution context.
pub trait PowerManager {
    /// Gate off everything that is not needed to wake (ADC, comparators, ...)
    fn disable_non_essential_peripherals(&mut self);

    /// Enable the button's pin-change interrupt as the only wake source
    fn arm_wake_source(&mut self);

    /// Halt in the lowest power mode until the wake source fires
    fn halt_until_wake(&mut self);

    /// Clear and disable the wake interrupt after waking
    fn disarm_wake_source(&mut self);

    /// Undo [`disable_non_essential_peripherals`](Self::disable_non_essential_peripherals)
    fn restore_peripherals(&mut self);
}

/// Power state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Recent input or a user-triggered animation
    Active,
    /// Rendering the ambient pattern
    Idle,
    /// Halted until the wake interrupt
    Asleep,
}

/// Power timing configuration, in loop iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerConfig {
    pub active_window: u32,
    pub idle_timeout: u32,
}

impl PowerConfig {
    pub const DEFAULT: Self = Self {
        active_window: DEFAULT_ACTIVE_WINDOW,
        idle_timeout: DEFAULT_IDLE_TIMEOUT,
    };
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Outcome of advancing the idle counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerTransition {
    None,
    /// `Active -> Idle` happened on this iteration
    EnteredIdle,
    /// The idle timeout elapsed; the caller must blank the ring and call
    /// [`PowerStateMachine::sleep`]
    SleepDue,
}

/// Power State Machine
#[derive(Debug, Clone)]
pub struct PowerStateMachine {
    config: PowerConfig,
    state: PowerState,
    idle_iterations: u32,
}

impl PowerStateMachine {
    pub const fn new(config: PowerConfig) -> Self {
        Self {
            config,
            state: PowerState::Active,
            idle_iterations: 0,
        }
    }

    pub const fn state(&self) -> PowerState {
        self.state
    }

    pub const fn idle_iterations(&self) -> u32 {
        self.idle_iterations
    }

    pub const fn config(&self) -> &PowerConfig {
        &self.config
    }

    /// Any gesture resets the idle counter and makes the device active
    pub fn on_gesture(&mut self) {
        self.idle_iterations = 0;
        self.state = PowerState::Active;
    }

    /// Advance the idle counter by one loop iteration without a gesture
    pub fn tick(&mut self) -> PowerTransition {
        if self.state == PowerState::Asleep {
            return PowerTransition::None;
        }
        self.idle_iterations = self.idle_iterations.saturating_add(1);

        if self.idle_iterations >= self.config.idle_timeout {
            return PowerTransition::SleepDue;
        }
        if self.state == PowerState::Active && self.idle_iterations >= self.config.active_window {
            self.state = PowerState::Idle;
            #[cfg(feature = "esp32-log")]
            println!("[PowerStateMachine.tick] active -> idle");
            return PowerTransition::EnteredIdle;
        }
        PowerTransition::None
    }

    /// Run the full sleep cycle and return once woken
    ///
    /// The ring must already be blanked. Peripherals are gated and the wake
    /// source armed before halting; afterwards the wake source is cleared,
    /// peripherals restored and the device is `Active` with a zero idle
    /// counter.
    pub fn sleep<P: PowerManager>(&mut self, manager: &mut P) {
        #[cfg(feature = "esp32-log")]
        println!(
            "[PowerStateMachine.sleep] halting after {} idle iterations",
            self.idle_iterations
        );
        self.state = PowerState::Asleep;

        manager.disable_non_essential_peripherals();
        manager.arm_wake_source();
        manager.halt_until_wake();
        manager.disarm_wake_source();
        manager.restore_peripherals();

        self.idle_iterations = 0;
        self.state = PowerState::Active;
        #[cfg(feature = "esp32-log")]
        println!("[PowerStateMachine.sleep] woke up");
    }
}

impl Default for PowerStateMachine {
    fn default() -> Self {
        Self::new(PowerConfig::DEFAULT)
    }
}
