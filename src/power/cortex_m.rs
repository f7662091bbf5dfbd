//! Cortex-M deep sleep
//!
//! SLEEPDEEP + WFI with interrupts masked: a pending wake interrupt still
//! ends WFI, and its (empty) handler only runs once the critical section is
//! left, after the core is fully awake again.

use ::cortex_m::asm;
use ::cortex_m::peripheral::SCB;

use super::PowerManager;

/// Chip-specific half of the sleep sequence
///
/// The wake interrupt handler wired to [`arm_wake_interrupt`] must do no
/// work; it only exists so the pending interrupt ends the halt.
///
/// [`arm_wake_interrupt`]: SleepHardware::arm_wake_interrupt
pub trait SleepHardware {
    /// Configure and unmask the button's pin-change interrupt
    fn arm_wake_interrupt(&mut self);

    /// Clear the pending flag and mask the pin-change interrupt
    fn disarm_wake_interrupt(&mut self);

    /// Power down ADC, comparators and other unused blocks
    fn disable_peripherals(&mut self);

    /// Power the blocks back up
    fn enable_peripherals(&mut self);
}

/// [`PowerManager`] for Cortex-M cores
pub struct CortexMPowerManager<H> {
    scb: SCB,
    hardware: H,
}

impl<H: SleepHardware> CortexMPowerManager<H> {
    pub const fn new(scb: SCB, hardware: H) -> Self {
        Self { scb, hardware }
    }

    pub fn release(self) -> (SCB, H) {
        (self.scb, self.hardware)
    }
}

impl<H: SleepHardware> PowerManager for CortexMPowerManager<H> {
    fn disable_non_essential_peripherals(&mut self) {
        self.hardware.disable_peripherals();
    }

    fn arm_wake_source(&mut self) {
        self.hardware.arm_wake_interrupt();
    }

    fn halt_until_wake(&mut self) {
        self.scb.set_sleepdeep();
        critical_section::with(|_| {
            asm::dsb();
            asm::wfi();
        });
        self.scb.clear_sleepdeep();
    }

    fn disarm_wake_source(&mut self) {
        self.hardware.disarm_wake_interrupt();
    }

    fn restore_peripherals(&mut self) {
        self.hardware.enable_peripherals();
    }
}
