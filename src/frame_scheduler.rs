//! Main loop pacing.
//!
//! Runs one [`DeviceController::step`] per tick and tells the caller how
//! long to wait before the next one. Waiting itself is left to the platform.

use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::OutputDriver;
use crate::controller::{DeviceController, StepReport};
use crate::power::PowerManager;
use crate::store::ByteStore;

/// Loop iterations per second.
pub const DEFAULT_FPS: u32 = 100;

pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    pub report: StepReport,
    /// When the next iteration is due
    pub next_deadline: Instant,
    /// Time left until `next_deadline`, zero when running late
    pub sleep_duration: Duration,
}

/// Fixed-rate driver for a [`DeviceController`]
///
/// A deep sleep or a roll animation stalls the loop far beyond one frame.
/// Once the loop lags more than two frames the schedule restarts from the
/// current time and missed iterations are dropped.
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(controller);
/// loop {
///     let frame = scheduler.tick(Instant::now());
///     delay.delay_ms(frame.sleep_duration.as_millis() as u32);
/// }
/// ```
pub struct FrameScheduler<O, B, S, P, D, const N: usize>
where
    O: OutputDriver,
    B: InputPin,
    S: ByteStore,
    P: PowerManager,
    D: DelayNs,
{
    controller: DeviceController<O, B, S, P, D, N>,
    next_frame: Option<Instant>,
    frame_duration: Duration,
}

impl<O, B, S, P, D, const N: usize> FrameScheduler<O, B, S, P, D, N>
where
    O: OutputDriver,
    B: InputPin,
    S: ByteStore,
    P: PowerManager,
    D: DelayNs,
{
    /// Scheduler running at [`DEFAULT_FPS`]
    pub fn new(controller: DeviceController<O, B, S, P, D, N>) -> Self {
        Self::with_frame_duration(controller, DEFAULT_FRAME_DURATION)
    }

    pub fn with_frame_duration(
        controller: DeviceController<O, B, S, P, D, N>,
        frame_duration: Duration,
    ) -> Self {
        Self {
            controller,
            next_frame: None,
            frame_duration,
        }
    }

    /// Run one controller iteration at `now`
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_lag = self.frame_duration * 2;
        let scheduled = match self.next_frame {
            Some(next) if now <= next + max_lag => next,
            _ => now,
        };

        let report = self.controller.step(now);

        let mut next_deadline = scheduled + self.frame_duration;
        if report.slept {
            // the halt lasted an unknown time; restart the schedule
            next_deadline = now + self.frame_duration;
        }
        self.next_frame = Some(next_deadline);

        FrameResult {
            report,
            next_deadline,
            sleep_duration: next_deadline.saturating_duration_since(now),
        }
    }

    pub const fn controller(&self) -> &DeviceController<O, B, S, P, D, N> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut DeviceController<O, B, S, P, D, N> {
        &mut self.controller
    }
}
