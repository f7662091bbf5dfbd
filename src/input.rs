//! Button gesture classification
//!
//! Turns a polled "pressed" level into discrete gestures. Sampling happens in
//! two layers:
//!
//! | Layer       | Input              | Output                         |
//! |-------------|--------------------|--------------------------------|
//! | Debouncer   | raw level + time   | stable press / release edges   |
//! | Gesture FSM | edges + time       | `Click`, `DoubleClick`, `LongClick` |
//!
//! A press shorter than the long-press threshold opens a double-click window
//! on release. A second press inside the window yields `DoubleClick` as soon
//! as it lands; an empty window yields `Click`. A press held past the
//! threshold yields `LongClick` immediately and nothing else for that press.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Debounce window for level changes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(30);

/// Maximum gap between release and the next press for a double click.
pub const DEFAULT_DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// Hold time after which a press becomes a long click.
pub const DEFAULT_LONG_PRESS: Duration = Duration::from_millis(800);

/// How long after waking a press is still treated as the wake trigger.
pub const DEFAULT_WAKE_GUARD: Duration = Duration::from_millis(800);

/// Classifier timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub debounce: Duration,
    pub double_click_window: Duration,
    pub long_press: Duration,
    pub wake_guard: Duration,
}

impl ClassifierConfig {
    pub const DEFAULT: Self = Self {
        debounce: DEFAULT_DEBOUNCE,
        double_click_window: DEFAULT_DOUBLE_CLICK_WINDOW,
        long_press: DEFAULT_LONG_PRESS,
        wake_guard: DEFAULT_WAKE_GUARD,
    };
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Kind of a recognized gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    Click,
    DoubleClick,
    LongClick,
}

/// A gesture and the moment it was recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureEvent {
    pub gesture: Gesture,
    pub at: Instant,
}

impl GestureEvent {
    const fn new(gesture: Gesture, at: Instant) -> Self {
        Self { gesture, at }
    }
}

/// Gesture state machine position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Released, nothing pending
    Idle,
    /// A level change is waiting to prove stable
    Debouncing(Instant),
    /// Short press released at the given time, waiting for a second press
    AwaitingDoubleClick(Instant),
    /// Pressed since the given time, not yet classified
    Held(Instant),
    /// Press already consumed (long click, double click, wake trigger);
    /// waiting for release
    Consumed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Pressed(Instant),
    Released(Instant),
}

/// Accepts a level only after it held steady for the debounce window
#[derive(Debug, Clone)]
struct Debouncer {
    stable: bool,
    candidate_since: Option<Instant>,
}

impl Debouncer {
    const fn new() -> Self {
        Self {
            stable: false,
            candidate_since: None,
        }
    }

    /// Feed a raw sample, returns an edge stamped with when the change began
    fn update(&mut self, pressed: bool, now: Instant, debounce: Duration) -> Option<Edge> {
        if pressed == self.stable {
            self.candidate_since = None;
            return None;
        }
        let since = *self.candidate_since.get_or_insert(now);
        if now.saturating_duration_since(since) < debounce {
            return None;
        }
        self.stable = pressed;
        self.candidate_since = None;
        Some(if pressed {
            Edge::Pressed(since)
        } else {
            Edge::Released(since)
        })
    }

    const fn pending_since(&self) -> Option<Instant> {
        self.candidate_since
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WakeGuard {
    Off,
    /// Armed by a wake, the window starts at the first sample
    Armed,
    /// Presses starting before the deadline belong to the wake
    Until(Instant),
}

/// Input Classifier
pub struct InputClassifier {
    config: ClassifierConfig,
    debouncer: Debouncer,
    state: ButtonState,
    wake_guard: WakeGuard,
}

impl InputClassifier {
    pub const fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            debouncer: Debouncer::new(),
            state: ButtonState::Idle,
            wake_guard: WakeGuard::Off,
        }
    }

    /// Current state, including a pending debounce
    pub fn state(&self) -> ButtonState {
        match (self.state, self.debouncer.pending_since()) {
            (ButtonState::Idle, Some(since)) => ButtonState::Debouncing(since),
            (state, _) => state,
        }
    }

    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Drop any half-recognized gesture
    pub fn reset(&mut self) {
        self.debouncer = Debouncer::new();
        self.state = ButtonState::Idle;
    }

    /// Called after the device woke from sleep
    ///
    /// The press that woke the device is consumed instead of becoming a
    /// click. The guard covers presses that start within the wake-guard
    /// window of the first sample taken after waking.
    pub fn on_wake(&mut self) {
        self.reset();
        self.wake_guard = WakeGuard::Armed;
    }

    /// Feed one sample, returns at most one recognized gesture
    pub fn update(&mut self, pressed: bool, now: Instant) -> Option<GestureEvent> {
        if self.wake_guard == WakeGuard::Armed {
            self.wake_guard = WakeGuard::Until(now + self.config.wake_guard);
        }

        let edge = self.debouncer.update(pressed, now, self.config.debounce);
        let event = match edge {
            Some(Edge::Pressed(at)) => self.on_press(at),
            Some(Edge::Released(at)) => self.on_release(at),
            None => None,
        };
        let event = event.or_else(|| self.on_time(now));

        if let WakeGuard::Until(deadline) = self.wake_guard {
            if now >= deadline && self.debouncer.pending_since().is_none() {
                self.wake_guard = WakeGuard::Off;
            }
        }

        #[cfg(feature = "esp32-log")]
        if let Some(event) = event {
            println!("[InputClassifier.update] recognized {:?}", event.gesture);
        }
        event
    }

    fn on_press(&mut self, at: Instant) -> Option<GestureEvent> {
        if let WakeGuard::Until(deadline) = self.wake_guard {
            if at < deadline {
                self.wake_guard = WakeGuard::Off;
                self.state = ButtonState::Consumed;
                return None;
            }
        }

        match self.state {
            ButtonState::AwaitingDoubleClick(released) if self.within_window(released, at) => {
                self.state = ButtonState::Consumed;
                Some(GestureEvent::new(Gesture::DoubleClick, at))
            }
            ButtonState::AwaitingDoubleClick(_) => {
                // the window ran out between samples
                self.state = ButtonState::Held(at);
                Some(GestureEvent::new(Gesture::Click, at))
            }
            _ => {
                self.state = ButtonState::Held(at);
                None
            }
        }
    }

    fn on_release(&mut self, at: Instant) -> Option<GestureEvent> {
        match self.state {
            ButtonState::Held(since) => {
                if at.saturating_duration_since(since) >= self.config.long_press {
                    // held past the threshold between samples
                    self.state = ButtonState::Idle;
                    return Some(GestureEvent::new(Gesture::LongClick, at));
                }
                self.state = ButtonState::AwaitingDoubleClick(at);
                None
            }
            _ => {
                self.state = ButtonState::Idle;
                None
            }
        }
    }

    fn on_time(&mut self, now: Instant) -> Option<GestureEvent> {
        match self.state {
            ButtonState::Held(since)
                if now.saturating_duration_since(since) >= self.config.long_press =>
            {
                self.state = ButtonState::Consumed;
                Some(GestureEvent::new(Gesture::LongClick, now))
            }
            ButtonState::AwaitingDoubleClick(released)
                if !self.within_window(released, now) && !self.second_press_pending(released) =>
            {
                self.state = ButtonState::Idle;
                Some(GestureEvent::new(Gesture::Click, now))
            }
            _ => None,
        }
    }

    fn within_window(&self, released: Instant, at: Instant) -> bool {
        at.saturating_duration_since(released) <= self.config.double_click_window
    }

    /// A press that began inside the window is still debouncing
    fn second_press_pending(&self, released: Instant) -> bool {
        self.debouncer
            .pending_since()
            .is_some_and(|since| self.within_window(released, since))
    }
}

impl Default for InputClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::DEFAULT)
    }
}
