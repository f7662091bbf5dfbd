#![no_std]

pub mod animation;
pub mod buffer;
pub mod color;
pub mod controller;
pub mod filter;
pub mod frame_scheduler;
pub mod gamma;
pub mod input;
pub mod math8;
pub mod output;
pub mod pattern;
pub mod power;
pub mod renderer;
pub mod rng;
pub mod store;

pub use animation::{Animation, RollAnimation, RollConfig};
pub use buffer::PixelBuffer;
pub use controller::{
    AmbientConfig, ControllerConfig, DeviceController, DeviceParts, PressedTo, StepReport,
};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use input::{ButtonState, ClassifierConfig, Gesture, GestureEvent, InputClassifier};
pub use output::SmartLedsOutput;
pub use pattern::{Mode, Pattern, PatternSlot, SpotParameters};
pub use power::{PowerConfig, PowerManager, PowerState, PowerStateMachine, PowerTransition};
pub use renderer::RenderEngine;
pub use store::{ByteStore, DeviceSettings, RamStore, SettingsLimits, SettingsStore};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The render engine is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
