use embassy_time::Instant;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::animation::{RollAnimation, RollConfig};
use crate::color::Rgb;
use crate::input::{ClassifierConfig, Gesture, GestureEvent, InputClassifier};
use crate::pattern::{MAX_FACE, Mode, Pattern, SpotParameters};
use crate::power::{PowerConfig, PowerManager, PowerState, PowerStateMachine, PowerTransition};
use crate::renderer::RenderEngine;
use crate::rng::Rng;
use crate::store::{ByteStore, DeviceSettings, SettingsLimits, SettingsStore};

/// Describes how the button is physically wired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressedTo {
    /// Pin reads high while pressed (pull-down)
    Voltage,
    /// Pin reads low while pressed (pull-up)
    Ground,
}

/// Parameters of the ambient patterns selected by [`Mode`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientConfig {
    pub solid_color: Rgb,
    /// Hue steps per frame of the color wheel
    pub wheel_speed: u8,
    /// Spot speed range in radians per second
    pub spot_speed_min: f32,
    pub spot_speed_max: f32,
    pub spot_width: f32,
    pub spot_ceiling: u8,
}

impl AmbientConfig {
    pub const DEFAULT: Self = Self {
        solid_color: Rgb {
            r: 255,
            g: 96,
            b: 16,
        },
        wheel_speed: 1,
        spot_speed_min: 0.2,
        spot_speed_max: 0.6,
        spot_width: 0.08,
        spot_ceiling: 255,
    };
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for the device controller
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    pub classifier: ClassifierConfig,
    pub power: PowerConfig,
    pub roll: RollConfig,
    pub limits: SettingsLimits,
    pub ambient: AmbientConfig,
    pub pressed_to: PressedTo,
    /// Highest face a roll can produce, at most [`MAX_FACE`]
    pub faces: u8,
    /// Seed for spot speeds and dice rolls
    pub seed: u64,
}

impl ControllerConfig {
    pub const DEFAULT: Self = Self {
        classifier: ClassifierConfig::DEFAULT,
        power: PowerConfig::DEFAULT,
        roll: RollConfig::DEFAULT,
        limits: SettingsLimits::DEFAULT,
        ambient: AmbientConfig::DEFAULT,
        pressed_to: PressedTo::Ground,
        faces: 6,
        seed: 0x5EED_D1CE,
    };
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Hardware handed to the controller
pub struct DeviceParts<O, B, S, P, D> {
    pub output: O,
    pub button: B,
    pub storage: S,
    pub power_manager: P,
    pub delay: D,
}

/// What happened during one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub gesture: Option<GestureEvent>,
    /// Power state at the end of the iteration
    pub power: PowerState,
    /// The device slept and woke up during this iteration
    pub slept: bool,
}

/// Device Controller - owns every subsystem and runs one loop iteration
/// per [`step`](Self::step)
///
/// Input is not sampled while a roll animation plays; the animation blocks
/// for its full, bounded duration.
pub struct DeviceController<O, B, S, P, D, const N: usize>
where
    O: OutputDriver,
    B: InputPin,
    S: ByteStore,
    P: PowerManager,
    D: DelayNs,
{
    engine: RenderEngine<O, N>,
    button: B,
    classifier: InputClassifier,
    power: PowerStateMachine,
    power_manager: P,
    store: SettingsStore<S>,
    delay: D,
    config: ControllerConfig,
    settings: DeviceSettings,
    rng: Rng,
    spots: SpotParameters,
    face: Option<u8>,
    rolls: u32,
}

impl<O, B, S, P, D, const N: usize> DeviceController<O, B, S, P, D, N>
where
    O: OutputDriver,
    B: InputPin,
    S: ByteStore,
    P: PowerManager,
    D: DelayNs,
{
    /// Boot the controller: load settings and select the ambient pattern
    pub fn new(parts: DeviceParts<O, B, S, P, D>, config: ControllerConfig) -> Self {
        let mut store = SettingsStore::new(parts.storage, config.limits);
        let settings = store.load();

        let mut rng = Rng::new(config.seed);
        let ambient = config.ambient;
        let spots = SpotParameters::random(
            &mut rng,
            ambient.spot_speed_min,
            ambient.spot_speed_max,
            ambient.spot_width,
            ambient.spot_ceiling,
        );

        let mut controller = Self {
            engine: RenderEngine::new(parts.output, settings.brightness),
            button: parts.button,
            classifier: InputClassifier::new(config.classifier),
            power: PowerStateMachine::new(config.power),
            power_manager: parts.power_manager,
            store,
            delay: parts.delay,
            config,
            settings,
            rng,
            spots,
            face: None,
            rolls: 0,
        };
        controller.show_ambient();
        #[cfg(feature = "esp32-log")]
        println!(
            "[DeviceController.new] booted with brightness {} mode {}",
            settings.brightness,
            settings.mode.as_str()
        );
        controller
    }

    /// Run one loop iteration
    ///
    /// Poll input, route a recognized gesture or advance the idle counter,
    /// render and flush, then sleep if the idle timeout elapsed.
    pub fn step(&mut self, now: Instant) -> StepReport {
        let pressed = self.is_pressed();
        let gesture = self.classifier.update(pressed, now);
        let transition = match gesture {
            Some(event) => {
                self.power.on_gesture();
                self.handle_gesture(event);
                PowerTransition::None
            }
            None => self.power.tick(),
        };
        if transition == PowerTransition::EnteredIdle {
            self.show_ambient();
        }

        self.engine.render(now);
        self.engine.flush();

        let slept = transition == PowerTransition::SleepDue;
        if slept {
            self.sleep();
        }

        StepReport {
            gesture,
            power: self.power.state(),
            slept,
        }
    }

    fn is_pressed(&mut self) -> bool {
        // a failed read counts as released
        let reading = match self.config.pressed_to {
            PressedTo::Voltage => self.button.is_high(),
            PressedTo::Ground => self.button.is_low(),
        };
        reading.unwrap_or(false)
    }

    fn handle_gesture(&mut self, event: GestureEvent) {
        #[cfg(feature = "esp32-log")]
        println!("[DeviceController.handle_gesture] {:?}", event.gesture);
        match event.gesture {
            Gesture::Click => self.roll(),
            Gesture::DoubleClick => self.step_brightness(),
            Gesture::LongClick => self.cycle_mode(),
        }
    }

    /// Play the dice roll and keep the rolled face on the ring
    fn roll(&mut self) {
        let faces = self.config.faces.clamp(1, MAX_FACE);
        let face = self.rng.next_inclusive(1, faces);
        let mut animation = RollAnimation::new(face, self.config.roll);
        self.engine.play(&mut animation, &mut self.delay);
        self.engine.set_pattern(animation.final_pattern());
        self.face = Some(face);
        self.rolls = self.rolls.saturating_add(1);
    }

    fn step_brightness(&mut self) {
        let brightness = self.settings.next_brightness(&self.config.limits);
        self.settings.brightness = brightness;
        self.engine.set_brightness(brightness);
        self.store.save_brightness(brightness);
    }

    fn cycle_mode(&mut self) {
        self.settings.mode = self.settings.mode.next();
        self.store.save_mode(self.settings.mode);
        self.show_ambient();
    }

    fn sleep(&mut self) {
        self.engine.blank();
        self.power.sleep(&mut self.power_manager);
        self.classifier.on_wake();
        self.show_ambient();
    }

    fn show_ambient(&mut self) {
        self.face = None;
        let pattern = self.ambient_pattern(self.settings.mode);
        self.engine.set_pattern(pattern);
    }

    /// Pattern rendered while idle in `mode`
    pub fn ambient_pattern(&self, mode: Mode) -> Pattern {
        match mode {
            Mode::ColorWheel => Pattern::ColorWheelCycle {
                speed: self.config.ambient.wheel_speed,
            },
            Mode::Spots => Pattern::MultiSpotOscillation(self.spots),
            Mode::Solid => Pattern::SolidFill(self.config.ambient.solid_color),
        }
    }

    pub const fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    pub const fn power_state(&self) -> PowerState {
        self.power.state()
    }

    pub const fn power(&self) -> &PowerStateMachine {
        &self.power
    }

    pub const fn classifier(&self) -> &InputClassifier {
        &self.classifier
    }

    pub const fn engine(&self) -> &RenderEngine<O, N> {
        &self.engine
    }

    pub const fn store(&self) -> &SettingsStore<S> {
        &self.store
    }

    pub const fn power_manager(&self) -> &P {
        &self.power_manager
    }

    pub const fn delay(&self) -> &D {
        &self.delay
    }

    /// Face currently shown, if a roll is on display
    pub const fn face(&self) -> Option<u8> {
        self.face
    }

    /// Number of roll animations played since boot
    pub const fn rolls(&self) -> u32 {
        self.rolls
    }
}
