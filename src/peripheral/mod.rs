//! Peripherals that turn simulation signals into sound.
//!
//! # Example
//!
//! ```no_run
//! use buzzer_tone::{
//!     io::{DeviceOpener, Signal},
//!     peripheral::{Buzzer, BuzzerConfig, BuzzerInputs},
//!     synth::Launcher,
//! };
//!
//! let launcher = Launcher::new(DeviceOpener::new());
//! let mut buzzer = Buzzer::new(BuzzerConfig::new());
//!
//! // one simulation step: 523 Hz at full 7-bit volume
//! buzzer.propagate(
//!     &BuzzerInputs {
//!         freq: Signal::Defined(523),
//!         enable: Signal::HIGH,
//!         vol: Signal::Defined(127),
//!     },
//!     &launcher,
//! );
//!
//! // a later step pulls ENABLE low and the tone stops
//! buzzer.propagate(&BuzzerInputs { enable: Signal::LOW, ..Default::default() }, &launcher);
//! ```

mod buzzer;

pub use buzzer::{
    Buzzer, BuzzerConfig, BuzzerInputs, FrequencyUnit, DEFAULT_VOLUME_WIDTH, ENABLE_WIDTH,
    FREQ_WIDTH,
};
