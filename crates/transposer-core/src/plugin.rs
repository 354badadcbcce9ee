//! Core plugin trait definitions.
//!
//! This module defines the two-phase plugin lifecycle:
//!
//! - **[`Plugin`]** (unprepared state): Holds parameters, created before audio config is known.
//!   Transforms into a processor via [`Plugin::prepare()`] when configuration arrives.
//!
//! - **[`AudioProcessor`]** (prepared state): Ready for processing with real sample rate
//!   and buffer configuration. Created by [`Plugin::prepare()`], can return to unprepared
//!   state via [`AudioProcessor::unprepare()`] for sample rate changes.
//!
//! ```text
//! Plugin::default() -> Plugin (unprepared, holds parameters)
//!                      |
//!                      v  Plugin::prepare(config)
//!                      |
//!                AudioProcessor (prepared)
//!                      |
//!                      v  AudioProcessor::unprepare()
//!                      |
//!                 Plugin (unprepared, parameters preserved)
//! ```

use crate::buffer::AudioBuffer;
use crate::error::PluginResult;
use crate::midi::{MidiBuffer, MidiEvent};
use crate::parameter_types::Parameters;

// =============================================================================
// HasParameters Trait (Shared Parameter Access)
// =============================================================================

/// Trait for types that hold parameters.
///
/// Shared between [`Plugin`] (unprepared state) and [`AudioProcessor`]
/// (prepared state). Use `#[derive(HasParameters)]` with a `#[parameters]`
/// field annotation to implement it:
///
/// ```ignore
/// #[derive(Default, HasParameters)]
/// pub struct MyPlugin {
///     #[parameters]
///     parameters: MyParameters,
/// }
/// ```
pub trait HasParameters: Send + 'static {
    /// The parameter collection type.
    type Parameters: Parameters;

    /// Returns a reference to the parameters.
    fn parameters(&self) -> &Self::Parameters;

    /// Returns a mutable reference to the parameters.
    fn parameters_mut(&mut self) -> &mut Self::Parameters;
}

// =============================================================================
// Processor Configuration Types
// =============================================================================

/// Configuration handed to [`Plugin::prepare()`].
///
/// The host adapter builds it from the [`AudioSetup`] it receives, so a
/// plugin only sees what it asked for.
pub trait ProcessorConfig: Clone + Send + 'static {
    /// Build the configuration from the host's audio setup.
    fn from_setup(setup: &AudioSetup) -> Self;
}

/// Configuration for plugins that don't need audio setup information.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoConfig;

impl ProcessorConfig for NoConfig {
    fn from_setup(_setup: &AudioSetup) -> Self {
        NoConfig
    }
}

/// Audio setup with sample rate and max buffer size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioSetup {
    /// Sample rate in Hz (e.g., 44100.0, 48000.0, 96000.0)
    pub sample_rate: f64,
    /// Maximum number of samples per process() call
    pub max_buffer_size: usize,
}

impl ProcessorConfig for AudioSetup {
    fn from_setup(setup: &AudioSetup) -> Self {
        *setup
    }
}

// =============================================================================
// Bus Configuration
// =============================================================================

/// Information about an audio bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusInfo {
    /// Display name for the bus (e.g., "Input", "Output").
    pub name: &'static str,
    /// Number of channels in this bus.
    pub channel_count: u32,
    /// Whether the bus is active by default.
    pub is_default_active: bool,
}

impl BusInfo {
    /// Create a stereo main bus.
    pub const fn stereo(name: &'static str) -> Self {
        Self {
            name,
            channel_count: 2,
            is_default_active: true,
        }
    }
}

// =============================================================================
// AudioProcessor Trait
// =============================================================================

/// The prepared processor.
///
/// Created by [`Plugin::prepare()`] with valid configuration from the start.
///
/// # Thread Safety
///
/// Implementors must be `Send` because the plugin may be moved between threads.
/// [`process`](Self::process) and [`process_midi`](Self::process_midi) run on
/// the audio thread and must not allocate, lock, or block.
pub trait AudioProcessor: HasParameters {
    /// The unprepared plugin type that created this processor.
    type Plugin: Plugin<Processor = Self, Parameters = Self::Parameters>;

    /// Process one block of audio.
    fn process(&mut self, buffer: &mut AudioBuffer<'_>);

    /// Process one block of MIDI events.
    ///
    /// Called after [`process`](Self::process) with the block's input events
    /// and an empty output buffer. The default forwards every event.
    fn process_midi(&mut self, input: &[MidiEvent], output: &mut MidiBuffer) {
        for event in input {
            output.push(event.clone());
        }
    }

    /// Return to the unprepared plugin state.
    ///
    /// The processor is consumed and the plugin comes back with its
    /// parameters preserved, ready for another `prepare()`.
    fn unprepare(self) -> Self::Plugin
    where
        Self: Sized;

    /// Called when the host activates or deactivates processing.
    fn set_active(&mut self, _active: bool) {}

    /// Samples of output produced after input stops.
    fn tail_samples(&self) -> u32 {
        0
    }

    /// Serialize plugin state. Delegates to the parameter collection.
    fn save_state(&self) -> PluginResult<Vec<u8>> {
        Ok(self.parameters().save_state())
    }

    /// Restore plugin state. Delegates to the parameter collection.
    fn load_state(&mut self, data: &[u8]) -> PluginResult<()> {
        self.parameters().load_state(data)
    }
}

// =============================================================================
// Plugin Trait
// =============================================================================

/// The unprepared plugin.
///
/// Holds parameters and anything that doesn't depend on the sample rate.
/// The host adapter creates it with `Default` and turns it into an
/// [`AudioProcessor`] once the audio configuration is known.
pub trait Plugin: HasParameters + Default {
    /// Configuration this plugin needs to prepare.
    type Config: ProcessorConfig;

    /// The processor type this plugin becomes.
    type Processor: AudioProcessor<Plugin = Self, Parameters = Self::Parameters>;

    /// Transform into a prepared processor.
    fn prepare(self, config: Self::Config) -> Self::Processor;

    /// Number of audio input buses.
    fn input_bus_count(&self) -> usize {
        1
    }

    /// Number of audio output buses.
    fn output_bus_count(&self) -> usize {
        1
    }

    /// Information about an input bus.
    fn input_bus_info(&self, index: usize) -> Option<BusInfo> {
        (index < self.input_bus_count()).then(|| BusInfo::stereo("Input"))
    }

    /// Information about an output bus.
    fn output_bus_info(&self, index: usize) -> Option<BusInfo> {
        (index < self.output_bus_count()).then(|| BusInfo::stereo("Output"))
    }

    /// Whether this plugin consumes MIDI events.
    fn wants_midi(&self) -> bool {
        false
    }

    /// Number of factory programs.
    fn program_count(&self) -> usize {
        1
    }

    /// Name of a factory program.
    fn program_name(&self, index: usize) -> Option<&'static str> {
        (index < self.program_count()).then_some("Default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter_types::NoParameters;

    #[derive(Default)]
    struct Thru {
        parameters: NoParameters,
    }

    impl HasParameters for Thru {
        type Parameters = NoParameters;

        fn parameters(&self) -> &NoParameters {
            &self.parameters
        }

        fn parameters_mut(&mut self) -> &mut NoParameters {
            &mut self.parameters
        }
    }

    impl Plugin for Thru {
        type Config = NoConfig;
        type Processor = ThruProcessor;

        fn prepare(self, _: NoConfig) -> ThruProcessor {
            ThruProcessor {
                parameters: self.parameters,
            }
        }
    }

    struct ThruProcessor {
        parameters: NoParameters,
    }

    impl HasParameters for ThruProcessor {
        type Parameters = NoParameters;

        fn parameters(&self) -> &NoParameters {
            &self.parameters
        }

        fn parameters_mut(&mut self) -> &mut NoParameters {
            &mut self.parameters
        }
    }

    impl AudioProcessor for ThruProcessor {
        type Plugin = Thru;

        fn process(&mut self, buffer: &mut AudioBuffer<'_>) {
            buffer.clear_outputs();
        }

        fn unprepare(self) -> Thru {
            Thru {
                parameters: self.parameters,
            }
        }
    }

    #[test]
    fn test_default_bus_layout() {
        let plugin = Thru::default();
        assert_eq!(plugin.input_bus_info(0), Some(BusInfo::stereo("Input")));
        assert_eq!(plugin.output_bus_info(1), None);
        assert!(!plugin.wants_midi());
        assert_eq!(plugin.program_name(0), Some("Default"));
        assert_eq!(plugin.program_name(1), None);
    }

    #[test]
    fn test_default_midi_pass_through() {
        let mut processor = Thru::default().prepare(NoConfig);
        let input = [MidiEvent::note_on(0, 1, 60, 100), MidiEvent::note_off(9, 1, 60, 0)];
        let mut output = MidiBuffer::new();
        processor.process_midi(&input, &mut output);
        assert_eq!(output.as_slice(), &input);
        assert_eq!(processor.tail_samples(), 0);
        assert_eq!(processor.save_state(), Ok(Vec::new()));
    }

    #[test]
    fn test_config_from_setup() {
        let setup = AudioSetup {
            sample_rate: 48_000.0,
            max_buffer_size: 512,
        };
        assert_eq!(AudioSetup::from_setup(&setup), setup);
        assert_eq!(NoConfig::from_setup(&setup), NoConfig);
    }
}
