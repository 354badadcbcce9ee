//! Transposer - a MIDI effect that shifts note pitches.
//!
//! Every note-on and note-off passing through is moved by the `Transpose`
//! parameter (-12 to +12 semitones). Everything else goes through untouched.
//! The plugin has no audio buses and no tail.
//!
//! State is the transpose amount as a 4-byte little-endian `i32`.
//!
//! ```ignore
//! use transposer_host::PluginRegistry;
//!
//! let mut registry = PluginRegistry::new();
//! transposer::register(&mut registry)?;
//! let mut plugin = registry.create("Transposer")?;
//! ```

use transposer_core::{
    AudioBuffer, AudioProcessor, IntParameter, MidiBuffer, MidiEvent, NoConfig, Plugin,
    PluginConfig, PluginResult,
};
use transposer_host::PluginRegistry;
use transposer_macros::{HasParameters, Parameters};

pub mod transpose;

pub use transpose::{transpose_block, transpose_event, transpose_into};

// =============================================================================
// Plugin Configuration
// =============================================================================

/// Plugin metadata.
pub static CONFIG: PluginConfig = PluginConfig::new("Transposer")
    .with_vendor("transposer-rs")
    .with_url("https://github.com/transposer-rs/transposer")
    .with_version(env!("CARGO_PKG_VERSION"))
    .with_category("Fx")
    .with_sub_categories("Fx|Tools")
    .with_midi_effect();

/// Register the Transposer with a host registry.
pub fn register(registry: &mut PluginRegistry) -> PluginResult<()> {
    registry.register::<TransposerPlugin>(&CONFIG)
}

// =============================================================================
// Parameters
// =============================================================================

/// Transposer parameters.
#[derive(Parameters)]
pub struct TransposerParameters {
    /// Shift in semitones.
    #[parameter(id = "transpose", name = "Transpose", default = 0, range = -12..=12, kind = "semitones")]
    pub transpose: IntParameter,
}

// =============================================================================
// Plugin (Unprepared State)
// =============================================================================

/// The transposer before the host has configured processing.
#[derive(Default, HasParameters)]
pub struct TransposerPlugin {
    #[parameters]
    parameters: TransposerParameters,
}

impl Plugin for TransposerPlugin {
    // Nothing here depends on the sample rate.
    type Config = NoConfig;
    type Processor = TransposerProcessor;

    fn prepare(self, _: NoConfig) -> TransposerProcessor {
        TransposerProcessor {
            parameters: self.parameters,
        }
    }

    fn input_bus_count(&self) -> usize {
        0
    }

    fn output_bus_count(&self) -> usize {
        0
    }

    fn wants_midi(&self) -> bool {
        true
    }

    fn program_count(&self) -> usize {
        1
    }

    fn program_name(&self, index: usize) -> Option<&'static str> {
        (index == 0).then_some("None")
    }
}

// =============================================================================
// Audio Processor (Prepared State)
// =============================================================================

/// The transposer, ready to process.
#[derive(HasParameters)]
pub struct TransposerProcessor {
    #[parameters]
    parameters: TransposerParameters,
}

impl AudioProcessor for TransposerProcessor {
    type Plugin = TransposerPlugin;

    fn process(&mut self, buffer: &mut AudioBuffer<'_>) {
        // No audio buses are declared, but leave anything we're handed silent.
        buffer.clear_outputs();
    }

    fn process_midi(&mut self, input: &[MidiEvent], output: &mut MidiBuffer) {
        // One read per block so every event moves by the same amount.
        let semitones = self.parameters.transpose.get();
        transpose_into(input, semitones, output);
    }

    fn unprepare(self) -> TransposerPlugin {
        TransposerPlugin {
            parameters: self.parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use transposer_core::{
        ParameterId, ParameterRef, Parameters, PluginError, RawMessage, STATE_BYTES_PER_PARAMETER,
    };
    use transposer_host::{HostedPlugin, PluginInstance};

    const TRANSPOSE: ParameterId = TransposerParameters::PARAMETER_TRANSPOSE_ID;

    fn instance() -> PluginInstance<TransposerPlugin> {
        PluginInstance::new(&CONFIG)
    }

    fn run(plugin: &mut dyn HostedPlugin, events: &[MidiEvent]) -> Vec<MidiEvent> {
        let mut midi: MidiBuffer = events.iter().cloned().collect();
        plugin
            .process(&mut AudioBuffer::empty(512), &mut midi)
            .unwrap();
        midi.as_slice().to_vec()
    }

    #[test]
    fn test_parameter_definition() {
        let parameters = TransposerParameters::default();
        assert_eq!(parameters.count(), 1);
        assert_eq!(TRANSPOSE, transposer_core::fnv1a_32("transpose"));

        let transpose = parameters.by_id(TRANSPOSE).unwrap();
        assert_eq!(transpose.name(), "Transpose");
        assert_eq!(transpose.units(), "st");
        assert_eq!(transpose.info().step_count, 24);
        assert_eq!(parameters.transpose.get(), 0);
        assert_eq!(parameters.transpose.range(), -12..=12);

        parameters.transpose.set(40);
        assert_eq!(parameters.transpose.get(), 12);
    }

    #[test]
    fn test_metadata() {
        let plugin = instance();
        assert_eq!(plugin.name(), "Transposer");
        assert!(plugin.accepts_midi());
        assert!(plugin.produces_midi());
        assert!(plugin.is_midi_effect());
        assert_eq!(CONFIG.sub_categories, "Fx|Tools");
        assert_eq!(CONFIG.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(plugin.input_bus_count(), 0);
        assert_eq!(plugin.output_bus_count(), 0);
        assert!(plugin.wants_midi());
    }

    #[test]
    fn test_programs() {
        let mut plugin = instance();
        assert_eq!(plugin.program_count(), 1);
        assert_eq!(plugin.program_name(0), Some("None"));
        assert_eq!(plugin.program_name(1), None);
        assert_eq!(plugin.current_program(), 0);
        plugin.set_current_program(3);
        plugin.change_program_name(0, "Up a fifth");
        assert_eq!(plugin.current_program(), 0);
        assert_eq!(plugin.program_name(0), Some("None"));
    }

    #[test]
    fn test_tail_is_zero() {
        let mut plugin = instance();
        assert_eq!(plugin.tail_seconds(), 0.0);
        plugin.prepare(44_100.0, 512).unwrap();
        assert_eq!(plugin.tail_seconds(), 0.0);
    }

    #[test]
    fn test_process_before_prepare_fails() {
        let mut plugin = instance();
        let mut midi = MidiBuffer::new();
        assert_eq!(
            plugin.process(&mut AudioBuffer::empty(64), &mut midi),
            Err(PluginError::NotPrepared)
        );
    }

    #[test]
    fn test_transposes_through_host() {
        let mut plugin = instance();
        plugin.prepare(48_000.0, 512).unwrap();
        plugin.set_parameter_normalized(TRANSPOSE, 17.0 / 24.0).unwrap();
        assert_eq!(plugin.parameter_display(TRANSPOSE).unwrap(), "+5 st");

        let cc = MidiEvent::other(240, RawMessage::from_bytes(&[0xB3, 64, 127]).unwrap());
        let output = run(
            &mut plugin,
            &[
                MidiEvent::note_on(0, 1, 60, 100),
                cc.clone(),
                MidiEvent::note_off(480, 1, 60, 0),
            ],
        );
        assert_eq!(
            output,
            [
                MidiEvent::note_on(0, 1, 65, 100),
                cc,
                MidiEvent::note_off(480, 1, 65, 0),
            ]
        );
    }

    #[test]
    fn test_classified_note_on_zero_velocity_is_shifted_as_note_off() {
        let mut plugin = instance();
        plugin.prepare(48_000.0, 512).unwrap();
        plugin.parameters().transpose.set(-12);

        let event = MidiEvent::from_bytes(7, &[0x90, 5, 0]).unwrap();
        let output = run(&mut plugin, &[event]);
        assert_eq!(output, [MidiEvent::note_off(7, 1, -7, 0)]);
    }

    #[test]
    fn test_lifecycle_keeps_value() {
        let mut plugin = instance();
        plugin.parameters().transpose.set(7);
        plugin.prepare(44_100.0, 256).unwrap();
        plugin.release();
        plugin.prepare(96_000.0, 1024).unwrap();
        assert_eq!(plugin.parameters().transpose.get(), 7);
        assert_eq!(
            run(&mut plugin, &[MidiEvent::note_on(0, 3, 60, 80)]),
            [MidiEvent::note_on(0, 3, 67, 80)]
        );
    }

    #[test]
    fn test_state_is_little_endian_i32() {
        let plugin = instance();
        plugin.parameters().transpose.set(-5);
        assert_eq!(plugin.get_state().unwrap(), vec![0xFB, 0xFF, 0xFF, 0xFF]);
        assert_eq!(plugin.get_state().unwrap().len(), STATE_BYTES_PER_PARAMETER);
    }

    #[test]
    fn test_state_out_of_range_clamps() {
        let mut plugin = instance();
        plugin.set_state(&100i32.to_le_bytes()).unwrap();
        assert_eq!(plugin.parameters().transpose.get(), 12);
        plugin.set_state(&i32::MIN.to_le_bytes()).unwrap();
        assert_eq!(plugin.parameters().transpose.get(), -12);
    }

    #[test]
    fn test_state_trailing_bytes_ignored() {
        let mut plugin = instance();
        plugin.set_state(&[3, 0, 0, 0, 0xAA, 0xBB]).unwrap();
        assert_eq!(plugin.parameters().transpose.get(), 3);
    }

    #[test]
    fn test_short_state_rejected() {
        let mut plugin = instance();
        plugin.parameters().transpose.set(4);
        for data in [&[][..], &[1][..], &[1, 0, 0][..]] {
            assert!(matches!(
                plugin.set_state(data),
                Err(PluginError::StateError(_))
            ));
        }
        assert_eq!(plugin.parameters().transpose.get(), 4);
    }

    #[test]
    fn test_register() {
        let mut registry = PluginRegistry::new();
        register(&mut registry).unwrap();
        assert!(matches!(
            register(&mut registry),
            Err(PluginError::Registration(_))
        ));

        let mut plugin = registry.create("Transposer").unwrap();
        plugin.prepare(48_000.0, 128).unwrap();
        plugin.set_state(&2i32.to_le_bytes()).unwrap();
        assert_eq!(
            run(plugin.as_mut(), &[MidiEvent::note_on(1, 1, 60, 1)]),
            [MidiEvent::note_on(1, 1, 62, 1)]
        );
    }

    proptest! {
        #[test]
        fn prop_state_round_trip(value in -12i32..=12, prepared in any::<bool>()) {
            let mut source = instance();
            let mut target = instance();
            if prepared {
                source.prepare(48_000.0, 64).unwrap();
                target.prepare(44_100.0, 64).unwrap();
            }
            source.parameters().transpose.set(value);

            let state = source.get_state().unwrap();
            target.set_state(&state).unwrap();
            prop_assert_eq!(target.parameters().transpose.get(), value);

            source.set_state(&state).unwrap();
            prop_assert_eq!(source.parameters().transpose.get(), value);
        }
    }
}
