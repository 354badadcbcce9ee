//! Object-safe plugin interface seen by hosts.

use transposer_core::{
    AudioBuffer, BusInfo, MidiBuffer, ParameterId, ParameterInfo, ParameterValue, PluginConfig,
    PluginResult,
};

/// A plugin instance as a host drives it.
///
/// Lifecycle calls (`prepare`, `release`, `set_state`) and `process` happen
/// on one thread at a time. Parameter setters take `&self` because values
/// live in atomics.
pub trait HostedPlugin: Send {
    /// Static metadata.
    fn config(&self) -> &'static PluginConfig;

    /// Display name.
    fn name(&self) -> &'static str {
        self.config().name
    }

    fn accepts_midi(&self) -> bool {
        self.config().accepts_midi
    }

    fn produces_midi(&self) -> bool {
        self.config().produces_midi
    }

    fn is_midi_effect(&self) -> bool {
        self.config().is_midi_effect
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Prepare for processing at the given sample rate and maximum block size.
    ///
    /// Preparing again with the same setup is a no-op; a different setup
    /// tears the processor down and builds a new one.
    fn prepare(&mut self, sample_rate: f64, max_block_size: usize) -> PluginResult<()>;

    /// Return to the unprepared state. Does nothing if not prepared.
    fn release(&mut self);

    /// Whether [`prepare`](Self::prepare) has succeeded since the last release.
    fn is_prepared(&self) -> bool;

    /// Forwarded to the processor when prepared.
    fn set_active(&mut self, active: bool);

    // =========================================================================
    // Processing
    // =========================================================================

    /// Process one block.
    ///
    /// `midi` holds the block's input events on entry and the plugin's
    /// output events on return.
    fn process(&mut self, audio: &mut AudioBuffer<'_>, midi: &mut MidiBuffer) -> PluginResult<()>;

    /// Tail length in seconds. Zero when unprepared.
    fn tail_seconds(&self) -> f64;

    // =========================================================================
    // Buses
    // =========================================================================

    fn input_bus_count(&self) -> usize;

    fn output_bus_count(&self) -> usize;

    fn input_bus_info(&self, index: usize) -> Option<BusInfo>;

    fn output_bus_info(&self, index: usize) -> Option<BusInfo>;

    /// Whether the plugin wants MIDI events delivered to `process`.
    fn wants_midi(&self) -> bool;

    // =========================================================================
    // State
    // =========================================================================

    /// Serialize the plugin's state.
    fn get_state(&self) -> PluginResult<Vec<u8>>;

    /// Restore state produced by [`get_state`](Self::get_state).
    fn set_state(&mut self, data: &[u8]) -> PluginResult<()>;

    // =========================================================================
    // Parameters
    // =========================================================================

    fn parameter_count(&self) -> usize;

    /// Metadata for the parameter at `index` (0 to count-1).
    fn parameter_info(&self, index: usize) -> Option<ParameterInfo>;

    fn parameter_normalized(&self, id: ParameterId) -> PluginResult<ParameterValue>;

    fn set_parameter_normalized(&self, id: ParameterId, value: ParameterValue) -> PluginResult<()>;

    /// Current value formatted for display, e.g. `"+5 st"`.
    fn parameter_display(&self, id: ParameterId) -> PluginResult<String>;

    // =========================================================================
    // Programs
    // =========================================================================

    fn program_count(&self) -> usize;

    fn current_program(&self) -> usize;

    fn set_current_program(&mut self, index: usize);

    fn program_name(&self, index: usize) -> Option<&'static str>;

    fn change_program_name(&mut self, index: usize, name: &str);
}
