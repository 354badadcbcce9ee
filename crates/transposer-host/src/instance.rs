//! Generic plugin instance.
//!
//! [`PluginInstance`] wraps any [`Plugin`] and manages its two-phase
//! lifecycle on behalf of the host:
//!
//! ```text
//! PluginInstance::new()
//!     ↓ creates Plugin::default()
//! PluginState::Unprepared { plugin }
//!     ↓ prepare() calls plugin.prepare(config)
//! PluginState::Prepared { processor, setup }
//!     ↓ release(), or prepare() with a new setup: processor.unprepare()
//! PluginState::Unprepared { plugin }
//! ```

use std::mem;

use transposer_core::{
    AudioBuffer, AudioProcessor, AudioSetup, BusInfo, HasParameters, MidiBuffer, ParameterId,
    ParameterInfo, ParameterRef, ParameterValue, Parameters, Plugin, PluginConfig, PluginError,
    PluginResult, ProcessorConfig,
};

use crate::hosted::HostedPlugin;

/// Lifecycle state.
enum PluginState<P: Plugin> {
    /// No audio configuration yet. The plugin holds the parameters.
    Unprepared { plugin: P },
    /// Ready to process.
    Prepared {
        processor: P::Processor,
        setup: AudioSetup,
    },
}

/// What the host may ask about after the plugin has been consumed by
/// `prepare()`. Captured once at construction.
struct CachedLayout {
    input_buses: Vec<BusInfo>,
    output_buses: Vec<BusInfo>,
    wants_midi: bool,
    programs: Vec<&'static str>,
}

impl CachedLayout {
    fn from_plugin<P: Plugin>(plugin: &P) -> Self {
        Self {
            input_buses: (0..plugin.input_bus_count())
                .filter_map(|i| plugin.input_bus_info(i))
                .collect(),
            output_buses: (0..plugin.output_bus_count())
                .filter_map(|i| plugin.output_bus_info(i))
                .collect(),
            wants_midi: plugin.wants_midi(),
            programs: (0..plugin.program_count())
                .filter_map(|i| plugin.program_name(i))
                .collect(),
        }
    }
}

/// Host adapter for a single plugin instance.
///
/// Owns the MIDI output buffer. After each
/// [`process`](HostedPlugin::process) call the caller's buffer and the
/// output buffer trade places, so the caller sees the plugin's output
/// without any events being copied.
pub struct PluginInstance<P: Plugin> {
    state: PluginState<P>,
    config: &'static PluginConfig,
    layout: CachedLayout,
    midi_output: MidiBuffer,
    current_program: usize,
}

impl<P: Plugin> PluginInstance<P> {
    /// Create an unprepared instance with default parameters.
    pub fn new(config: &'static PluginConfig) -> Self {
        let plugin = P::default();
        let layout = CachedLayout::from_plugin(&plugin);

        Self {
            state: PluginState::Unprepared { plugin },
            config,
            layout,
            midi_output: MidiBuffer::new(),
            current_program: 0,
        }
    }

    /// The plugin's parameters, whichever state it is in.
    pub fn parameters(&self) -> &P::Parameters {
        match &self.state {
            PluginState::Unprepared { plugin } => plugin.parameters(),
            PluginState::Prepared { processor, .. } => processor.parameters(),
        }
    }

    /// The audio setup the processor was built with, if prepared.
    pub fn setup(&self) -> Option<&AudioSetup> {
        match &self.state {
            PluginState::Unprepared { .. } => None,
            PluginState::Prepared { setup, .. } => Some(setup),
        }
    }

    /// Take the plugin out of whatever state it is in, unpreparing if needed.
    ///
    /// Leaves a default plugin behind; callers immediately overwrite it.
    fn take_plugin(&mut self) -> P {
        let placeholder = PluginState::Unprepared { plugin: P::default() };
        match mem::replace(&mut self.state, placeholder) {
            PluginState::Unprepared { plugin } => plugin,
            PluginState::Prepared { processor, .. } => processor.unprepare(),
        }
    }

    fn parameter(&self, id: ParameterId) -> PluginResult<&dyn ParameterRef> {
        self.parameters().by_id(id).ok_or_else(|| {
            log::warn!("{}: unknown parameter id 0x{:08x}", self.config.name, id);
            PluginError::UnknownParameter(id)
        })
    }
}

fn validate_setup(sample_rate: f64, max_block_size: usize) -> PluginResult<AudioSetup> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(PluginError::InitializationFailed(format!(
            "invalid sample rate {}",
            sample_rate
        )));
    }
    if max_block_size == 0 {
        return Err(PluginError::InitializationFailed(
            "maximum block size must be positive".to_string(),
        ));
    }
    Ok(AudioSetup {
        sample_rate,
        max_buffer_size: max_block_size,
    })
}

impl<P: Plugin> HostedPlugin for PluginInstance<P> {
    fn config(&self) -> &'static PluginConfig {
        self.config
    }

    fn prepare(&mut self, sample_rate: f64, max_block_size: usize) -> PluginResult<()> {
        let setup = validate_setup(sample_rate, max_block_size).inspect_err(|e| {
            log::warn!("{}: prepare rejected: {}", self.config.name, e);
        })?;

        if let PluginState::Prepared { setup: current, .. } = &self.state {
            if *current == setup {
                return Ok(());
            }
            log::debug!(
                "{}: setup changed from {} Hz/{} to {} Hz/{}, re-preparing",
                self.config.name,
                current.sample_rate,
                current.max_buffer_size,
                setup.sample_rate,
                setup.max_buffer_size
            );
        }

        let plugin = self.take_plugin();
        let processor = plugin.prepare(P::Config::from_setup(&setup));
        self.state = PluginState::Prepared { processor, setup };

        log::debug!(
            "{}: prepared at {} Hz, max block {}",
            self.config.name,
            sample_rate,
            max_block_size
        );
        Ok(())
    }

    fn release(&mut self) {
        if let PluginState::Prepared { .. } = self.state {
            let plugin = self.take_plugin();
            self.state = PluginState::Unprepared { plugin };
            self.midi_output.clear();
            log::debug!("{}: released", self.config.name);
        }
    }

    fn is_prepared(&self) -> bool {
        matches!(self.state, PluginState::Prepared { .. })
    }

    fn set_active(&mut self, active: bool) {
        // Hosts may toggle activation before preparing; nothing to forward then.
        if let PluginState::Prepared { processor, .. } = &mut self.state {
            processor.set_active(active);
        }
    }

    fn process(&mut self, audio: &mut AudioBuffer<'_>, midi: &mut MidiBuffer) -> PluginResult<()> {
        let PluginState::Prepared { processor, .. } = &mut self.state else {
            return Err(PluginError::NotPrepared);
        };

        processor.process(audio);

        self.midi_output.clear();
        processor.process_midi(midi.as_slice(), &mut self.midi_output);
        if self.midi_output.has_overflowed() {
            log::warn!(
                "{}: MIDI output overflowed, events beyond {} were dropped",
                self.config.name,
                self.midi_output.capacity()
            );
        }

        mem::swap(midi, &mut self.midi_output);
        Ok(())
    }

    fn tail_seconds(&self) -> f64 {
        match &self.state {
            PluginState::Unprepared { .. } => 0.0,
            PluginState::Prepared { processor, setup } => {
                f64::from(processor.tail_samples()) / setup.sample_rate
            }
        }
    }

    fn input_bus_count(&self) -> usize {
        self.layout.input_buses.len()
    }

    fn output_bus_count(&self) -> usize {
        self.layout.output_buses.len()
    }

    fn input_bus_info(&self, index: usize) -> Option<BusInfo> {
        self.layout.input_buses.get(index).cloned()
    }

    fn output_bus_info(&self, index: usize) -> Option<BusInfo> {
        self.layout.output_buses.get(index).cloned()
    }

    fn wants_midi(&self) -> bool {
        self.layout.wants_midi
    }

    fn get_state(&self) -> PluginResult<Vec<u8>> {
        match &self.state {
            PluginState::Unprepared { plugin } => Ok(plugin.parameters().save_state()),
            PluginState::Prepared { processor, .. } => processor.save_state(),
        }
    }

    fn set_state(&mut self, data: &[u8]) -> PluginResult<()> {
        let result = match &mut self.state {
            PluginState::Unprepared { plugin } => plugin.parameters().load_state(data),
            PluginState::Prepared { processor, .. } => processor.load_state(data),
        };
        if let Err(e) = &result {
            log::warn!("{}: failed to restore state: {}", self.config.name, e);
        }
        result
    }

    fn parameter_count(&self) -> usize {
        self.parameters().count()
    }

    fn parameter_info(&self, index: usize) -> Option<ParameterInfo> {
        self.parameters().info(index).cloned()
    }

    fn parameter_normalized(&self, id: ParameterId) -> PluginResult<ParameterValue> {
        Ok(self.parameter(id)?.get_normalized())
    }

    fn set_parameter_normalized(&self, id: ParameterId, value: ParameterValue) -> PluginResult<()> {
        self.parameter(id)?.set_normalized(value);
        Ok(())
    }

    fn parameter_display(&self, id: ParameterId) -> PluginResult<String> {
        Ok(self.parameter(id)?.display())
    }

    fn program_count(&self) -> usize {
        self.layout.programs.len()
    }

    fn current_program(&self) -> usize {
        self.current_program
    }

    fn set_current_program(&mut self, index: usize) {
        if index < self.layout.programs.len() {
            self.current_program = index;
        }
    }

    fn program_name(&self, index: usize) -> Option<&'static str> {
        self.layout.programs.get(index).copied()
    }

    fn change_program_name(&mut self, index: usize, name: &str) {
        log::debug!(
            "{}: ignoring rename of factory program {} to {:?}",
            self.config.name,
            index,
            name
        );
    }
}
