//! # transposer-core
//!
//! Core abstractions for the Transposer MIDI effect.
//!
//! This crate provides format-agnostic traits and types that describe a
//! plugin to a host: the MIDI event model, the two-phase plugin lifecycle,
//! parameters and plugin metadata. It knows nothing about any particular
//! host SDK.
//!
//! ## Main Traits
//!
//! - [`Plugin`] - Unprepared plugin holding parameters
//! - [`AudioProcessor`] - Prepared processor with audio/MIDI callbacks
//! - [`Parameters`] - Parameter collection trait
//! - [`ParameterRef`] - Type-erased single-parameter access
//!
//! ## Types
//!
//! - [`MidiEvent`] / [`MidiBuffer`] - Sample-timed MIDI events
//! - [`AudioBuffer`] - Audio channels for one block
//! - [`IntParameter`] - Atomic integer parameter
//! - [`PluginConfig`] - Plugin metadata
//! - [`PluginError`] - Error types

pub mod buffer;
pub mod config;
pub mod error;
pub mod hash;
pub mod midi;
pub mod parameter_format;
pub mod parameter_info;
pub mod parameter_types;
pub mod plugin;
pub mod types;

// Re-exports for convenience
pub use buffer::AudioBuffer;
pub use config::PluginConfig;
pub use error::{MidiError, PluginError, PluginResult};
pub use hash::fnv1a_32;
pub use midi::{
    LongMessage, MidiBuffer, MidiChannel, MidiEvent, MidiEventKind, MidiNote, NoteOff, NoteOn,
    RawMessage, ShortMessage, Velocity, MAX_LONG_MESSAGE_SIZE, MAX_MIDI_EVENTS,
};
pub use parameter_format::Formatter;
pub use parameter_info::{ParameterFlags, ParameterInfo};
pub use parameter_types::{
    IntParameter, NoParameters, ParameterRef, Parameters, STATE_BYTES_PER_PARAMETER,
};
pub use plugin::{
    AudioProcessor, AudioSetup, BusInfo, HasParameters, NoConfig, Plugin, ProcessorConfig,
};
pub use types::{ParameterId, ParameterValue};
