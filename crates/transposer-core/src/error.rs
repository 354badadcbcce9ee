//! Error types for the Transposer framework.

use thiserror::Error;

use crate::types::ParameterId;

/// Errors reported across the plugin/host boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    /// Plugin initialization failed (e.g. an invalid audio setup).
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),
    /// Processing was requested before the plugin was prepared.
    #[error("Plugin is not prepared for processing")]
    NotPrepared,
    /// Audio or MIDI processing error.
    #[error("Processing error: {0}")]
    ProcessingError(String),
    /// State serialization/deserialization error.
    #[error("State error: {0}")]
    StateError(String),
    /// The host addressed a parameter that does not exist.
    #[error("Unknown parameter id 0x{0:08x}")]
    UnknownParameter(ParameterId),
    /// Plugin registration failed.
    #[error("Registration error: {0}")]
    Registration(String),
}

/// Result type for Transposer operations.
pub type PluginResult<T> = Result<T, PluginError>;

/// Errors produced while classifying raw MIDI bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MidiError {
    /// No bytes were supplied.
    #[error("empty MIDI message")]
    Empty,
    /// A long (SysEx or other multi-byte) message exceeds the configured buffer size.
    #[error("MIDI message of {len} bytes exceeds the {max} byte limit")]
    MessageTooLong { len: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PluginError::StateError("short buffer".into()).to_string(),
            "State error: short buffer"
        );
        assert_eq!(
            PluginError::UnknownParameter(0xdead_beef).to_string(),
            "Unknown parameter id 0xdeadbeef"
        );
        assert_eq!(
            MidiError::MessageTooLong { len: 600, max: 512 }.to_string(),
            "MIDI message of 600 bytes exceeds the 512 byte limit"
        );
    }
}
