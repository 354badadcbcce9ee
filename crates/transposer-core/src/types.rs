//! Common types used throughout the Transposer framework.

/// Parameter identifier (FNV-1a hash of the parameter's string ID).
pub type ParameterId = u32;

/// Parameter value (normalized 0.0 to 1.0 when exchanged with the host).
pub type ParameterValue = f64;
