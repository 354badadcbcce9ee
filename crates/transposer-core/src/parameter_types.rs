//! Parameter types with encapsulated atomic storage.
//!
//! Parameters are shared between the audio thread (which reads them once
//! per block) and UI/automation threads (which write them at any time), so
//! every value lives in an atomic and is accessed through `&self`.
//!
//! Use `#[derive(Parameters)]` to build a collection:
//!
//! ```ignore
//! use transposer_core::IntParameter;
//! use transposer_macros::Parameters;
//!
//! #[derive(Parameters)]
//! pub struct MyParameters {
//!     #[parameter(id = "transpose", name = "Transpose", default = 0, range = -12..=12, kind = "semitones")]
//!     pub transpose: IntParameter,
//! }
//! ```

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::error::{PluginError, PluginResult};
use crate::parameter_format::Formatter;
use crate::parameter_info::{ParameterFlags, ParameterInfo};
use crate::types::{ParameterId, ParameterValue};

/// Bytes each parameter occupies in serialized state.
pub const STATE_BYTES_PER_PARAMETER: usize = 4;

// =============================================================================
// ParameterRef Trait - Type-erased parameter access
// =============================================================================

/// Trait for type-erased parameter access at runtime.
///
/// All implementations must be thread-safe (`Send + Sync`) for
/// concurrent access from audio, UI, and host threads.
pub trait ParameterRef: Send + Sync {
    /// Get the parameter's unique ID.
    fn id(&self) -> ParameterId {
        self.info().id
    }

    /// Get the parameter's display name.
    fn name(&self) -> &'static str {
        self.info().name
    }

    /// Get the parameter's unit string.
    fn units(&self) -> &'static str {
        self.info().units
    }

    /// Get the current normalized value (0.0-1.0).
    ///
    /// This is lock-free and safe to call from the audio thread.
    fn get_normalized(&self) -> ParameterValue;

    /// Set the normalized value (0.0-1.0). Values are clamped.
    fn set_normalized(&self, value: ParameterValue);

    /// Get the current plain value in natural units.
    fn get_plain(&self) -> ParameterValue;

    /// Set the plain value in natural units. Values are clamped to the range.
    fn set_plain(&self, value: ParameterValue);

    /// Format the current value for display.
    fn display(&self) -> String {
        self.display_normalized(self.get_normalized())
    }

    /// Format a normalized value for display.
    fn display_normalized(&self, normalized: ParameterValue) -> String;

    /// Parse a display string to a normalized value.
    fn parse(&self, s: &str) -> Option<ParameterValue>;

    /// Convert a normalized value to a plain value.
    fn normalized_to_plain(&self, normalized: ParameterValue) -> ParameterValue;

    /// Convert a plain value to a normalized value.
    fn plain_to_normalized(&self, plain: ParameterValue) -> ParameterValue;

    /// Get the full metadata for this parameter.
    fn info(&self) -> &ParameterInfo;
}

// =============================================================================
// IntParameter - Discrete integer parameter
// =============================================================================

/// Discrete integer parameter.
///
/// # Example
///
/// ```
/// use transposer_core::{IntParameter, ParameterRef};
///
/// let transpose = IntParameter::semitones("Transpose", 0, -12..=12);
/// transpose.set(20);
/// assert_eq!(transpose.get(), 12);
/// assert_eq!(transpose.display(), "+12 st");
/// ```
pub struct IntParameter {
    /// Parameter metadata (id, name, units, flags, etc.)
    info: ParameterInfo,
    /// Atomic storage for the integer value
    value: AtomicI32,
    min: i32,
    max: i32,
    formatter: Formatter,
}

impl IntParameter {
    /// Create a generic integer parameter.
    ///
    /// The parameter ID defaults to 0 and should be set via
    /// [`with_id`](Self::with_id) or the `#[derive(Parameters)]` macro.
    pub fn new(name: &'static str, default: i32, range: RangeInclusive<i32>) -> Self {
        let (min, max) = (*range.start(), *range.end());
        let range_size = i64::from(max) - i64::from(min);
        let default = default.clamp(min, max);
        let default_normalized = if range_size == 0 {
            0.5
        } else {
            (i64::from(default) - i64::from(min)) as f64 / range_size as f64
        };

        Self {
            info: ParameterInfo {
                id: 0,
                name,
                short_name: name,
                units: "",
                default_normalized,
                step_count: range_size.min(i64::from(i32::MAX)) as i32,
                flags: ParameterFlags::default(),
            },
            value: AtomicI32::new(default),
            min,
            max,
            formatter: Formatter::Integer,
        }
    }

    /// Create a semitones parameter for pitch shifting.
    ///
    /// Display: "+12 st", "-7 st", "0 st"
    pub fn semitones(name: &'static str, default: i32, range: RangeInclusive<i32>) -> Self {
        let mut parameter = Self::new(name, default, range);
        parameter.formatter = Formatter::Semitones;
        parameter.info.units = Formatter::Semitones.units();
        parameter
    }

    /// Set the parameter ID.
    ///
    /// The derive macro passes the FNV-1a hash of the string ID.
    pub fn with_id(mut self, id: ParameterId) -> Self {
        self.info.id = id;
        self
    }

    /// Set the short name for constrained UIs.
    pub fn with_short_name(mut self, short: &'static str) -> Self {
        self.info.short_name = short;
        self
    }

    /// Valid range (inclusive).
    pub fn range(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    /// Get the current integer value.
    #[inline]
    pub fn get(&self) -> i32 {
        self.value.load(Ordering::Relaxed)
    }

    /// Set the integer value, clamped to the range.
    #[inline]
    pub fn set(&self, value: i32) {
        self.value
            .store(value.clamp(self.min, self.max), Ordering::Relaxed);
    }
}

impl ParameterRef for IntParameter {
    fn get_normalized(&self) -> ParameterValue {
        self.plain_to_normalized(f64::from(self.get()))
    }

    fn set_normalized(&self, value: ParameterValue) {
        self.set_plain(self.normalized_to_plain(value));
    }

    fn get_plain(&self) -> ParameterValue {
        f64::from(self.get())
    }

    fn set_plain(&self, value: ParameterValue) {
        // Float-to-int `as` saturates, so NaN and infinities are safe here.
        let value = value
            .round()
            .clamp(f64::from(self.min), f64::from(self.max));
        self.set(value as i32);
    }

    fn display_normalized(&self, normalized: ParameterValue) -> String {
        self.formatter.format(self.normalized_to_plain(normalized))
    }

    fn parse(&self, s: &str) -> Option<ParameterValue> {
        let plain = self.formatter.parse(s)?;
        Some(self.plain_to_normalized(plain))
    }

    fn normalized_to_plain(&self, normalized: ParameterValue) -> ParameterValue {
        let normalized = normalized.clamp(0.0, 1.0);
        (f64::from(self.min) + normalized * (f64::from(self.max) - f64::from(self.min))).round()
    }

    fn plain_to_normalized(&self, plain: ParameterValue) -> ParameterValue {
        if self.max == self.min {
            return 0.5;
        }
        let span = f64::from(self.max) - f64::from(self.min);
        ((plain - f64::from(self.min)) / span).clamp(0.0, 1.0)
    }

    fn info(&self) -> &ParameterInfo {
        &self.info
    }
}

impl core::fmt::Debug for IntParameter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntParameter")
            .field("name", &self.info.name)
            .field("id", &self.info.id)
            .field("value", &self.get())
            .field("range", &self.range())
            .finish()
    }
}

// =============================================================================
// Parameters Trait - Parameter collections
// =============================================================================

/// A plugin's parameter collection.
///
/// Implemented by `#[derive(Parameters)]`. The provided methods give hosts
/// normalized access by ID and serialize the collection.
///
/// # State Format
///
/// Each parameter's plain value as a 4-byte little-endian `i32`, in
/// declaration order. No header, no versioning.
pub trait Parameters: Send + Sync {
    /// Number of parameters.
    fn count(&self) -> usize;

    /// Iterate over all parameters in declaration order.
    ///
    /// Boxes the iterator, so keep it off the audio thread.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn ParameterRef> + '_>;

    /// Find a parameter by ID.
    fn by_id(&self, id: ParameterId) -> Option<&dyn ParameterRef> {
        self.iter().find(|parameter| parameter.id() == id)
    }

    /// Parameter metadata by index (0 to count-1).
    fn info(&self, index: usize) -> Option<&ParameterInfo> {
        self.iter().nth(index).map(|parameter| parameter.info())
    }

    /// Current normalized value of a parameter.
    fn get_normalized(&self, id: ParameterId) -> PluginResult<ParameterValue> {
        self.by_id(id)
            .map(|parameter| parameter.get_normalized())
            .ok_or(PluginError::UnknownParameter(id))
    }

    /// Set a parameter from a normalized value.
    fn set_normalized(&self, id: ParameterId, value: ParameterValue) -> PluginResult<()> {
        let parameter = self.by_id(id).ok_or(PluginError::UnknownParameter(id))?;
        parameter.set_normalized(value);
        Ok(())
    }

    /// Serialize all parameter values.
    fn save_state(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.count() * STATE_BYTES_PER_PARAMETER);
        for parameter in self.iter() {
            let value = parameter.get_plain().round() as i32;
            data.extend_from_slice(&value.to_le_bytes());
        }
        data
    }

    /// Restore parameter values.
    ///
    /// Trailing bytes are ignored. A buffer too short to hold every
    /// parameter is rejected and nothing is changed.
    fn load_state(&self, data: &[u8]) -> PluginResult<()> {
        let needed = self.count() * STATE_BYTES_PER_PARAMETER;
        if data.len() < needed {
            return Err(PluginError::StateError(format!(
                "expected at least {} bytes, got {}",
                needed,
                data.len()
            )));
        }

        for (parameter, chunk) in self
            .iter()
            .zip(data.chunks_exact(STATE_BYTES_PER_PARAMETER))
        {
            let value = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            parameter.set_plain(f64::from(value));
        }
        Ok(())
    }
}

/// Empty parameter collection for plugins with no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParameters;

impl Parameters for NoParameters {
    fn count(&self) -> usize {
        0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn ParameterRef> + '_> {
        Box::new(std::iter::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::fnv1a_32;

    struct TwoInts {
        coarse: IntParameter,
        fine: IntParameter,
    }

    impl TwoInts {
        fn new() -> Self {
            Self {
                coarse: IntParameter::semitones("Coarse", 0, -12..=12).with_id(fnv1a_32("coarse")),
                fine: IntParameter::new("Fine", 50, 0..=100).with_id(fnv1a_32("fine")),
            }
        }
    }

    impl Parameters for TwoInts {
        fn count(&self) -> usize {
            2
        }

        fn iter(&self) -> Box<dyn Iterator<Item = &dyn ParameterRef> + '_> {
            Box::new([&self.coarse as &dyn ParameterRef, &self.fine].into_iter())
        }
    }

    #[test]
    fn test_int_parameter_defaults() {
        let parameter = IntParameter::new("Transpose", 0, -12..=12);
        assert_eq!(parameter.get(), 0);
        assert_eq!(parameter.info().step_count, 24);
        assert!((parameter.info().default_normalized - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_int_parameter_clamps() {
        let parameter = IntParameter::new("Transpose", 0, -12..=12);
        parameter.set(100);
        assert_eq!(parameter.get(), 12);
        parameter.set(i32::MIN);
        assert_eq!(parameter.get(), -12);
        parameter.set_plain(f64::NAN);
        assert_eq!(parameter.get(), 0);
    }

    #[test]
    fn test_default_outside_range_is_clamped() {
        let parameter = IntParameter::new("Odd", 40, 0..=10);
        assert_eq!(parameter.get(), 10);
        assert!((parameter.info().default_normalized - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_mapping() {
        let parameter = IntParameter::new("Transpose", 0, -12..=12);
        parameter.set_normalized(0.0);
        assert_eq!(parameter.get(), -12);
        parameter.set_normalized(1.0);
        assert_eq!(parameter.get(), 12);
        parameter.set_normalized(17.0 / 24.0);
        assert_eq!(parameter.get(), 5);
        assert!((parameter.get_normalized() - 17.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_display_and_parse() {
        let parameter = IntParameter::semitones("Transpose", 0, -12..=12);
        parameter.set(5);
        assert_eq!(parameter.display(), "+5 st");
        assert_eq!(parameter.units(), "st");

        let normalized = parameter.parse("-7 st").unwrap();
        assert_eq!(parameter.normalized_to_plain(normalized), -7.0);
    }

    #[test]
    fn test_collection_lookup() {
        let parameters = TwoInts::new();
        assert_eq!(parameters.info(1).map(|info| info.name), Some("Fine"));
        assert!(parameters.info(2).is_none());
        assert_eq!(
            parameters.by_id(fnv1a_32("coarse")).map(|p| p.name()),
            Some("Coarse")
        );
        assert_eq!(
            parameters.set_normalized(1234, 0.5),
            Err(PluginError::UnknownParameter(1234))
        );
    }

    #[test]
    fn test_state_layout() {
        let parameters = TwoInts::new();
        parameters.coarse.set(-3);
        parameters.fine.set(99);

        let state = parameters.save_state();
        let mut expected = (-3i32).to_le_bytes().to_vec();
        expected.extend_from_slice(&99i32.to_le_bytes());
        assert_eq!(state, expected);
    }

    #[test]
    fn test_state_round_trip() {
        let source = TwoInts::new();
        source.coarse.set(7);
        source.fine.set(1);

        let target = TwoInts::new();
        target.load_state(&source.save_state()).unwrap();
        assert_eq!(target.coarse.get(), 7);
        assert_eq!(target.fine.get(), 1);
    }

    #[test]
    fn test_short_state_leaves_values() {
        let parameters = TwoInts::new();
        parameters.coarse.set(4);

        let result = parameters.load_state(&[1, 0, 0, 0, 2]);
        assert!(matches!(result, Err(PluginError::StateError(_))));
        assert_eq!(parameters.coarse.get(), 4);
        assert_eq!(parameters.fine.get(), 50);
    }

    #[test]
    fn test_no_parameters() {
        assert_eq!(NoParameters.count(), 0);
        assert!(NoParameters.save_state().is_empty());
        assert!(NoParameters.load_state(&[]).is_ok());
    }
}
