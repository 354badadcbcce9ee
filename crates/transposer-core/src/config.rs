//! Plugin metadata.
//!
//! Everything a host shows about a plugin before instantiating it. Defined
//! once as a `static` with the const builder:
//!
//! ```
//! use transposer_core::PluginConfig;
//!
//! pub static CONFIG: PluginConfig = PluginConfig::new("My Effect")
//!     .with_vendor("My Company")
//!     .with_version("1.0.0")
//!     .with_midi_effect();
//!
//! assert!(CONFIG.accepts_midi && CONFIG.produces_midi);
//! ```

/// Format-agnostic plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// Plugin name displayed in the DAW. Also the registry key.
    pub name: &'static str,

    /// Vendor/company name.
    pub vendor: &'static str,

    /// Vendor URL.
    pub url: &'static str,

    /// Vendor email.
    pub email: &'static str,

    /// Plugin version string.
    pub version: &'static str,

    /// Plugin category (e.g., "Fx", "Instrument").
    pub category: &'static str,

    /// Sub-categories.
    /// Format: pipe-separated string like "Fx|Tools"
    pub sub_categories: &'static str,

    /// Whether the plugin reads incoming MIDI.
    pub accepts_midi: bool,

    /// Whether the plugin emits MIDI.
    pub produces_midi: bool,

    /// Whether the plugin only processes MIDI (no audio I/O).
    pub is_midi_effect: bool,
}

impl PluginConfig {
    /// Create a new plugin configuration with default values.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            vendor: "Unknown Vendor",
            url: "",
            email: "",
            version: "1.0.0",
            category: "Fx",
            sub_categories: "",
            accepts_midi: false,
            produces_midi: false,
            is_midi_effect: false,
        }
    }

    /// Set the vendor name.
    pub const fn with_vendor(mut self, vendor: &'static str) -> Self {
        self.vendor = vendor;
        self
    }

    /// Set the vendor URL.
    pub const fn with_url(mut self, url: &'static str) -> Self {
        self.url = url;
        self
    }

    /// Set the vendor email.
    pub const fn with_email(mut self, email: &'static str) -> Self {
        self.email = email;
        self
    }

    /// Set the version string.
    pub const fn with_version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }

    /// Set the plugin category.
    pub const fn with_category(mut self, category: &'static str) -> Self {
        self.category = category;
        self
    }

    /// Set the sub-categories.
    pub const fn with_sub_categories(mut self, sub_categories: &'static str) -> Self {
        self.sub_categories = sub_categories;
        self
    }

    /// Declare MIDI input.
    pub const fn with_midi_input(mut self) -> Self {
        self.accepts_midi = true;
        self
    }

    /// Declare MIDI output.
    pub const fn with_midi_output(mut self) -> Self {
        self.produces_midi = true;
        self
    }

    /// Declare a MIDI-only effect. Implies MIDI input and output.
    pub const fn with_midi_effect(mut self) -> Self {
        self.accepts_midi = true;
        self.produces_midi = true;
        self.is_midi_effect = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        const CONFIG: PluginConfig = PluginConfig::new("Plain");
        assert_eq!(CONFIG.category, "Fx");
        assert!(!CONFIG.accepts_midi);
        assert!(!CONFIG.is_midi_effect);
    }

    #[test]
    fn test_builder_chain() {
        const CONFIG: PluginConfig = PluginConfig::new("Arp")
            .with_vendor("Acme")
            .with_category("Instrument")
            .with_midi_output();
        assert_eq!(CONFIG.vendor, "Acme");
        assert_eq!(CONFIG.category, "Instrument");
        assert!(CONFIG.produces_midi);
        assert!(!CONFIG.accepts_midi);
    }
}
