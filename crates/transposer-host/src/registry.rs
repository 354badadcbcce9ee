//! Plugin registry.
//!
//! Maps plugin names to constructors. The caller builds the registry and
//! hands it to each plugin crate's `register` function; there is no global
//! state.

use transposer_core::{Plugin, PluginConfig, PluginError, PluginResult};

use crate::hosted::HostedPlugin;
use crate::instance::PluginInstance;

type Constructor = fn(&'static PluginConfig) -> Box<dyn HostedPlugin>;

struct Entry {
    config: &'static PluginConfig,
    create: Constructor,
}

fn instantiate<P: Plugin>(config: &'static PluginConfig) -> Box<dyn HostedPlugin> {
    Box::new(PluginInstance::<P>::new(config))
}

/// Registry of available plugins, keyed by [`PluginConfig::name`].
#[derive(Default)]
pub struct PluginRegistry {
    entries: Vec<Entry>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register plugin type `P` under `config.name`.
    ///
    /// Fails if a plugin with the same name is already registered.
    pub fn register<P: Plugin>(&mut self, config: &'static PluginConfig) -> PluginResult<()> {
        if self.find(config.name).is_some() {
            log::warn!("plugin {:?} is already registered", config.name);
            return Err(PluginError::Registration(format!(
                "plugin {:?} is already registered",
                config.name
            )));
        }

        self.entries.push(Entry {
            config,
            create: instantiate::<P>,
        });
        log::info!("registered plugin {:?} v{}", config.name, config.version);
        Ok(())
    }

    /// Create a new, unprepared instance of the named plugin.
    pub fn create(&self, name: &str) -> PluginResult<Box<dyn HostedPlugin>> {
        let entry = self
            .find(name)
            .ok_or_else(|| PluginError::Registration(format!("no plugin named {:?}", name)))?;
        Ok((entry.create)(entry.config))
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata of every registered plugin, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static PluginConfig> + '_ {
        self.entries.iter().map(|entry| entry.config)
    }

    fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.config.name == name)
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| entry.config.name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transposer_core::{AudioBuffer, AudioProcessor, NoConfig, NoParameters};
    use transposer_macros::HasParameters;

    #[derive(Default, HasParameters)]
    struct Silence {
        #[parameters]
        parameters: NoParameters,
    }

    impl Plugin for Silence {
        type Config = NoConfig;
        type Processor = SilenceProcessor;

        fn prepare(self, _: NoConfig) -> SilenceProcessor {
            SilenceProcessor {
                parameters: self.parameters,
            }
        }
    }

    #[derive(HasParameters)]
    struct SilenceProcessor {
        #[parameters]
        parameters: NoParameters,
    }

    impl AudioProcessor for SilenceProcessor {
        type Plugin = Silence;

        fn process(&mut self, buffer: &mut AudioBuffer<'_>) {
            buffer.clear_outputs();
        }

        fn unprepare(self) -> Silence {
            Silence {
                parameters: self.parameters,
            }
        }
    }

    static SILENCE: PluginConfig = PluginConfig::new("Silence");
    static QUIET: PluginConfig = PluginConfig::new("Quiet").with_version("2.0.0");

    #[test]
    fn test_register_and_create() {
        let mut registry = PluginRegistry::new();
        assert!(registry.is_empty());

        registry.register::<Silence>(&SILENCE).unwrap();
        registry.register::<Silence>(&QUIET).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.iter().map(|c| c.name).collect::<Vec<_>>(),
            ["Silence", "Quiet"]
        );

        let mut plugin = registry.create("Quiet").unwrap();
        assert_eq!(plugin.name(), "Quiet");
        assert_eq!(plugin.config().version, "2.0.0");
        plugin.prepare(44_100.0, 64).unwrap();
        assert!(plugin.is_prepared());
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = PluginRegistry::new();
        registry.register::<Silence>(&SILENCE).unwrap();
        assert!(matches!(
            registry.register::<Silence>(&SILENCE),
            Err(PluginError::Registration(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_name() {
        let registry = PluginRegistry::new();
        assert!(matches!(
            registry.create("Missing"),
            Err(PluginError::Registration(_))
        ));
    }
}
