//! # transposer-host
//!
//! Host-side adapter for plugins written against `transposer-core`.
//!
//! A plugin format bridge (or a test harness) talks to plugins only through
//! the object-safe [`HostedPlugin`] trait. [`PluginInstance`] implements it
//! for any [`Plugin`](transposer_core::Plugin), owning the
//! unprepared/prepared state machine and the MIDI output buffer, and
//! [`PluginRegistry`] maps plugin names to constructors.
//!
//! ```ignore
//! let mut registry = PluginRegistry::new();
//! transposer::register(&mut registry)?;
//!
//! let mut plugin = registry.create("Transposer")?;
//! plugin.prepare(48_000.0, 512)?;
//! plugin.process(&mut AudioBuffer::empty(512), &mut midi)?;
//! ```

mod hosted;
mod instance;
mod registry;

pub use hosted::HostedPlugin;
pub use instance::PluginInstance;
pub use registry::PluginRegistry;
