//! Initialization for AeroScript runs
//!
//! Turns configuration plus per-run overrides into a ready VM.
//!
//! # Example
//!
//! ```no_run
//! use aeroscript_core::init::InitBuilder;
//!
//! let vm = InitBuilder::new()
//!     .battery(500.0)
//!     .position(0.0, 10.0)
//!     .init()?;
//! # Ok::<(), aeroscript_core::Error>(())
//! ```

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::interpreter::VM;
use tracing::info;

/// Options for initializing a run
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Config file path (overrides default search)
    pub config_path: Option<PathBuf>,

    /// Initial battery level (overrides config)
    pub battery: Option<f32>,

    /// Initial altitude (overrides config)
    pub altitude: Option<f32>,

    /// Initial position (overrides config)
    pub position: Option<(f32, f32)>,

    /// Pause between modes and wait for messages
    pub interactive: bool,
}

/// Builder for constructing InitOptions
pub struct InitBuilder {
    options: InitOptions,
}

impl InitBuilder {
    /// Create a new builder with default options
    pub fn new() -> Self {
        Self {
            options: InitOptions::default(),
        }
    }

    /// Set the config file path
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn battery(mut self, battery: f32) -> Self {
        self.options.battery = Some(battery);
        self
    }

    pub fn altitude(mut self, altitude: f32) -> Self {
        self.options.altitude = Some(altitude);
        self
    }

    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.options.position = Some((x, y));
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.options.interactive = interactive;
        self
    }

    /// Load configuration and build the VM
    pub fn init(self) -> Result<VM> {
        initialize(self.options)
    }
}

impl Default for InitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a VM from the given options
pub fn initialize(options: InitOptions) -> Result<VM> {
    let config = Config::builder()
        .config_path(options.config_path)
        .battery(options.battery)
        .altitude(options.altitude)
        .position(options.position)
        .build()?;

    Ok(from_config(&config, options.interactive))
}

/// Build a VM from an already loaded configuration
pub fn from_config(config: &Config, interactive: bool) -> VM {
    let flight = config.initial_flight();
    info!(
        position = ?flight.position(),
        altitude = flight.altitude(),
        battery = flight.battery(),
        "Initialized flight state"
    );

    let mut vm = VM::new(flight, config.engine.clone());
    vm.interactive = interactive;
    vm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_applies_flight_and_engine() {
        let mut config = Config::default();
        config.flight.battery = 77.0;
        config.engine.low_battery_threshold = 5.0;

        let vm = from_config(&config, true);
        assert_eq!(vm.current_battery(), 77.0);
        assert_eq!(vm.engine.low_battery_threshold, 5.0);
        assert!(vm.interactive);
        assert!(!vm.is_running());
    }

    #[test]
    fn test_builder_overrides() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let vm = InitBuilder::new()
            .config_path(file.path())
            .battery(300.0)
            .altitude(12.0)
            .position(4.0, 5.0)
            .init()
            .unwrap();

        assert_eq!(vm.current_battery(), 300.0);
        assert_eq!(vm.current_altitude(), 12.0);
        assert_eq!(vm.current_position(), (4.0, 5.0));
        assert_eq!(vm.flight.initial_position(), (4.0, 5.0));
    }
}
