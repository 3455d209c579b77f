//! Configuration for AeroScript
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. TOML file (`aeroscript.toml` in the working directory, or an explicit path
//!    from the builder / `AEROSCRIPT_CONFIG_PATH`)
//! 3. Environment variables, e.g. `AEROSCRIPT_FLIGHT__BATTERY=500` or
//!    `AEROSCRIPT_ENGINE__COSTS__TURN=0.5` (a `.env` file is loaded first)
//! 4. Explicit overrides set on the builder (CLI flags)

use crate::error::Result;
use crate::interpreter::{CostModel, FlightState};
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "aeroscript";
pub const CONFIG_PATH_ENV: &str = "AEROSCRIPT_CONFIG_PATH";
const ENV_PREFIX: &str = "AEROSCRIPT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub flight: FlightConfig,
    pub engine: EngineConfig,
}

/// Initial flight state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub battery: f32,
    pub altitude: f32,
    pub position: PositionConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    pub x: f32,
    pub y: f32,
}

/// Tunables of the runtime itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Battery level under which the "low battery" reaction fires
    pub low_battery_threshold: f32,
    pub costs: CostModel,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            battery: 10000.0,
            altitude: 0.0,
            position: PositionConfig::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            low_battery_threshold: 20.0,
            costs: CostModel::default(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::builder().build()
    }

    /// Flight state at the start of a run
    pub fn initial_flight(&self) -> FlightState {
        FlightState::new(
            (self.flight.position.x, self.flight.position.y),
            self.flight.altitude,
            self.flight.battery,
        )
    }

    /// Render the effective configuration
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/* ===================== Builder ===================== */

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    battery: Option<f32>,
    altitude: Option<f32>,
    position: Option<(f32, f32)>,
}

impl ConfigBuilder {
    /// Config file path (overrides default search)
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn battery(mut self, battery: Option<f32>) -> Self {
        self.battery = battery;
        self
    }

    pub fn altitude(mut self, altitude: Option<f32>) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn position(mut self, position: Option<(f32, f32)>) -> Self {
        self.position = position;
        self
    }

    pub fn build(self) -> Result<Config> {
        dotenvy::dotenv().ok();

        let path = self
            .config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let mut builder = config::Config::builder();
        builder = match &path {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(battery) = self.battery {
            builder = builder.set_override("flight.battery", battery as f64)?;
        }
        if let Some(altitude) = self.altitude {
            builder = builder.set_override("flight.altitude", altitude as f64)?;
        }
        if let Some((x, y)) = self.position {
            builder = builder
                .set_override("flight.position.x", x as f64)?
                .set_override("flight.position.y", y as f64)?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        debug!(?path, ?config, "Configuration loaded");
        Ok(config)
    }
}
