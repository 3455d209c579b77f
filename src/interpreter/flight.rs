//! Flight state
//!
//! Telemetry of the simulated vehicle. Created once per run, mutated only by
//! action execution, read by expression accessors and telemetry queries.

use crate::error::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightState {
    position: (f32, f32),
    initial_position: (f32, f32),
    altitude: f32,
    battery: f32,
    initial_battery: f32,
    distance: f32,
    running: bool,
}

/// Create the flight state for a run
pub fn initialize(position: (f32, f32), altitude: f32, battery: f32) -> FlightState {
    FlightState::new(position, altitude, battery)
}

impl FlightState {
    pub fn new(position: (f32, f32), altitude: f32, battery: f32) -> Self {
        Self {
            position,
            initial_position: position,
            altitude,
            battery,
            initial_battery: battery,
            distance: 0.0,
            running: false,
        }
    }

    /* ===================== Telemetry ===================== */

    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    pub fn initial_position(&self) -> (f32, f32) {
        self.initial_position
    }

    pub fn altitude(&self) -> f32 {
        self.altitude
    }

    pub fn battery(&self) -> f32 {
        self.battery
    }

    pub fn initial_battery(&self) -> f32 {
        self.initial_battery
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /* ===================== Updates ===================== */

    pub(crate) fn pause(&mut self) {
        self.running = false;
    }

    pub(crate) fn resume(&mut self) {
        self.running = true;
    }

    /// Battery must never be negative when an action starts
    pub fn check_invariants(&self) -> Result<()> {
        if self.battery < 0.0 {
            return Err(Error::DepletedBattery {
                battery: self.battery,
            });
        }
        Ok(())
    }

    /// Charge `cost` against the battery, failing without side effects when
    /// the remaining charge does not cover it
    pub(crate) fn consume(&mut self, cost: f32) -> Result<()> {
        if self.battery < cost {
            return Err(Error::InsufficientBattery {
                cost,
                battery: self.battery,
            });
        }
        self.battery -= cost;
        Ok(())
    }

    pub(crate) fn move_to(&mut self, target: (f32, f32), distance: f32) {
        self.position = target;
        self.distance += distance;
    }

    pub(crate) fn change_altitude(&mut self, delta: f32) {
        self.altitude += delta;
    }
}

impl Default for FlightState {
    fn default() -> Self {
        Self::new((0.0, 0.0), 0.0, 10000.0)
    }
}
