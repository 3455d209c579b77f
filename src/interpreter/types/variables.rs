//! Named flight state accessors
//!
//! A `VariableRef` expression carries one of these instead of a name looked up
//! in a map. The accessor is bound when the tree is built and read lazily, so
//! evaluation always sees the live value.

use super::values::{Value, ValueType};
use crate::interpreter::flight::FlightState;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    InitialPosition,
    CurrentPosition,
    Altitude,
    BatteryLevel,
    InitialBattery,
    DistanceTravelled,
}

impl Variable {
    /// Read the current value from the flight state
    pub fn read(self, flight: &FlightState) -> Value {
        match self {
            Variable::InitialPosition => {
                let (x, y) = flight.initial_position();
                Value::Point(x, y)
            }
            Variable::CurrentPosition => {
                let (x, y) = flight.position();
                Value::Point(x, y)
            }
            Variable::Altitude => Value::Number(flight.altitude()),
            Variable::BatteryLevel => Value::Number(flight.battery()),
            Variable::InitialBattery => Value::Number(flight.initial_battery()),
            Variable::DistanceTravelled => Value::Number(flight.distance()),
        }
    }

    /// Static type of the value this accessor yields
    pub fn value_type(self) -> ValueType {
        match self {
            Variable::InitialPosition | Variable::CurrentPosition => ValueType::Point,
            Variable::Altitude
            | Variable::BatteryLevel
            | Variable::InitialBattery
            | Variable::DistanceTravelled => ValueType::Number,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variable::InitialPosition => "initial position",
            Variable::CurrentPosition => "current position",
            Variable::Altitude => "altitude",
            Variable::BatteryLevel => "battery level",
            Variable::InitialBattery => "initial battery level",
            Variable::DistanceTravelled => "distance travelled",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
