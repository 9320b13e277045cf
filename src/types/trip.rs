use crate::error::LagError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recovery plans cover the flight day plus at most this many destination days.
pub const MAX_RECOVERY_DAYS: u32 = 3;

/// Traveller age group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Kid,
    Teen,
    Adult,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Kid => "kid",
            AgeGroup::Teen => "teen",
            AgeGroup::Adult => "adult",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Kid => "Kid",
            AgeGroup::Teen => "Teen",
            AgeGroup::Adult => "Adult",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = LagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kid" => Ok(AgeGroup::Kid),
            "teen" => Ok(AgeGroup::Teen),
            "adult" => Ok(AgeGroup::Adult),
            other => Err(LagError::InvalidInput(format!(
                "unknown age group '{}' (expected kid, teen or adult)",
                other
            ))),
        }
    }
}

/// Cabin class of the flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightClass {
    Economy,
    Premium,
    Business,
    First,
}

impl FlightClass {
    pub const ALL: [FlightClass; 4] = [
        FlightClass::Economy,
        FlightClass::Premium,
        FlightClass::Business,
        FlightClass::First,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightClass::Economy => "economy",
            FlightClass::Premium => "premium",
            FlightClass::Business => "business",
            FlightClass::First => "first",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlightClass::Economy => "Economy",
            FlightClass::Premium => "Premium Economy",
            FlightClass::Business => "Business",
            FlightClass::First => "First",
        }
    }
}

impl fmt::Display for FlightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightClass {
    type Err = LagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "economy" => Ok(FlightClass::Economy),
            "premium" | "premium-economy" | "premium_economy" => Ok(FlightClass::Premium),
            "business" => Ok(FlightClass::Business),
            "first" => Ok(FlightClass::First),
            other => Err(LagError::InvalidInput(format!(
                "unknown flight class '{}' (expected economy, premium, business or first)",
                other
            ))),
        }
    }
}

/// Everything the traveller told us about the trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripParameters {
    /// IANA zone the traveller lives in and departs from (e.g. "Asia/Bangkok")
    pub origin_timezone: String,
    /// IANA zone of the destination
    pub destination_timezone: String,
    pub age_group: AgeGroup,
    /// Requested trip length in days, at least 1
    pub trip_length_days: u32,
    pub flight_class: FlightClass,
    /// Cosmetic admin variant; only ever true for kids
    pub admin_mode: bool,
}

impl Default for TripParameters {
    fn default() -> Self {
        Self {
            origin_timezone: "Asia/Bangkok".to_string(),
            destination_timezone: "Europe/London".to_string(),
            age_group: AgeGroup::Teen,
            trip_length_days: 5,
            flight_class: FlightClass::Economy,
            admin_mode: false,
        }
    }
}

impl TripParameters {
    /// Number of destination days a recovery plan covers.
    pub fn effective_days(&self) -> u32 {
        self.trip_length_days.min(MAX_RECOVERY_DAYS)
    }
}
