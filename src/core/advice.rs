use crate::types::{AgeGroup, FlightClass};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way the body clock has to shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Eastbound,
    Westbound,
    NoShift,
}

impl Direction {
    /// Direction for a destination-minus-origin hour delta.
    pub fn from_hours(delta: i32) -> Self {
        match delta {
            d if d > 0 => Direction::Eastbound,
            d if d < 0 => Direction::Westbound,
            _ => Direction::NoShift,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Eastbound => "Eastbound",
            Direction::Westbound => "Westbound",
            Direction::NoShift => "No shift",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One fixed sentence per age group.
pub fn immediate_advice(age: AgeGroup) -> &'static str {
    match age {
        AgeGroup::Kid => "Gentle adjustment. Outdoor light, early meals, naps OK.",
        AgeGroup::Teen => "Short naps (20 min), avoid screens at night.",
        AgeGroup::Adult => "Strict light control. Optional low-dose melatonin.",
    }
}

/// Tip for the current hour at the destination.
pub fn right_now_advice(hour: u32, age: AgeGroup, flight_class: FlightClass) -> &'static str {
    match hour {
        6..=9 => "☀️ Get morning sunlight. Light breakfast. No naps.",
        10..=13 => "🚶 Stay active. Hydrate. Avoid heavy caffeine.",
        14..=16 if age == AgeGroup::Kid => "😴 Short nap OK (20 min).",
        14..=16 => "😴 Optional 20-min nap only.",
        17..=19 => "🌆 Dim lights. Eat earlier. Screens down.",
        _ if flight_class != FlightClass::Economy => {
            "🌙 Sleep window. You should fall asleep easier."
        }
        _ => "🌙 Sleep window. Cool room, no screens.",
    }
}

/// Everything the advisory panel shows, derived from the current form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// Destination minus origin, in whole hours
    pub time_difference: i32,
    pub direction: Direction,
    pub immediate_advice: String,
    pub right_now_advice: String,
}
