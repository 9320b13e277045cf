use crate::{
    core::{
        advice::{immediate_advice, right_now_advice, Advisory, Direction},
        timezone::{local_hour, time_difference, ZoneDatabase},
    },
    error::{LagError, Result},
    types::{AgeGroup, FlightClass, TripParameters},
};
use chrono::{DateTime, Utc};
use tracing::info;

const ADMIN_CLASSES: [FlightClass; 2] = [FlightClass::Business, FlightClass::First];

/// Form state behind the advisor screen.
///
/// Owns the trip parameters and keeps the admin rule intact: admin mode
/// can only be on while the age group is `kid`.
#[derive(Debug, Clone, Default)]
pub struct TripForm {
    params: TripParameters,
}

impl TripForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing parameters. Admin mode is dropped unless the group is `kid`.
    pub fn from_params(mut params: TripParameters) -> Self {
        if params.age_group != AgeGroup::Kid {
            params.admin_mode = false;
        }
        Self { params }
    }

    pub fn params(&self) -> &TripParameters {
        &self.params
    }

    pub fn is_admin(&self) -> bool {
        self.params.admin_mode
    }

    pub fn set_origin(&mut self, zone: impl Into<String>) {
        self.params.origin_timezone = zone.into();
    }

    pub fn set_destination(&mut self, zone: impl Into<String>) {
        self.params.destination_timezone = zone.into();
    }

    /// Changing away from `kid` always revokes admin mode.
    pub fn set_age_group(&mut self, age: AgeGroup) {
        self.params.age_group = age;
        if age != AgeGroup::Kid && self.params.admin_mode {
            info!(%age, "age group changed, admin mode revoked");
            self.params.admin_mode = false;
        }
    }

    pub fn set_trip_length(&mut self, days: u32) -> Result<()> {
        if days == 0 {
            return Err(LagError::InvalidInput(
                "trip length must be at least 1 day".to_string(),
            ));
        }
        self.params.trip_length_days = days;
        Ok(())
    }

    pub fn set_flight_class(&mut self, class: FlightClass) -> Result<()> {
        if !self.flight_class_options().contains(&class) {
            return Err(LagError::InvalidInput(format!(
                "{} is not offered in admin mode",
                class.label()
            )));
        }
        self.params.flight_class = class;
        Ok(())
    }

    /// Submit an admin code. Unlocks only for a kid with an empty code.
    pub fn submit_admin_code(&mut self, code: &str) -> bool {
        self.params.admin_mode = self.params.age_group == AgeGroup::Kid && code.is_empty();
        info!(admin = self.params.admin_mode, "admin code submitted");
        self.params.admin_mode
    }

    /// Classes the picker offers; admin mode hides economy and premium.
    pub fn flight_class_options(&self) -> Vec<FlightClass> {
        if self.params.admin_mode {
            ADMIN_CLASSES.to_vec()
        } else {
            FlightClass::ALL.to_vec()
        }
    }

    /// Time difference, direction and tips for the current parameters at `now`.
    pub fn advisory(&self, zones: &dyn ZoneDatabase, now: DateTime<Utc>) -> Advisory {
        let params = &self.params;
        let time_difference = time_difference(
            zones,
            &params.origin_timezone,
            &params.destination_timezone,
            now,
        );
        let hour = local_hour(zones, &params.destination_timezone, now);

        Advisory {
            time_difference,
            direction: Direction::from_hours(time_difference),
            immediate_advice: immediate_advice(params.age_group).to_string(),
            right_now_advice: right_now_advice(hour, params.age_group, params.flight_class)
                .to_string(),
        }
    }

    pub fn trigger_label(&self, in_progress: bool) -> &'static str {
        if in_progress {
            "Thinking…"
        } else {
            "✨ Generate Jet Lag Recovery Plan"
        }
    }

    /// Gradient of the generate button.
    pub fn trigger_accent(&self) -> &'static str {
        if self.params.admin_mode {
            "linear-gradient(135deg,#fb7185,#a78bfa)"
        } else {
            "linear-gradient(135deg,#60a5fa,#a5b4fc)"
        }
    }

    pub fn admin_greeting(&self) -> Option<&'static str> {
        self.params.admin_mode.then_some("Welcome Back, Caviar 👑")
    }
}
