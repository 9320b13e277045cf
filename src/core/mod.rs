pub mod advice;
pub mod form;
pub mod generator;
pub mod prompt;
pub mod timezone;

pub use advice::{immediate_advice, right_now_advice, Advisory, Direction};
pub use form::TripForm;
pub use generator::{ScheduleGenerator, TextGenerator};
pub use prompt::{
    assemble_plan, build_day_prompt, build_plan_prompt, day_marker, fallback_block,
    validate_block, FALLBACK_BODY,
};
pub use timezone::{
    available_zones, local_hour, time_difference, ChronoTzDatabase, ZoneDatabase, FALLBACK_ZONES,
};
